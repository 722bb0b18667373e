use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Video id YouTube answers with when a search produced nothing at all.
pub const PLACEHOLDER_VIDEO_ID: &str = "dQw4w9WgXcQ";

pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

// Spotify payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: Option<SpotifyAlbum>,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

// YouTube payloads

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    #[serde(rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentDetails {
    pub duration: String,
}

// Matching model

/// Metadata of the Spotify track we are looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
}

impl TrackQuery {
    pub fn search_terms(&self) -> String {
        format!("{} {} {} Official Audio", self.name, self.album, self.artist)
    }
}

impl From<SpotifyTrack> for TrackQuery {
    fn from(track: SpotifyTrack) -> Self {
        TrackQuery {
            name: track.name.unwrap_or_default(),
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            album: track.album.map(|a| a.name).unwrap_or_default(),
            duration_ms: track.duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
}

impl From<SearchItem> for SearchCandidate {
    fn from(item: SearchItem) -> Self {
        SearchCandidate {
            video_id: item.id.video_id,
            title: item.snippet.title,
            channel_title: item.snippet.channel_title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: SearchCandidate,
    pub duration_ms: u64,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Video(String),
    /// The search returned no candidates; stands in for [`PLACEHOLDER_VIDEO_ID`].
    Placeholder,
    /// Every credential in the pool was rejected.
    Exhausted,
}

impl MatchResult {
    pub fn video_id(&self) -> Option<&str> {
        match self {
            MatchResult::Video(id) => Some(id),
            MatchResult::Placeholder => Some(PLACEHOLDER_VIDEO_ID),
            MatchResult::Exhausted => None,
        }
    }

    pub fn watch_url(&self) -> Option<String> {
        self.video_id().map(|id| format!("{YOUTUBE_WATCH_URL}{id}"))
    }
}

/// A playlist entry that survived validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTrack {
    pub track_id: String,
    pub query: TrackQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Resolved(MatchResult),
    Failed(String),
}

pub const EXHAUSTED_MARKER: &str = "API Limit Exceeded for all YouTube API Keys";

impl TrackOutcome {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, TrackOutcome::Resolved(MatchResult::Exhausted))
    }

    /// The string placed in the playlist output for this entry.
    pub fn display_url(&self) -> String {
        match self {
            TrackOutcome::Resolved(result) => result
                .watch_url()
                .unwrap_or_else(|| EXHAUSTED_MARKER.to_string()),
            TrackOutcome::Failed(msg) => format!("Error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsCounters {
    #[serde(rename = "ISOtotalCalls", default)]
    pub iso_total_calls: i64,
    #[serde(rename = "MESOtotalCalls", default)]
    pub meso_total_calls: i64,
    #[serde(rename = "MESOsongsConverted", default)]
    pub meso_songs_converted: i64,
    #[serde(rename = "MESOplaylistsConverted", default)]
    pub meso_playlists_converted: i64,
}

impl AnalyticsCounters {
    pub fn song() -> Self {
        Self::conversion(1, 0)
    }

    pub fn playlist(songs: usize) -> Self {
        Self::conversion(songs as i64, 1)
    }

    fn conversion(songs: i64, playlists: i64) -> Self {
        AnalyticsCounters {
            iso_total_calls: 5 * songs,
            meso_total_calls: 1,
            meso_songs_converted: songs,
            meso_playlists_converted: playlists,
        }
    }

    pub fn add(&mut self, delta: &AnalyticsCounters) {
        self.iso_total_calls += delta.iso_total_calls;
        self.meso_total_calls += delta.meso_total_calls;
        self.meso_songs_converted += delta.meso_songs_converted;
        self.meso_playlists_converted += delta.meso_playlists_converted;
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub position: usize,
    pub track_id: String,
    pub youtube: String,
}

#[derive(Tabled)]
pub struct AnalyticsTableRow {
    pub counter: String,
    pub value: i64,
}
