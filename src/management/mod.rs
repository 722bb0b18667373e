mod analytics;
mod playlist;

pub use analytics::AnalyticsSink;
pub use analytics::AnalyticsStore;
pub use analytics::JsonDocumentStore;
pub use playlist::PlaylistResolver;
pub use playlist::PlaylistUrlMap;
pub use playlist::valid_tracks;
