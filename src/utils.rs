use reqwest::{Client, header};

use crate::{
    config::HttpConfig,
    error::{DurationError, SyncError},
};

const HOUR_MS: u64 = 3_600_000;
const MINUTE_MS: u64 = 60_000;
const SECOND_MS: u64 = 1_000;

/// Converts a YouTube `contentDetails.duration` value (`PT#H#M#S`) into
/// milliseconds.
///
/// Only the presence of the `H`, `M` and `S` designators is inspected; each
/// number is read between the designator before it (or `T`) and its own
/// designator. A string without any designator yields `0`.
///
/// # Errors
///
/// Returns [`DurationError`] when a component is not a number or the
/// designators appear out of order.
///
/// # Example
///
/// ```
/// assert_eq!(parse_iso_duration("PT3M25S").unwrap(), 205_000);
/// ```
pub fn parse_iso_duration(duration: &str) -> Result<u64, DurationError> {
    let h = duration.find('H');
    let m = duration.find('M');
    let s = duration.find('S');
    let t = duration.find('T').map(|i| i + 1).unwrap_or(0);

    let num = |from: usize, to: usize| -> Result<u64, DurationError> {
        duration
            .get(from..to)
            .and_then(|digits| digits.parse::<u64>().ok())
            .ok_or_else(|| DurationError {
                input: duration.to_string(),
            })
    };

    let ms = match (h, m, s) {
        (Some(h), Some(m), Some(s)) => {
            num(t, h)? * HOUR_MS + num(h + 1, m)? * MINUTE_MS + num(m + 1, s)? * SECOND_MS
        }
        (Some(h), Some(m), None) => num(t, h)? * HOUR_MS + num(h + 1, m)? * MINUTE_MS,
        (Some(h), None, Some(s)) => num(t, h)? * HOUR_MS + num(h + 1, s)? * SECOND_MS,
        (None, Some(m), Some(s)) => num(t, m)? * MINUTE_MS + num(m + 1, s)? * SECOND_MS,
        (Some(h), None, None) => num(t, h)? * HOUR_MS,
        (None, Some(m), None) => num(t, m)? * MINUTE_MS,
        (None, None, Some(s)) => num(t, s)? * SECOND_MS,
        (None, None, None) => 0,
    };

    Ok(ms)
}

/// Absolute distance between two durations in milliseconds.
pub fn duration_gap(a: u64, b: u64) -> u64 {
    a.abs_diff(b)
}

/// Reads a caller supplied identifier, treating the literal `"null"` the way
/// the web front end sends an empty field.
pub fn normalize_id(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() && id != "null" => Some(id.to_string()),
        _ => None,
    }
}

/// Builds the connection-pooled HTTP client every outbound call shares.
pub fn http_client(http: &HttpConfig) -> Result<Client, SyncError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .default_headers(headers)
        .timeout(http.timeout)
        .connect_timeout(http.connect_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SyncError::Http(format!("build client: {e}")))
}
