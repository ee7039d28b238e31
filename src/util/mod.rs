/// Wall-clock milliseconds from the browser (`Date.now()`).
pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Date part of an ISO-8601 timestamp, e.g. `2025-01-02T10:00:00Z` -> `2025-01-02`.
///
/// Timestamps are opaque to the client; anything that does not look like ISO
/// is returned unchanged.
pub(crate) fn display_date(ts: &str) -> String {
    let ts = ts.trim();
    match ts.split_once('T') {
        Some((date, _)) if date.len() == 10 => date.to_string(),
        _ => ts.to_string(),
    }
}
