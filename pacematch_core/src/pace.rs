//! Pace string parsing and formatting.
//!
//! Paces are entered by coaches as "mm:ss" per kilometre. Parsing is lenient:
//! anything that doesn't look like a pace falls back to 5:00/km so one bad
//! string never aborts a whole metrics computation.

/// Fallback pace in seconds per km (5:00/km)
pub const DEFAULT_PACE_SECONDS: u32 = 300;

/// Parse a "minutes:seconds" pace string into total seconds
///
/// Malformed input (empty, missing colon, non-numeric parts) yields
/// [`DEFAULT_PACE_SECONDS`]. Use [`try_parse_pace`] when strictness matters.
pub fn parse_pace(pace: &str) -> u32 {
    try_parse_pace(pace).unwrap_or_else(|| {
        tracing::warn!(
            "Unparsable pace {:?}, assuming {}",
            pace,
            format_pace(DEFAULT_PACE_SECONDS)
        );
        DEFAULT_PACE_SECONDS
    })
}

/// Strict variant of [`parse_pace`]: `None` for anything malformed
pub fn try_parse_pace(pace: &str) -> Option<u32> {
    let (minutes, seconds) = pace.trim().split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Render seconds as "m:ss"
pub fn format_pace(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
