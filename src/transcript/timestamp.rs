/*!
 * Playback timestamp formatting.
 */

/// Format seconds as `M:SS`, or `H:MM:SS` once an hour is reached.
///
/// Each unit is floored. Input must be finite and non-negative.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Parse `SS`, `M:SS` or `H:MM:SS` (seconds may be fractional) into seconds
pub fn parse_timestamp(timestamp: &str) -> Option<f64> {
    let parts: Vec<&str> = timestamp.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let (last, leading) = parts.split_last()?;
    let seconds: f64 = last.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 || (!leading.is_empty() && seconds >= 60.0) {
        return None;
    }

    let mut total = 0.0;
    for (i, part) in leading.iter().enumerate() {
        let value: u64 = part.parse().ok()?;
        // minutes are bounded only when an hour field precedes them
        if leading.len() == 2 && i == 1 && value >= 60 {
            return None;
        }
        total = total * 60.0 + value as f64;
    }

    Some(total * 60.0 + seconds)
}
