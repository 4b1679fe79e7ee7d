use crate::errors::SequenceError;

// @module: Timestamp parsing and frame conversion

/// Parse an SRT timestamp (HH:MM:SS,mmm) into seconds.
///
/// A period is accepted in place of the comma before the millisecond
/// field, since both appear in the wild. Anything else is rejected.
pub fn parse_subtitle_time(timestamp: &str) -> Result<f64, SequenceError> {
    let fields: Vec<&str> = timestamp.trim().split(':').collect();
    if fields.len() != 3 {
        return Err(SequenceError::Format(format!(
            "expected HH:MM:SS,mmm, got '{}'",
            timestamp
        )));
    }

    let hours: u64 = fields[0]
        .parse()
        .map_err(|_| SequenceError::Format(format!("non-numeric hours in '{}'", timestamp)))?;
    let minutes: u64 = fields[1]
        .parse()
        .map_err(|_| SequenceError::Format(format!("non-numeric minutes in '{}'", timestamp)))?;

    let seconds: f64 = fields[2]
        .replace(',', ".")
        .parse()
        .map_err(|_| SequenceError::Format(format!("non-numeric seconds in '{}'", timestamp)))?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Parse a marker timestamp leniently.
///
/// Markers carry their time either as a colon-delimited clock value
/// (comma or period before the milliseconds) or as a bare number of
/// seconds. The colon form is tried first; if both forms fail the
/// marker is unusable and `None` is returned so the caller can skip it
/// without aborting the run.
pub fn parse_marker_time(value: &str) -> Option<f64> {
    let value = value.trim();

    if value.contains(':') {
        // The seconds field parses as f64, so "nan"/"inf" sneak through
        // the clock form and have to be rejected here as well
        if let Some(seconds) = parse_subtitle_time(value).ok().filter(|s| s.is_finite()) {
            return Some(seconds);
        }
    }

    value.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Format seconds back into an SRT timestamp (HH:MM:SS,mmm).
///
/// Round-trips `parse_subtitle_time` at millisecond resolution.
pub fn format_subtitle_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Convert seconds to a frame count at the given rate.
///
/// Frames are the floor of `seconds * fps`, matching how editing
/// software addresses a fixed-rate timeline.
pub fn seconds_to_frames(seconds: f64, fps: u32) -> u64 {
    (seconds * fps as f64).floor().max(0.0) as u64
}
