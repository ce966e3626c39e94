//! Human-readable durations for the view layer.

/// Renders seconds as `"{h}h{m}m{s}s"`, dropping leading zero units.
///
/// Seconds are rounded half-to-even first; anything that rounds to zero
/// renders as `"..."`. `negative` prefixes a `-` (the "time away" readout).
#[uniffi::export]
pub fn format_duration(seconds: f64, negative: bool) -> String {
    if !seconds.is_finite() {
        return "...".to_string();
    }

    let rounded = seconds.abs().round_ties_even() as u64;
    if rounded == 0 {
        return "...".to_string();
    }

    let sign = if negative || seconds < 0.0 { "-" } else { "" };
    let hours = rounded / 3600;
    let minutes = (rounded % 3600) / 60;
    let secs = rounded % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}
