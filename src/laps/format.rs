/// Formats a time in seconds as `M:SS.mmm`.
///
/// The value is rounded to whole milliseconds before it is split into fields,
/// so a carry never produces a four-digit millisecond part.
pub fn format_lap_time(total_seconds: f64) -> String {
    if !total_seconds.is_finite() {
        return "-:--.---".to_string();
    }

    let sign = if total_seconds < 0. { "-" } else { "" };
    let total_ms = (total_seconds.abs() * 1000.).round() as u64;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;

    format!("{sign}{minutes}:{seconds:02}.{milliseconds:03}")
}
