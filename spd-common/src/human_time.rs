//! Human-readable duration formatting
//!
//! Provides consistent duration display across the dashboard: estimated
//! recording lengths are shown as `M:SS` below one hour and `H:MM:SS` above.

/// Seconds threshold above which the hour field is shown
const HOUR_FORMAT_MIN: u64 = 3600;

/// Format a duration in seconds for display.
///
/// Fractional seconds are rounded to the nearest whole second. Negative or
/// non-finite inputs (possible with a zero-size estimate) render as `0:00`.
///
/// # Examples
///
/// ```
/// use spd_common::human_time::format_duration_secs;
///
/// assert_eq!(format_duration_secs(45.0), "0:45");
/// assert_eq!(format_duration_secs(120.0), "2:00");
/// assert_eq!(format_duration_secs(3661.0), "1:01:01");
/// assert_eq!(format_duration_secs(-5.0), "0:00");
/// ```
pub fn format_duration_secs(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if total >= HOUR_FORMAT_MIN {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
