//! Human-readable duration strings.

/// Formats seconds as minutes below one hour and as hours above.
///
/// ```
/// use chatstats::stats::duration::format_duration;
///
/// assert_eq!(format_duration(90.0), "1.5 min");
/// assert_eq!(format_duration(5400.0), "1.5 hs");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs < 3600.0 {
        format!("{:.1} min", secs / 60.0)
    } else {
        format!("{:.1} hs", secs / 3600.0)
    }
}

/// Formats whole seconds as `H:MM:SS`, prefixed by a day count when longer
/// than a day (`"2 days, 3:04:05"`).
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
