use chrono::{DateTime, Local, TimeDelta, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Wall-clock time in the user's timezone, minute precision.
#[must_use]
pub fn format_local_time(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Compact elapsed time: `45 秒`, `3 分 05 秒`, `1 小时 02 分`. Negative spans read as zero.
#[must_use]
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{hours} 小时 {minutes:02} 分")
    } else if minutes > 0 {
        format!("{minutes} 分 {seconds:02} 秒")
    } else {
        format!("{seconds} 秒")
    }
}
