//! The fixed template function set: calendar formatting, epoch-millisecond
//! conversion, integer addition, and the countdown-to-deadline formatter.

use chrono::{DateTime, Local, TimeZone};
use minijinja::{Error, ErrorKind};

/// `date_format(datetime, pattern)` — format an RFC 3339 timestamp with a
/// strftime pattern, in local time.
pub fn date_format(value: String, pattern: String) -> Result<String, Error> {
    let parsed = DateTime::parse_from_rfc3339(&value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid datetime {value:?}: {e}"),
        )
    })?;
    Ok(parsed.with_timezone(&Local).format(&pattern).to_string())
}

/// `timestamp_format(epoch_ms, pattern)` — milliseconds since epoch to local
/// calendar time, then format.
pub fn timestamp_format(epoch_ms: i64, pattern: String) -> Result<String, Error> {
    Ok(local_time(epoch_ms)?.format(&pattern).to_string())
}

/// `intplus(input, n)` — integer addition for template arithmetic.
pub fn intplus(input: i64, n: i64) -> i64 {
    input + n
}

/// `begin_end_format(begin_ms, end_ms)` — countdown relative to the current
/// wall clock. See [`countdown_at`].
pub fn begin_end_format(begin_ms: i64, end_ms: i64) -> Result<String, Error> {
    let begin = local_time(begin_ms)?;
    let end = local_time(end_ms)?;
    Ok(countdown_at(begin, end, Local::now()))
}

/// Human-readable countdown between a begin/end window, evaluated at `now`:
///
/// - before the window: `开始时间：` + begin as `%Y-%m-%d %H:%M`
/// - inside the window: remaining whole days/hours as `{d}天{h}小时后结束`,
///   zero segments omitted. A remainder under an hour still reads as one
///   hour — never "ends in 0".
/// - after the window: `结束时间：` + end as `%Y-%m-%d %H:%M`
pub fn countdown_at(
    begin: DateTime<Local>,
    end: DateTime<Local>,
    now: DateTime<Local>,
) -> String {
    let now_s = now.timestamp();
    let begin_s = begin.timestamp();
    let end_s = end.timestamp();

    if now_s < begin_s {
        return format!("开始时间：{}", begin.format("%Y-%m-%d %H:%M"));
    }
    if now_s <= end_s {
        let remaining = end_s - now_s;
        let days = remaining / 86400;
        let mut hours = remaining % 86400 / 3600;
        if days == 0 && hours == 0 {
            hours = 1;
        }
        let mut out = String::new();
        if days > 0 {
            out.push_str(&format!("{days}天"));
        }
        if hours > 0 {
            out.push_str(&format!("{hours}小时"));
        }
        out.push_str("后结束");
        return out;
    }
    format!("结束时间：{}", end.format("%Y-%m-%d %H:%M"))
}

fn local_time(epoch_ms: i64) -> Result<DateTime<Local>, Error> {
    Local
        .timestamp_opt(epoch_ms / 1000, 0)
        .single()
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("epoch milliseconds {epoch_ms} out of range"),
            )
        })
}
