//! RFC 3339 timestamp parsing and formatting.
//!
//! Timestamps are held as microseconds since the Unix epoch (UTC) plus the
//! UTC offset, in minutes, that the wire string was written with. Keeping
//! the offset lets a decoded timestamp be written back in its original form.

use thiserror::Error;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// Error for a string that is not an RFC 3339 date-time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid RFC 3339 date-time {input:?}: {reason}")]
pub struct DateTimeParseError {
    pub input: String,
    pub reason: &'static str,
}

fn fail(input: &str, reason: &'static str) -> DateTimeParseError {
    DateTimeParseError {
        input: input.to_string(),
        reason,
    }
}

/// Reads a fixed-width run of ASCII digits.
fn digits(bytes: &[u8], start: usize, len: usize) -> Option<i64> {
    let run = bytes.get(start..start + len)?;
    run.iter().try_fold(0i64, |acc, b| {
        b.is_ascii_digit().then(|| acc * 10 + i64::from(b - b'0'))
    })
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date (Howard Hinnant).
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Parses `Z`, `+HH:MM` or `-HH:MM` into signed minutes.
fn parse_offset(input: &str, tail: &[u8]) -> Result<i16, DateTimeParseError> {
    match tail {
        b"Z" | b"z" => Ok(0),
        [sign @ (b'+' | b'-'), _, _, b':', _, _] => {
            let hours = digits(tail, 1, 2).ok_or_else(|| fail(input, "bad offset hours"))?;
            let minutes = digits(tail, 4, 2).ok_or_else(|| fail(input, "bad offset minutes"))?;
            if hours > 24 || minutes > 59 || (hours == 24 && minutes != 0) {
                return Err(fail(input, "offset out of range"));
            }
            let total = (hours * 60 + minutes) as i16;
            Ok(if *sign == b'-' { -total } else { total })
        }
        _ => Err(fail(input, "missing or malformed offset")),
    }
}

/// Parses an RFC 3339 date-time into `(epoch_micros, offset_min)`.
///
/// A missing offset is read as UTC. Fractional seconds beyond microsecond
/// precision are truncated.
pub fn parse_datetime_rfc3339(input: &str) -> Result<(i64, i16), DateTimeParseError> {
    let bytes = input.as_bytes();
    if bytes.len() < 19 {
        return Err(fail(input, "too short"));
    }
    if bytes[4] != b'-' || bytes[7] != b'-' || bytes[13] != b':' || bytes[16] != b':' {
        return Err(fail(input, "bad separators"));
    }
    if !matches!(bytes[10], b'T' | b't' | b' ') {
        return Err(fail(input, "missing date/time separator"));
    }

    let year = digits(bytes, 0, 4).ok_or_else(|| fail(input, "bad year"))?;
    let month = digits(bytes, 5, 2).ok_or_else(|| fail(input, "bad month"))?;
    let day = digits(bytes, 8, 2).ok_or_else(|| fail(input, "bad day"))?;
    let hour = digits(bytes, 11, 2).ok_or_else(|| fail(input, "bad hour"))?;
    let minute = digits(bytes, 14, 2).ok_or_else(|| fail(input, "bad minute"))?;
    let second = digits(bytes, 17, 2).ok_or_else(|| fail(input, "bad second"))?;

    if !(1..=12).contains(&month) {
        return Err(fail(input, "month out of range"));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(fail(input, "day out of range"));
    }
    if hour > 23 || minute > 59 || second > 59 {
        return Err(fail(input, "time out of range"));
    }

    let mut rest = &bytes[19..];
    let mut micros = 0i64;
    if let Some((b'.', frac)) = rest.split_first() {
        let len = frac.iter().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return Err(fail(input, "empty fraction"));
        }
        for (i, b) in frac[..len].iter().take(6).enumerate() {
            micros += i64::from(b - b'0') * 10i64.pow(5 - i as u32);
        }
        rest = &frac[len..];
    }
    let offset_min = if rest.is_empty() { 0 } else { parse_offset(input, rest)? };

    let local = days_from_civil(year, month, day) * MICROS_PER_DAY
        + hour * MICROS_PER_HOUR
        + minute * MICROS_PER_MINUTE
        + second * MICROS_PER_SECOND
        + micros;
    Ok((local - i64::from(offset_min) * MICROS_PER_MINUTE, offset_min))
}

/// Formats `(epoch_micros, offset_min)` as an RFC 3339 date-time.
///
/// Fractional seconds are written only when non-zero, with trailing zeros
/// trimmed; a zero offset is written as `Z`.
pub fn format_datetime_rfc3339(epoch_micros: i64, offset_min: i16) -> String {
    let local = epoch_micros + i64::from(offset_min) * MICROS_PER_MINUTE;
    let days = local.div_euclid(MICROS_PER_DAY);
    let time = local.rem_euclid(MICROS_PER_DAY);
    let (year, month, day) = civil_from_days(days);

    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time / MICROS_PER_HOUR,
        time % MICROS_PER_HOUR / MICROS_PER_MINUTE,
        time % MICROS_PER_MINUTE / MICROS_PER_SECOND,
    );

    let micros = time % MICROS_PER_SECOND;
    if micros != 0 {
        let frac = format!("{micros:06}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    if offset_min == 0 {
        out.push('Z');
    } else {
        let sign = if offset_min < 0 { '-' } else { '+' };
        let abs = offset_min.unsigned_abs();
        out.push_str(&format!("{sign}{:02}:{:02}", abs / 60, abs % 60));
    }
    out
}
