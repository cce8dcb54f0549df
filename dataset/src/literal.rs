//! Conversion between Rust values and the lexical forms of XSD literals.
//!
//! Deserializers never fail: a lexical form that cannot be read
//! yields `None`, as an absent value would.
//!
//! Datetimes are read by a small dedicated parser rather than by `chrono`'s,
//! because the lexical forms found in the wild include signed and extended years,
//! fractional seconds of any length and out-of-range fields (e.g. `24:00:00`),
//! which are normalized the way a calendar would roll them over.
use chrono::{DateTime, Datelike, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATETIME: Regex = Regex::new(
        r"(?x)
        ^ ([-+])? (\d{4,}) - (\d\d) - (\d\d)
        T (\d\d) : (\d\d) : (\d\d) (?: \. (\d+) )?
        ( Z | [-+]\d\d:\d\d )? $"
    )
    .unwrap();
    static ref DECIMAL_PREFIX: Regex =
        Regex::new(r"^[-+]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)").unwrap();
    static ref INTEGER_PREFIX: Regex = Regex::new(r"^[-+]?\d+").unwrap();
}

const MS_PER_DAY: i64 = 86_400_000;

/// `true` → `"true"`, `false` → `"false"`.
pub fn serialize_boolean(value: bool) -> String {
    value.to_string()
}

/// `"true"` and `"1"` are true, `"false"` and `"0"` are false, anything else is `None`.
pub fn deserialize_boolean(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Serialize `value` in UTC with millisecond precision,
/// e.g. `2020-01-01T00:00:00.000Z`.
///
/// Years outside `0..=9999` are written with a sign and six digits.
pub fn serialize_datetime(value: &DateTime<Utc>) -> String {
    let year = value.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}", year.unsigned_abs())
    };
    format!(
        "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        value.month(),
        value.day(),
        value.hour(),
        value.minute(),
        value.second(),
        value.timestamp_subsec_millis().min(999),
    )
}

/// Parse an `xsd:dateTime` lexical form into a UTC instant.
///
/// A timezone offset is subtracted from the local time
/// (`12:00:00+02:00` is `10:00:00Z`); a missing timezone means UTC.
/// Fractional seconds are kept to the millisecond.
/// Fields out of their usual range roll over into the next larger one.
pub fn deserialize_datetime(value: &str) -> Option<DateTime<Utc>> {
    let c = DATETIME.captures(value)?;
    let field = |i: usize| -> Option<i64> { c.get(i)?.as_str().parse().ok() };
    let sign = if c.get(1).is_some_and(|m| m.as_str() == "-") {
        -1
    } else {
        1
    };
    let year = sign * field(2)?;
    let month = field(3)? - 1;
    let day = field(4)?;
    let (offset_hours, offset_minutes) = match c.get(9).map(|m| m.as_str()) {
        None | Some("Z") => (0, 0),
        Some(tz) => {
            let sign = if tz.starts_with('-') { -1 } else { 1 };
            let hours: i64 = tz[1..3].parse().ok()?;
            let minutes: i64 = tz[4..6].parse().ok()?;
            (sign * hours, sign * minutes)
        }
    };
    let hours = field(5)? - offset_hours;
    let minutes = field(6)? - offset_minutes;
    let seconds = field(7)?;
    let millis = c.get(8).map(|m| fraction_to_millis(m.as_str())).unwrap_or(0);

    let year = year.checked_add(month.div_euclid(12))?;
    let month = month.rem_euclid(12) + 1;
    let days = days_from_civil(year, month, 1)? + day - 1;
    let timestamp = days
        .checked_mul(MS_PER_DAY)?
        .checked_add(hours * 3_600_000 + minutes * 60_000 + seconds * 1000 + millis)?;
    DateTime::from_timestamp_millis(timestamp)
}

/// The first three digits of a fraction of a second, as milliseconds.
fn fraction_to_millis(fraction: &str) -> i64 {
    fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(3)
        .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0) as i64)
}

/// Number of days between 1970-01-01 and the given date of the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: i64, day: i64) -> Option<i64> {
    let y = if month <= 2 { year.checked_sub(1)? } else { year };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era.checked_mul(146_097)?.checked_add(doe - 719_468)
}

/// Shortest decimal representation of `value`.
pub fn serialize_decimal(value: f64) -> String {
    value.to_string()
}

/// Read the longest numeric prefix of `value` (after leading whitespace),
/// so that `"3.5 apples"` is `3.5`; `None` if there is none.
pub fn deserialize_decimal(value: &str) -> Option<f64> {
    let prefix = DECIMAL_PREFIX.find(value.trim_start())?;
    prefix.as_str().parse().ok()
}

/// Decimal representation of `value`.
pub fn serialize_integer(value: i64) -> String {
    value.to_string()
}

/// Read the longest integer prefix of `value` (after leading whitespace),
/// so that `"42.7"` is `42`; `None` if there is none or it overflows.
pub fn deserialize_integer(value: &str) -> Option<i64> {
    let prefix = INTEGER_PREFIX.find(value.trim_start())?;
    prefix.as_str().parse().ok()
}
