/// Culture-invariant date-time parsing and rendering
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::{LenientError, Result};

/// Rendering used for the string form of a date-time value
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Date-time layouts with the year first, e.g. `2022-05-16 08:30:00`
const YEAR_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts with the year first
const YEAR_FIRST_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Date-time layouts with the day first, e.g. `16/05/2022 08:30`
const DAY_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
];

/// Date-only layouts with the day first
const DAY_FIRST_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"];

/// Date-time layouts with an English month name. `%B` also accepts the
/// abbreviated name and `%A` the abbreviated weekday.
const NAMED_MONTH_DATETIME_FORMATS: &[&str] = &[
    "%d %B %Y %H:%M:%S%.f",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S%.f",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M:%S%.f",
    "%A, %d %B %Y %H:%M:%S%.f",
    "%A, %d %B %Y %H:%M",
    "%A, %B %d, %Y %H:%M:%S%.f",
];

/// Date-only layouts with an English month name
const NAMED_MONTH_DATE_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
    "%A, %B %d, %Y",
];

const DATE_SEPARATORS: [u8; 3] = [b'-', b'/', b'.'];

/// Parse a date-time string without consulting the host locale.
///
/// RFC 3339 and RFC 2822 strings carry an offset and are converted to UTC.
/// Date-only strings resolve to midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.naive_utc());
    }

    if has_leading_year(trimmed)
        && let Some(dt) = parse_with(trimmed, YEAR_FIRST_DATETIME_FORMATS, YEAR_FIRST_DATE_FORMATS)
    {
        return Ok(dt);
    }

    if has_trailing_year(trimmed)
        && let Some(dt) = parse_with(trimmed, DAY_FIRST_DATETIME_FORMATS, DAY_FIRST_DATE_FORMATS)
    {
        return Ok(dt);
    }

    if trimmed.bytes().any(|b| b.is_ascii_alphabetic())
        && let Some(dt) = candidates(trimmed, NAMED_MONTH_DATETIME_FORMATS, NAMED_MONTH_DATE_FORMATS)
            .find(|dt| trimmed.contains(&format!("{:04}", dt.year())))
    {
        return Ok(dt);
    }

    Err(LenientError::TypeConversion(format!("Invalid date-time value: {trimmed}")))
}

fn parse_with(
    s: &str,
    datetime_formats: &'static [&'static str],
    date_formats: &'static [&'static str],
) -> Option<NaiveDateTime> {
    candidates(s, datetime_formats, date_formats).next()
}

/// Every reading of `s` under the given layouts, date-time layouts first.
/// A lone `%Y` also consumes short years, so callers without a positional
/// year guard check the result.
fn candidates<'a>(
    s: &'a str,
    datetime_formats: &'static [&'static str],
    date_formats: &'static [&'static str],
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    let datetimes = datetime_formats
        .iter()
        .filter_map(move |format| NaiveDateTime::parse_from_str(s, format).ok());
    let dates = date_formats
        .iter()
        .filter_map(move |format| NaiveDate::parse_from_str(s, format).ok())
        .filter_map(|date| date.and_hms_opt(0, 0, 0));
    datetimes.chain(dates)
}

/// `YYYY` followed by a date separator
fn has_leading_year(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() > 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && DATE_SEPARATORS.contains(&bytes[4])
}

/// Date part ends in a date separator followed by `YYYY`
fn has_trailing_year(s: &str) -> bool {
    let date_part = s.split([' ', 'T']).next().unwrap_or(s).as_bytes();
    let len = date_part.len();
    len > 4
        && date_part[len - 4..].iter().all(u8::is_ascii_digit)
        && DATE_SEPARATORS.contains(&date_part[len - 5])
}

/// Format a date-time as its string form, `YYYY-MM-DD HH:MM:SS[.fraction]`
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}
