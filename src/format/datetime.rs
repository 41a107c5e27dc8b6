//! Standard and custom date-time format strings, invariant culture.
//!
//! A single character is a standard specifier and expands to a custom
//! pattern; anything longer is a custom pattern (`yyyy-MM-dd HH:mm`).
//! Values carry no offset and are rendered as UTC.
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Longest run of `f` or `F` a pattern may contain
const MAX_FRACTION_DIGITS: usize = 7;

fn standard_pattern(letter: char) -> Option<&'static str> {
    let pattern = match letter {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' | 'U' => "dddd, dd MMMM yyyy HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'm' | 'M' => "MMMM dd",
        'o' | 'O' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffff",
        'r' | 'R' => "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'",
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        'y' | 'Y' => "yyyy MMMM",
        _ => return None,
    };
    Some(pattern)
}

/// Render `dt` with a standard or custom specifier. `None` means an unknown
/// standard letter or a malformed custom pattern.
pub(crate) fn format_datetime(dt: &NaiveDateTime, specifier: &str) -> Option<String> {
    let mut chars = specifier.chars();
    let pattern = match (chars.next(), chars.next()) {
        (Some(letter), None) => standard_pattern(letter)?,
        _ => specifier,
    };
    format_custom(dt, pattern)
}

fn push_padded(out: &mut String, value: impl std::fmt::Display, width: usize) {
    out.push_str(&format!("{value:0>width$}"));
}

fn format_custom(dt: &NaiveDateTime, pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let run = chars[i..].iter().take_while(|&&c| c == ch).count();
        let mut consumed = run;

        match ch {
            'd' => match run {
                1 | 2 => push_padded(&mut out, dt.day(), run),
                3 => out.push_str(&dt.format("%a").to_string()),
                _ => out.push_str(&dt.format("%A").to_string()),
            },
            'M' => match run {
                1 | 2 => push_padded(&mut out, dt.month(), run),
                3 => out.push_str(&dt.format("%b").to_string()),
                _ => out.push_str(&dt.format("%B").to_string()),
            },
            'y' => match run {
                1 | 2 => push_padded(&mut out, dt.year().rem_euclid(100), run),
                _ => push_padded(&mut out, dt.year(), run),
            },
            'h' => {
                let hour = match dt.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                push_padded(&mut out, hour, run.min(2));
            }
            'H' => push_padded(&mut out, dt.hour(), run.min(2)),
            'm' => push_padded(&mut out, dt.minute(), run.min(2)),
            's' => push_padded(&mut out, dt.second(), run.min(2)),
            'f' | 'F' => {
                if run > MAX_FRACTION_DIGITS {
                    return None;
                }
                let ticks = format!("{:07}", dt.nanosecond() % 1_000_000_000 / 100);
                let digits = &ticks[..run];
                if ch == 'f' {
                    out.push_str(digits);
                } else {
                    let trimmed = digits.trim_end_matches('0');
                    if trimmed.is_empty() {
                        // an all-zero optional fraction also drops its point
                        if out.ends_with('.') {
                            out.pop();
                        }
                    } else {
                        out.push_str(trimmed);
                    }
                }
            }
            't' => {
                let designator = if dt.hour() < 12 { "AM" } else { "PM" };
                out.push_str(if run == 1 { &designator[..1] } else { designator });
            }
            'g' => out.push_str("A.D."),
            'z' => out.push_str(match run {
                1 => "+0",
                2 => "+00",
                _ => "+00:00",
            }),
            'K' => {}
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|&c| c == ch)?;
                out.extend(&chars[i + 1..i + 1 + close]);
                consumed = close + 2;
            }
            '\\' => {
                out.push(*chars.get(i + 1)?);
                consumed = 2;
            }
            '%' => {
                // `%d` is the single custom specifier `d`
                if chars.get(i + 1).is_none_or(|&c| c == '%') {
                    return None;
                }
                consumed = 1;
            }
            other => {
                out.push(other);
                consumed = 1;
            }
        }
        i += consumed;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 5, 6)
            .unwrap()
            .and_hms_milli_opt(14, 3, 9, 250)
            .unwrap()
    }

    #[test]
    fn test_standard_patterns() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, "d").unwrap(), "05/06/2022");
        assert_eq!(format_datetime(&dt, "D").unwrap(), "Friday, 06 May 2022");
        assert_eq!(format_datetime(&dt, "g").unwrap(), "05/06/2022 14:03");
        assert_eq!(format_datetime(&dt, "M").unwrap(), "May 06");
        assert_eq!(format_datetime(&dt, "o").unwrap(), "2022-05-06T14:03:09.2500000");
        assert_eq!(format_datetime(&dt, "R").unwrap(), "Fri, 06 May 2022 14:03:09 GMT");
        assert_eq!(format_datetime(&dt, "s").unwrap(), "2022-05-06T14:03:09");
        assert_eq!(format_datetime(&dt, "u").unwrap(), "2022-05-06 14:03:09Z");
        assert_eq!(format_datetime(&dt, "T").unwrap(), "14:03:09");
        assert_eq!(format_datetime(&dt, "y").unwrap(), "2022 May");
        assert!(format_datetime(&dt, "q").is_none());
    }

    #[test]
    fn test_custom_patterns() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, "yyyy-MM-dd").unwrap(), "2022-05-06");
        assert_eq!(format_datetime(&dt, "d/M/yy h:mm tt").unwrap(), "6/5/22 2:03 PM");
        assert_eq!(format_datetime(&dt, "ddd dd MMM").unwrap(), "Fri 06 May");
        assert_eq!(format_datetime(&dt, "HH:mm:ss.fff").unwrap(), "14:03:09.250");
        assert_eq!(format_datetime(&dt, "ss.FFFF").unwrap(), "09.25");
        assert_eq!(format_datetime(&dt, "'Day' d").unwrap(), "Day 6");
        assert_eq!(format_datetime(&dt, "%d").unwrap(), "6");
        assert_eq!(format_datetime(&dt, "\\yyyyy").unwrap(), "y2022");
    }

    #[test]
    fn test_optional_fraction_drops_point() {
        let dt = NaiveDate::from_ymd_opt(2022, 5, 6).unwrap().and_hms_opt(14, 3, 9).unwrap();
        assert_eq!(format_datetime(&dt, "HH:mm:ss.FFF").unwrap(), "14:03:09");
    }

    #[test]
    fn test_malformed_patterns() {
        let dt = sample();
        assert!(format_datetime(&dt, "ffffffff").is_none());
        assert!(format_datetime(&dt, "yyyy 'open").is_none());
        assert!(format_datetime(&dt, "yyyy\\").is_none());
        assert!(format_datetime(&dt, "dd%").is_none());
    }
}
