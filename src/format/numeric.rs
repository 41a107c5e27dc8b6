//! Standard and custom numeric format strings, invariant culture.
//!
//! A specifier that is one ASCII letter followed by at most two digits is a
//! standard specifier (`F2`, `N`, `E3`); any other string is a custom
//! pattern built from `0`, `#`, `.`, `,`, `%` and literal text.
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::iter::repeat_n;

use crate::types::DecimalHandler;
use crate::types::numeric_utils::group_digits;

/// Default fractional digits for `C`, `F`, `N` and `P`
const DEFAULT_FIXED_PRECISION: usize = 2;

/// Default fractional digits for `E`
const DEFAULT_EXPONENT_PRECISION: usize = 6;

/// Exponent from which a double's general form switches to scientific
const DOUBLE_GENERAL_PRECISION: i32 = 15;

/// Currency symbol of the invariant culture
const CURRENCY_SYMBOL: char = '\u{a4}';

#[derive(Debug, Clone, Copy)]
pub(crate) enum Number {
    Int(i32),
    Long(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    fn integer(self) -> Option<i128> {
        match self {
            Number::Int(i) => Some(i128::from(i)),
            Number::Long(l) => Some(i128::from(l)),
            Number::Float(_) | Number::Decimal(_) => None,
        }
    }

    fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Long(l) => l < 0,
            Number::Float(d) => d < 0.0,
            Number::Decimal(d) => d.is_sign_negative() && !d.is_zero(),
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Long(l) => l == 0,
            Number::Float(d) => d == 0.0,
            Number::Decimal(d) => d.is_zero(),
        }
    }

    fn abs(self) -> Number {
        match self {
            Number::Int(i) => Number::Long(i64::from(i).abs()),
            Number::Long(l) => match l.checked_abs() {
                Some(a) => Number::Long(a),
                None => Number::Decimal(Decimal::from(l).abs()),
            },
            Number::Float(d) => Number::Float(d.abs()),
            Number::Decimal(d) => Number::Decimal(d.abs()),
        }
    }

    /// Multiply by `10^places`. Integers become decimals so that scaling
    /// stays exact; results outside the decimal range degrade to a float.
    fn shifted(self, places: i32) -> Number {
        if places == 0 {
            return self;
        }

        let exact = match self {
            Number::Float(d) => return Number::Float(d * 10_f64.powi(places)),
            Number::Int(i) => Decimal::from(i),
            Number::Long(l) => Decimal::from(l),
            Number::Decimal(d) => d,
        };

        let factor = 10_i64.checked_pow(places.unsigned_abs()).map(Decimal::from);
        let shifted = factor.and_then(|f| {
            if places > 0 {
                exact.checked_mul(f)
            } else {
                exact.checked_div(f)
            }
        });

        match shifted {
            Some(d) => Number::Decimal(d),
            None => Number::Float(exact.to_f64().unwrap_or_default() * 10_f64.powi(places)),
        }
    }

    /// Fixed-point rendering with exactly `precision` fractional digits
    fn fixed(self, precision: usize) -> String {
        match self {
            Number::Int(i) => fixed_integer(i128::from(i), precision),
            Number::Long(l) => fixed_integer(i128::from(l), precision),
            Number::Float(d) => format!("{d:.precision$}"),
            Number::Decimal(d) => DecimalHandler::format_fixed(&d, precision as u32),
        }
    }

    /// Significant digits, rounded to `significant` when given
    fn digits(self, significant: Option<usize>) -> Digits {
        let plain = match self {
            Number::Float(d) => {
                let rendered = match significant {
                    Some(n) => format!("{:.*e}", n.saturating_sub(1), d),
                    None => format!("{d:e}"),
                };
                return Digits::from_scientific(&rendered);
            }
            Number::Int(i) => i.to_string(),
            Number::Long(l) => l.to_string(),
            Number::Decimal(d) => d.to_string(),
        };

        let digits = Digits::from_plain(&plain);
        match significant {
            Some(n) => digits.round_to(n.max(1)),
            None => digits,
        }
    }
}

fn fixed_integer(v: i128, precision: usize) -> String {
    if precision == 0 {
        v.to_string()
    } else {
        format!("{v}.{}", "0".repeat(precision))
    }
}

fn non_finite(d: f64) -> &'static str {
    if d.is_nan() {
        "NaN"
    } else if d > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

/// A finite number as `0.DIGITS * 10^point`, with no leading or trailing
/// zeros in `digits`. Zero has no digits.
#[derive(Debug, PartialEq)]
struct Digits {
    negative: bool,
    digits: Vec<u8>,
    point: i32,
}

impl Digits {
    /// From a plain rendering such as `-123.4500`
    fn from_plain(rendered: &str) -> Digits {
        let (negative, unsigned) = match rendered.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, rendered),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        while digits.last() == Some(&0) {
            digits.pop();
        }

        let point = if digits.is_empty() {
            0
        } else {
            int_part.len() as i32 - leading as i32
        };
        Digits { negative, digits, point }
    }

    /// From Rust's `{:e}` rendering such as `-1.2345e3`
    fn from_scientific(rendered: &str) -> Digits {
        let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered, "0"));
        let mut digits = Digits::from_plain(mantissa);
        if !digits.digits.is_empty() {
            digits.point += exponent.parse::<i32>().unwrap_or(0);
        }
        digits
    }

    /// Round half away from zero to `significant` digits
    fn round_to(mut self, significant: usize) -> Digits {
        if self.digits.len() <= significant {
            return self;
        }

        let round_up = self.digits[significant] >= 5;
        self.digits.truncate(significant);
        if round_up {
            let mut carry = true;
            for digit in self.digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.point += 1;
            }
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        self
    }

    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.digits.iter().map(|&d| char::from(b'0' + d))
    }

    fn exponent(&self) -> i32 {
        if self.digits.is_empty() { 0 } else { self.point - 1 }
    }

    /// `G`: plain notation unless the exponent reaches `threshold` or drops
    /// below -5
    fn general(&self, threshold: i32, exponent_char: char) -> String {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        if self.digits.is_empty() {
            out.push('0');
            return out;
        }

        let exponent = self.exponent();
        if exponent >= threshold || exponent < -5 {
            let mut chars = self.chars();
            out.extend(chars.next());
            if self.digits.len() > 1 {
                out.push('.');
                out.extend(chars);
            }
            push_exponent(&mut out, exponent_char, exponent, 2);
        } else if self.point <= 0 {
            out.push_str("0.");
            out.extend(repeat_n('0', self.point.unsigned_abs() as usize));
            out.extend(self.chars());
        } else {
            let point = self.point as usize;
            for (i, c) in self.chars().enumerate() {
                if i == point {
                    out.push('.');
                }
                out.push(c);
            }
            out.extend(repeat_n('0', point.saturating_sub(self.digits.len())));
        }
        out
    }
}

fn push_exponent(out: &mut String, exponent_char: char, exponent: i32, min_digits: usize) {
    out.push(exponent_char);
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&format!("{:0>min_digits$}", exponent.unsigned_abs()));
}

/// Render `number` with a standard or custom format string. `None` means a
/// standard specifier the number's type does not support.
pub(crate) fn format_number(number: Number, specifier: &str) -> Option<String> {
    match StandardSpec::parse(specifier) {
        Some(spec) => format_standard(number, &spec),
        None => Some(format_custom(number, specifier)),
    }
}

/// General rendering of a double: the shortest digits that round-trip,
/// scientific from an exponent of 15
pub(crate) fn general_double(d: f64) -> String {
    if !d.is_finite() {
        return non_finite(d).to_string();
    }
    Number::Float(d).digits(None).general(DOUBLE_GENERAL_PRECISION, 'E')
}

struct StandardSpec {
    letter: char,
    lowercase: bool,
    precision: Option<usize>,
}

impl StandardSpec {
    fn parse(specifier: &str) -> Option<Self> {
        let mut chars = specifier.chars();
        let first = chars.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }

        let digits = chars.as_str();
        if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(StandardSpec {
            letter: first.to_ascii_uppercase(),
            lowercase: first.is_ascii_lowercase(),
            precision: digits.parse().ok(),
        })
    }

    fn exponent_char(&self) -> char {
        if self.lowercase { 'e' } else { 'E' }
    }
}

fn format_standard(number: Number, spec: &StandardSpec) -> Option<String> {
    let supported = match spec.letter {
        'C' | 'E' | 'F' | 'G' | 'N' | 'P' => true,
        'D' | 'X' => number.integer().is_some(),
        'R' => matches!(number, Number::Float(_)),
        _ => false,
    };
    if !supported {
        return None;
    }

    if let Number::Float(d) = number
        && !d.is_finite()
    {
        return Some(non_finite(d).to_string());
    }

    let fixed_precision = spec.precision.unwrap_or(DEFAULT_FIXED_PRECISION);
    let rendered = match spec.letter {
        'C' => {
            let grouped = group_digits(&number.fixed(fixed_precision));
            match grouped.strip_prefix('-') {
                Some(abs) => format!("({CURRENCY_SYMBOL}{abs})"),
                None => format!("{CURRENCY_SYMBOL}{grouped}"),
            }
        }
        'D' => {
            let v = number.integer()?;
            let width = spec.precision.unwrap_or(0);
            let sign = if v < 0 { "-" } else { "" };
            format!("{sign}{:0>width$}", v.unsigned_abs())
        }
        'E' => {
            let precision = spec.precision.unwrap_or(DEFAULT_EXPONENT_PRECISION);
            exponential(number, precision, spec.exponent_char())
        }
        'F' => number.fixed(fixed_precision),
        'G' => general(number, spec.precision.filter(|&p| p > 0), spec.exponent_char()),
        'N' => group_digits(&number.fixed(fixed_precision)),
        'P' => format!("{} %", group_digits(&number.shifted(2).fixed(fixed_precision))),
        'R' => general(number, None, 'E'),
        'X' => {
            let upper = match number {
                Number::Int(i) => format!("{i:X}"),
                Number::Long(l) => format!("{l:X}"),
                Number::Float(_) | Number::Decimal(_) => return None,
            };
            let digits = if spec.lowercase { upper.to_ascii_lowercase() } else { upper };
            let width = spec.precision.unwrap_or(0);
            format!("{digits:0>width$}")
        }
        _ => return None,
    };
    Some(rendered)
}

fn general(number: Number, precision: Option<usize>, exponent_char: char) -> String {
    let threshold = match (number, precision) {
        (Number::Int(i), None) => return i.to_string(),
        (Number::Long(l), None) => return l.to_string(),
        (Number::Decimal(d), None) => return d.to_string(),
        (Number::Float(_), None) => DOUBLE_GENERAL_PRECISION,
        (_, Some(p)) => p as i32,
    };
    number.digits(precision).general(threshold, exponent_char)
}

/// `E`: one integer digit, `precision` fractional digits and an exponent of
/// at least three digits
fn exponential(number: Number, precision: usize, exponent_char: char) -> String {
    let digits = number.digits(Some(precision + 1));
    let mut chars = digits.chars().chain(std::iter::repeat('0'));

    let mut out = String::new();
    if digits.negative {
        out.push('-');
    }
    out.extend(chars.next());
    if precision > 0 {
        out.push('.');
        out.extend(chars.take(precision));
    }
    push_exponent(&mut out, exponent_char, digits.exponent(), 3);
    out
}

#[derive(Debug, PartialEq)]
enum Token {
    Literal(String),
    Digit { zero: bool },
    Point,
    Group,
    Percent,
}

/// One section of a custom numeric pattern
#[derive(Debug)]
struct CustomPattern {
    tokens: Vec<Token>,
    int_placeholders: usize,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: bool,
    /// Power of ten applied before rendering: `+2` per `%`, `-3` per
    /// scaling comma
    shift: i32,
}

impl CustomPattern {
    fn parse(section: &str) -> CustomPattern {
        let mut tokens = Vec::new();
        let mut chars = section.chars();
        let mut seen_point = false;

        while let Some(ch) = chars.next() {
            let token = match ch {
                '0' | '#' => Token::Digit { zero: ch == '0' },
                '.' if !seen_point => {
                    seen_point = true;
                    Token::Point
                }
                '.' => continue,
                ',' => Token::Group,
                '%' => Token::Percent,
                '\\' => match chars.next() {
                    Some(escaped) => Token::Literal(escaped.to_string()),
                    None => continue,
                },
                '\'' | '"' => {
                    let quoted: String = chars.by_ref().take_while(|&c| c != ch).collect();
                    Token::Literal(quoted)
                }
                other => Token::Literal(other.to_string()),
            };
            tokens.push(token);
        }

        let point_index = tokens.iter().position(|t| *t == Token::Point).unwrap_or(tokens.len());
        let (int_tokens, frac_tokens) = tokens.split_at(point_index);

        let int_digits: Vec<bool> = int_tokens
            .iter()
            .filter_map(|t| match t {
                Token::Digit { zero } => Some(*zero),
                _ => None,
            })
            .collect();
        let min_int = int_digits
            .iter()
            .position(|&zero| zero)
            .map_or(0, |first_zero| int_digits.len() - first_zero);

        let frac_digits: Vec<bool> = frac_tokens
            .iter()
            .filter_map(|t| match t {
                Token::Digit { zero } => Some(*zero),
                _ => None,
            })
            .collect();
        let min_frac = frac_digits.iter().rposition(|&zero| zero).map_or(0, |last| last + 1);

        let mut grouping = false;
        let mut scaling_commas = 0;
        let mut digits_before = 0;
        for (i, token) in int_tokens.iter().enumerate() {
            match token {
                Token::Digit { .. } => digits_before += 1,
                Token::Group if digits_before > 0 => {
                    let digit_follows = int_tokens[i + 1..]
                        .iter()
                        .any(|t| matches!(t, Token::Digit { .. }));
                    if digit_follows {
                        grouping = true;
                    } else {
                        scaling_commas += 1;
                    }
                }
                _ => {}
            }
        }
        let percents = tokens.iter().filter(|t| **t == Token::Percent).count() as i32;

        CustomPattern {
            int_placeholders: int_digits.len(),
            min_int,
            min_frac,
            max_frac: frac_digits.len(),
            grouping,
            shift: percents * 2 - scaling_commas * 3,
            tokens,
        }
    }

    fn render(&self, number: Number, signed: bool) -> String {
        let fixed = number.shifted(self.shift).fixed(self.max_frac);
        let (negative, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, fixed.as_str()),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let mut frac_end = frac_part.len();
        while frac_end > self.min_frac && frac_part.as_bytes()[frac_end - 1] == b'0' {
            frac_end -= 1;
        }
        let frac_digits = &frac_part[..frac_end];

        let int_part = int_part.trim_start_matches('0');
        let mut int_text = format!("{int_part:0>width$}", width = self.min_int);
        if self.grouping {
            int_text = group_digits(&int_text);
        }

        let mut out = String::with_capacity(int_text.len() + frac_digits.len() + 8);
        let nonzero = int_text
            .bytes()
            .chain(frac_digits.bytes())
            .any(|b| b.is_ascii_digit() && b != b'0');
        if signed && negative && nonzero {
            out.push('-');
        }

        let n = self.int_placeholders;
        let k = int_text.len();
        let mut int_index = 0;
        let mut frac_chars = frac_digits.chars();
        let mut after_point = false;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Percent => out.push('%'),
                Token::Group => {}
                Token::Point => {
                    if n == 0 {
                        out.push_str(&int_text);
                    }
                    if !frac_digits.is_empty() {
                        out.push('.');
                    }
                    after_point = true;
                }
                Token::Digit { .. } if after_point => out.extend(frac_chars.next()),
                Token::Digit { .. } => {
                    let j = int_index;
                    int_index += 1;
                    if self.grouping {
                        if j == 0 {
                            out.push_str(&int_text);
                        }
                        continue;
                    }
                    // digits align right; the first placeholder takes any overflow
                    let hi = (k + j + 1).saturating_sub(n);
                    let lo = if j == 0 { 0 } else { hi.saturating_sub(1) };
                    out.push_str(&int_text[lo..hi]);
                }
            }
        }
        out
    }
}

/// Split on `;` outside quotes and escapes, into at most three sections
fn split_sections(pattern: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\\') => escaped = true,
            (None, '\'' | '"') => quote = Some(ch),
            (None, ';') if sections.len() < 2 => {
                sections.push(&pattern[start..i]);
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    sections.push(&pattern[start..]);
    sections
}

/// Custom pattern with optional `positive;negative;zero` sections. The
/// negative section renders the absolute value without a sign.
fn format_custom(number: Number, pattern: &str) -> String {
    if let Number::Float(d) = number
        && !d.is_finite()
    {
        return non_finite(d).to_string();
    }

    let sections = split_sections(pattern);
    let (section, signed) = match sections.as_slice() {
        [_, negative, ..] if number.is_negative() && !negative.is_empty() => (*negative, false),
        [_, _, zero] if number.is_zero() && !zero.is_empty() => (*zero, true),
        [first, ..] => (*first, true),
        [] => (pattern, true),
    };

    let number = if signed { number } else { number.abs() };
    CustomPattern::parse(section).render(number, signed)
}
