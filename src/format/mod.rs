//! Single-placeholder composite format templates.
//!
//! A template is literal text with format items of the form
//! `{0[,alignment][:specifier]}`. `{{` and `}}` render literal braces. Only
//! index `0` exists, since exactly one value is ever supplied.
use thiserror::Error;
use uuid::Uuid;

use crate::value::{Value, ValueKind};

mod datetime;
mod numeric;

use datetime::format_datetime;
use numeric::{Number, format_number};
pub(crate) use numeric::general_double;

/// Widths from here on are rejected as malformed
const MAX_ALIGNMENT: u32 = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },

    #[error("format item index {index} is out of range, only {{0}} is supplied")]
    IndexOutOfRange { index: usize },

    #[error("invalid format item index at byte {position}")]
    InvalidIndex { position: usize },

    #[error("invalid alignment at byte {position}")]
    InvalidAlignment { position: usize },

    #[error("format specifier '{specifier}' is not valid for {kind} values")]
    UnknownSpecifier { specifier: String, kind: ValueKind },
}

/// A parsed `{index,alignment:specifier}` item
#[derive(Debug, PartialEq)]
struct FormatItem<'a> {
    alignment: i32,
    specifier: Option<&'a str>,
}

/// Render `template` with `value` substituted for every `{0}` item.
pub fn format_single(template: &str, value: &Value) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().is_some_and(|&(_, c)| c == '{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let body_start = pos + 1;
                let body_end = template[body_start..]
                    .find(['{', '}'])
                    .map(|offset| body_start + offset)
                    .filter(|&end| template.as_bytes()[end] == b'}')
                    .ok_or(FormatError::UnbalancedBrace { position: pos })?;

                let item = parse_item(&template[body_start..body_end], body_start)?;
                let rendered = render_value(value, item.specifier)?;
                push_aligned(&mut out, &rendered, item.alignment);

                while chars.peek().is_some_and(|&(i, _)| i <= body_end) {
                    chars.next();
                }
            }
            '}' if chars.peek().is_some_and(|&(_, c)| c == '}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::UnbalancedBrace { position: pos }),
            _ => out.push(ch),
        }
    }

    Ok(out)
}

/// Parse the text between the braces of a format item. `offset` is the byte
/// position of `body` inside the template, used for error positions.
fn parse_item(body: &str, offset: usize) -> Result<FormatItem<'_>, FormatError> {
    let (head, specifier) = match body.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (body, None),
    };
    let (index_text, alignment_text) = match head.split_once(',') {
        Some((index, alignment)) => (index, Some(alignment)),
        None => (head, None),
    };

    let index_text = index_text.trim_end();
    if index_text.is_empty() || !index_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidIndex { position: offset });
    }
    let index: usize = index_text
        .parse()
        .map_err(|_| FormatError::InvalidIndex { position: offset })?;
    if index != 0 {
        return Err(FormatError::IndexOutOfRange { index });
    }

    let alignment = match alignment_text {
        Some(text) => {
            let invalid = FormatError::InvalidAlignment {
                position: offset + head.len() - text.len(),
            };
            let alignment = text.trim().parse::<i32>().map_err(|_| invalid.clone())?;
            if alignment.unsigned_abs() >= MAX_ALIGNMENT {
                return Err(invalid);
            }
            alignment
        }
        None => 0,
    };

    Ok(FormatItem { alignment, specifier })
}

fn push_aligned(out: &mut String, rendered: &str, alignment: i32) {
    let width = alignment.unsigned_abs() as usize;
    let padding = width.saturating_sub(rendered.chars().count());
    if alignment > 0 {
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(rendered);
    } else {
        out.push_str(rendered);
        out.extend(std::iter::repeat_n(' ', padding));
    }
}

fn render_value(value: &Value, specifier: Option<&str>) -> Result<String, FormatError> {
    let Some(specifier) = specifier.filter(|s| !s.is_empty()) else {
        return Ok(value.to_string());
    };

    let rendered = match value {
        Value::Int(i) => format_number(Number::Int(*i), specifier),
        Value::Long(l) => format_number(Number::Long(*l), specifier),
        Value::Double(d) => format_number(Number::Float(*d), specifier),
        Value::Decimal(d) => format_number(Number::Decimal(*d), specifier),
        Value::DateTime(dt) => format_datetime(dt, specifier),
        Value::Guid(g) => format_guid(g, specifier),
        Value::Null | Value::DbNull | Value::Bool(_) | Value::Text(_) | Value::Other(_) => {
            Some(value.to_string())
        }
    };

    rendered.ok_or_else(|| FormatError::UnknownSpecifier {
        specifier: specifier.to_string(),
        kind: value.kind(),
    })
}

fn format_guid(g: &Uuid, specifier: &str) -> Option<String> {
    let rendered = match specifier {
        "D" | "d" => g.hyphenated().to_string(),
        "N" | "n" => g.simple().to_string(),
        "B" | "b" => g.braced().to_string(),
        "P" | "p" => format!("({})", g.hyphenated()),
        "X" | "x" => {
            let (d1, d2, d3, d4) = g.as_fields();
            let tail: Vec<String> = d4.iter().map(|b| format!("0x{b:02x}")).collect();
            format!("{{0x{d1:08x},0x{d2:04x},0x{d3:04x},{{{}}}}}", tail.join(","))
        }
        _ => return None,
    };
    Some(rendered)
}
