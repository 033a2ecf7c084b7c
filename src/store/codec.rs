//! Line codec for the CSV session log
//!
//! Writing is strict: every record becomes exactly one line with six
//! columns. Reading is lenient: callers get a reason string for anything
//! that is not a usable record and decide how to count it.

use chrono::{NaiveDate, NaiveDateTime};

use crate::consts::{DATE_FORMAT, DATETIME_FORMAT};
use crate::core::SessionRecord;

/// Make a user-supplied tag safe to store as a bare CSV token.
///
/// Commas become semicolons, double quotes become apostrophes and line
/// breaks become spaces. Surrounding whitespace is trimmed.
pub(crate) fn sanitize_tag(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            ',' => ';',
            '"' => '\'',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapse a free-text note onto a single line. Blank notes become `None`.
pub(crate) fn flatten_description(raw: &str) -> Option<String> {
    let flat = raw.replace("\r\n", " ").replace(['\r', '\n'], " ");
    let trimmed = flat.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Serialize a record as one log line (without the trailing newline)
pub(crate) fn encode_record(record: &SessionRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        record.date.format(DATE_FORMAT),
        record.start_time.format(DATETIME_FORMAT),
        record.end_time.format(DATETIME_FORMAT),
        record.duration_minutes,
        record.tag,
        quote(record.description.as_deref().unwrap_or("")),
    )
}

/// Split a CSV line into fields, honoring double-quoted fields with `""`
/// escapes. Returns `None` when a quoted field is never closed.
pub(crate) fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                ',' => fields.push(std::mem::take(&mut field)),
                '"' if field.is_empty() => in_quotes = true,
                other => field.push(other),
            }
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// True for the header line (or any line whose first column is "date")
pub(crate) fn is_header(line: &str) -> bool {
    line.trim_start_matches('\u{feff}')
        .split(',')
        .next()
        .is_some_and(|first| first.trim() == "date")
}

fn parse_duration(raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("missing duration_minutes".to_string());
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("non-numeric duration_minutes \"{trimmed}\""));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| format!("duration_minutes out of range \"{trimmed}\""))
}

/// Parse one data line into a record, or explain why it is unusable
pub(crate) fn parse_record(line: &str) -> Result<SessionRecord, String> {
    let fields = split_fields(line).ok_or_else(|| "unterminated quoted field".to_string())?;
    if fields.len() < 5 || fields.len() > 6 {
        return Err(format!("expected 5 or 6 columns, found {}", fields.len()));
    }

    let date = NaiveDate::parse_from_str(fields[0].trim(), DATE_FORMAT)
        .map_err(|_| format!("bad date \"{}\"", fields[0]))?;
    let start_time = NaiveDateTime::parse_from_str(fields[1].trim(), DATETIME_FORMAT)
        .map_err(|_| format!("bad start_time \"{}\"", fields[1]))?;
    let end_time = NaiveDateTime::parse_from_str(fields[2].trim(), DATETIME_FORMAT)
        .map_err(|_| format!("bad end_time \"{}\"", fields[2]))?;
    let duration_minutes = parse_duration(&fields[3])?;

    let tag = fields[4].clone();
    if tag.trim().is_empty() {
        return Err("empty tag".to_string());
    }

    let description = fields.get(5).and_then(|d| flatten_description(d));

    Ok(SessionRecord {
        date,
        start_time,
        end_time,
        duration_minutes,
        tag,
        description,
    })
}
