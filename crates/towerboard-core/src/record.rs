// Score records and row parsing for the spreadsheet payload.
//
// The endpoint returns rows shaped `[id, name, email, points]` with loosely
// typed cells (a spreadsheet export does not care whether an id is a number
// or a string). A row survives only when id, name and email are all truthy;
// points fall back to 0 when they do not coerce to a number.

use serde_json::{Number, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One participant's row on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Identifier shown on the board and matched by search.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Non-negative point total.
    pub points: u64,
}

impl ScoreRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        points: u64,
    ) -> Self {
        ScoreRecord {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            points,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("expected a JSON array of rows, got {found}")]
    NotAnArray { found: &'static str },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the full endpoint payload into score records, in arrival order.
///
/// A `null` payload is an empty board. Any other non-array payload is an
/// error; malformed rows inside a valid array are skipped silently.
pub fn parse_rows(payload: &Value) -> Result<Vec<ScoreRecord>, PayloadError> {
    match payload {
        Value::Array(rows) => Ok(rows.iter().filter_map(parse_row).collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(PayloadError::NotAnArray {
            found: value_kind(other),
        }),
    }
}

/// Parse a single `[id, name, email, points]` row.
///
/// Returns `None` when the row is not an array or when any of the first
/// three cells is missing or falsy. Cells past the fourth are ignored.
pub fn parse_row(row: &Value) -> Option<ScoreRecord> {
    let cells = row.as_array()?;

    let id = cells.first().and_then(truthy_text)?;
    let name = cells.get(1).and_then(truthy_text)?;
    let email = cells.get(2).and_then(truthy_text)?;
    let points = cells.get(3).map_or(0, coerce_points);

    Some(ScoreRecord {
        id,
        name,
        email,
        points,
    })
}

/// Text form of a truthy cell, or `None` for a falsy one.
///
/// Empty strings, zero, NaN, `false`, `null`, arrays and objects are falsy.
/// Integral numbers render without a fractional part.
pub fn truthy_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f == 0.0 || f.is_nan() {
                None
            } else {
                Some(number_text(n))
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Coerce a points cell to a non-negative integer.
///
/// Numeric strings are parsed after trimming, `true` counts as 1, and
/// anything unparsable is 0. Fractions truncate toward zero; negative and
/// non-finite values become 0.
pub fn coerce_points(cell: &Value) -> u64 {
    let raw = match cell {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_text(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    clamp_points(raw)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 Display drops a trailing ".0"
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix_body = |prefixes: [&str; 2]| {
        prefixes
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(*prefix))
    };

    let radix_value = if let Some(body) = radix_body(["0x", "0X"]) {
        Some(u64::from_str_radix(body, 16))
    } else if let Some(body) = radix_body(["0o", "0O"]) {
        Some(u64::from_str_radix(body, 8))
    } else if let Some(body) = radix_body(["0b", "0B"]) {
        Some(u64::from_str_radix(body, 2))
    } else {
        None
    };

    match radix_value {
        Some(Ok(v)) => v as f64,
        Some(Err(_)) => 0.0,
        None => trimmed.parse::<f64>().unwrap_or(0.0),
    }
}

fn clamp_points(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX
        raw.trunc() as u64
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
