use crate::frame::Cell;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;

/// Strings read as missing values, the same set tabular tools use by default.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(s: &str) -> bool {
    NA_VALUES.contains(&s.trim())
}

/// Parse a cell string as a number.
///
/// Handles formats like:
/// - "68" -> 68
/// - "-0.030" -> -0.030
/// - "1,234,567.5" -> 1234567.5 (thousands separators grouped by three)
/// - "2.5e3" -> 2500
///
/// Anything else, including "1,5" or "12%", is not a number.
pub fn parse_number(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b',' | b'e' | b'E'))
    {
        return None;
    }

    let normalized = strip_thousands(s)?;
    if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized).ok()
    } else {
        Decimal::from_str(&normalized).ok()
    }
}

/// Remove `,` thousands separators, rejecting commas in any other position.
fn strip_thousands(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains(',') {
        return Some(Cow::Borrowed(s));
    }

    let unsigned = s.trim_start_matches(['+', '-']);
    let integer = match unsigned.find(['.', 'e', 'E']) {
        Some(idx) => &unsigned[..idx],
        None => unsigned,
    };
    if unsigned[integer.len()..].contains(',') {
        return None;
    }

    let mut groups = integer.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 {
        return None;
    }
    if !groups.all(|g| g.len() == 3) {
        return None;
    }

    Some(Cow::Owned(s.replace(',', "")))
}

/// Turn a grid of cell strings into typed cells, one column at a time.
///
/// A column becomes numeric when every non-missing value in it parses as a
/// number; otherwise its values stay text. Missing values are `Cell::Empty`
/// in either case. Short rows are padded to `width`.
pub fn type_columns(raw: &[Vec<String>], width: usize) -> Vec<Vec<Cell>> {
    let numeric: Vec<bool> = (0..width)
        .map(|col| {
            raw.iter()
                .filter_map(|row| row.get(col))
                .filter(|v| !is_missing(v))
                .all(|v| parse_number(v).is_some())
        })
        .collect();

    raw.iter()
        .map(|row| {
            (0..width)
                .map(|col| {
                    let value = row.get(col).map(String::as_str).unwrap_or("");
                    if is_missing(value) {
                        Cell::Empty
                    } else if numeric[col] {
                        parse_number(value)
                            .map(Cell::Number)
                            .unwrap_or_else(|| Cell::Text(value.to_string()))
                    } else {
                        Cell::Text(value.to_string())
                    }
                })
                .collect()
        })
        .collect()
}
