use std::fmt;

use chrono::{Datelike, NaiveDate};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// A ledger or input date: parsed when it matched a known pattern, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    Date(NaiveDate),
    Raw(String),
}

impl DateValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(date) => Some(*date),
            DateValue::Raw(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DateValue::Raw(raw) if raw.is_empty())
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<&str> for DateValue {
    fn from(raw: &str) -> Self {
        DateValue::Raw(raw.to_string())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self))
    }
}

/// Canonicalize a date.
///
/// Already-parsed dates pass through. Text is tried against `YYYY-MM-DD` and
/// `YYYY/MM/DD`; chrono accepts unpadded month and day for both, which covers
/// the legacy `YYYY/M/D` ledgers. Text matching nothing comes back as
/// [`DateValue::Raw`] so callers can tell it apart without an error path.
pub fn normalize_date(input: impl Into<DateValue>) -> DateValue {
    match input.into() {
        DateValue::Date(date) => DateValue::Date(date),
        DateValue::Raw(raw) => {
            let trimmed = raw.trim();
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(DateValue::Date)
                .unwrap_or(DateValue::Raw(raw))
        }
    }
}

/// Render as `YYYY/M/D` with no zero padding. Raw text is returned unchanged.
pub fn format_date(value: &DateValue) -> String {
    match value {
        DateValue::Date(date) => format!("{}/{}/{}", date.year(), date.month(), date.day()),
        DateValue::Raw(raw) => raw.clone(),
    }
}

/// A cleaned numeric cell. Integers and floats are kept apart so that values
/// copied from a ledger are written back the way they were read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(value) => value as f64,
            Numeric::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(value) => write!(f, "{value}"),
            // Whole floats keep a trailing `.0`, as the existing ledgers do.
            Numeric::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Numeric::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Parse a numeric-looking cell.
///
/// Whitespace and thousands separators are dropped. All-digit text becomes an
/// integer, anything else is tried as a float. Blank or unparseable input is
/// `None`, which is distinct from zero.
pub fn clean_numeric(value: Option<&str>) -> Option<Numeric> {
    let cleaned = value?.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(int) = cleaned.parse::<i64>() {
            return Some(Numeric::Int(int));
        }
    }
    cleaned.parse::<f64>().ok().map(Numeric::Float)
}

/// Round to two decimal places, correctly rounded from the exact binary value.
///
/// Scaling by 100 first would round twice and can land on a false tie.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
