//! Cell value formatting: humanization and currency.
//!
//! Attribute-backed cells pass through [`pretty_format`] before any currency
//! formatting is layered on top. Computed cells skip the pretty step and
//! only receive currency formatting when requested.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TableError;

/// Humanize a raw attribute value into a display string.
///
/// - `null` becomes the empty string
/// - booleans become `Yes` / `No`
/// - numbers and strings display as-is
/// - arrays and objects fall back to compact JSON
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tabulon::pretty_format;
///
/// assert_eq!(pretty_format(&json!(30)), "30");
/// assert_eq!(pretty_format(&json!(true)), "Yes");
/// assert_eq!(pretty_format(&json!(null)), "");
/// ```
pub fn pretty_format(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Render a value as plain display text, without humanization.
///
/// Strings display unquoted; everything else falls back to JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Options for currency formatting.
///
/// Defaults match the conventional `$1,234.50` shape: dollar unit, dot
/// separator, comma delimiter, two digits of precision. All fields default
/// individually, so a partial configuration map deserializes cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptions {
    /// Currency symbol prefixed to the amount.
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Decimal separator between whole and fractional digits.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Thousands delimiter for the whole part.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Number of fractional digits.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_unit() -> String {
    "$".to_string()
}

fn default_separator() -> String {
    ".".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_precision() -> usize {
    2
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        CurrencyOptions {
            unit: default_unit(),
            separator: default_separator(),
            delimiter: default_delimiter(),
            precision: default_precision(),
        }
    }
}

impl CurrencyOptions {
    /// Create options with all defaults.
    pub fn new() -> Self {
        CurrencyOptions::default()
    }

    /// Set the currency symbol.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the decimal separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the thousands delimiter.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the number of fractional digits.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Parse options from a configuration map, applying field defaults.
    pub fn from_value(value: &Value) -> Result<Self, TableError> {
        serde_json::from_value(value.clone()).map_err(TableError::from)
    }
}

/// Format a value as currency.
///
/// Numbers and numeric strings are formatted with the configured unit,
/// delimiter grouping, and precision. A non-numeric value passes through
/// with the unit prefixed rather than failing.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tabulon::{format_currency, CurrencyOptions};
///
/// let options = CurrencyOptions::default();
/// assert_eq!(format_currency(&json!(1234.5), &options), "$1,234.50");
/// assert_eq!(format_currency(&json!(-3), &options), "-$3.00");
/// ```
pub fn format_currency(value: &Value, options: &CurrencyOptions) -> String {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) => {
            let negative = n < 0.0;
            let rendered = format!("{:.*}", options.precision, n.abs());
            let (whole, fraction) = match rendered.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (rendered.as_str(), None),
            };
            let mut out = String::new();
            if negative {
                out.push('-');
            }
            out.push_str(&options.unit);
            out.push_str(&group_digits(whole, &options.delimiter));
            if let Some(fraction) = fraction {
                out.push_str(&options.separator);
                out.push_str(fraction);
            }
            out
        }
        None => format!("{}{}", options.unit, display_value(value)),
    }
}

/// Insert the delimiter between groups of three digits.
fn group_digits(digits: &str, delimiter: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(delimiter);
        }
        out.push(c);
    }
    out
}
