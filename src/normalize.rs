//! Canonical numeric values out of the human-formatted strings the listing
//! pages serve: currency amounts, runtimes, gross figures with an `M`
//! suffix. All operations are pure and synchronous. Raw records are JSON
//! values, so each parser also accepts an already-numeric input and passes
//! it through unchanged.

use crate::error::{Result, ScraperError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)").unwrap());

/// Millions suffix is uppercase only; a lowercase `m` is not a unit.
static MILLIONS_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)M$").unwrap());

/// Unit applied to a bare, unsuffixed gross figure. Suffixed (`$16.46M`)
/// and comma-grouped (`5,581`) figures carry their own unit and ignore
/// the hint; the caller states what a plain integer means in its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrossUnit {
    Dollars,
    Millions,
}

/// Convert a currency-formatted string (`"$2,320,250,281"`) to an integer.
/// An already-numeric value is returned unchanged.
pub fn currency_to_number(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => number_to_i64(n),
        Value::String(s) => {
            let cleaned = s.trim().replace(['$', ','], "");
            cleaned
                .parse::<i64>()
                .map_err(|_| ScraperError::Numeric(format!("not a currency amount: {s:?}")))
        }
        other => Err(ScraperError::Numeric(format!(
            "expected currency string or number, got {other}"
        ))),
    }
}

/// Extract the leading minute count from a runtime string (`"176 min"`).
/// An already-numeric value is coerced to an integer.
pub fn extract_minutes(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => number_to_i64(n),
        Value::String(s) => {
            let caps = LEADING_INT
                .captures(s.trim())
                .ok_or_else(|| ScraperError::Numeric(format!("no leading minutes in {s:?}")))?;
            caps[1]
                .parse::<i64>()
                .map_err(|_| ScraperError::Numeric(format!("runtime out of range: {s:?}")))
        }
        other => Err(ScraperError::Numeric(format!(
            "expected runtime string or number, got {other}"
        ))),
    }
}

/// First label of a comma-separated list, trimmed. Empty input yields the
/// empty string.
pub fn extract_first_category(text: &str) -> &str {
    text.split(',').next().unwrap_or("").trim()
}

/// Convert a gross figure to whole dollars. `$16.46M` is millions,
/// `5,581` is a literal dollar amount, and a plain unsuffixed integer
/// takes the unit the caller supplies. Unparseable content is a
/// `Numeric` error, distinguishable from a parsed zero.
pub fn convert_gross_to_numeric(value: &Value, plain_unit: GrossUnit) -> Result<i64> {
    match value {
        Value::Number(n) => number_to_i64(n),
        Value::String(s) => {
            let cleaned = s.trim().trim_start_matches('$').to_string();

            if let Some(caps) = MILLIONS_SUFFIX.captures(&cleaned) {
                let prefix = caps[1]
                    .parse::<f64>()
                    .map_err(|_| ScraperError::Numeric(format!("bad gross figure: {s:?}")))?;
                return Ok((prefix * 1_000_000.0) as i64);
            }

            if cleaned.contains(',') {
                return cleaned
                    .replace(',', "")
                    .parse::<i64>()
                    .map_err(|_| ScraperError::Numeric(format!("bad gross figure: {s:?}")));
            }

            let plain = cleaned
                .parse::<f64>()
                .map_err(|_| ScraperError::Numeric(format!("bad gross figure: {s:?}")))?;
            Ok(match plain_unit {
                GrossUnit::Dollars => plain as i64,
                GrossUnit::Millions => (plain * 1_000_000.0) as i64,
            })
        }
        other => Err(ScraperError::Numeric(format!(
            "expected gross string or number, got {other}"
        ))),
    }
}

fn number_to_i64(n: &serde_json::Number) -> Result<i64> {
    if let Some(i) = n.as_i64() {
        Ok(i)
    } else if let Some(f) = n.as_f64() {
        Ok(f as i64)
    } else {
        Err(ScraperError::Numeric(format!("number out of range: {n}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_strips_dollar_sign_and_commas() {
        assert_eq!(
            currency_to_number(&json!("$2,320,250,281")).unwrap(),
            2_320_250_281
        );
        assert_eq!(currency_to_number(&json!("32,131,830")).unwrap(), 32_131_830);
    }

    #[test]
    fn currency_passes_numeric_input_through() {
        assert_eq!(currency_to_number(&json!(42)).unwrap(), 42);
    }

    #[test]
    fn currency_rejects_garbage() {
        assert!(matches!(
            currency_to_number(&json!("twelve dollars")),
            Err(ScraperError::Numeric(_))
        ));
    }

    #[test]
    fn minutes_from_runtime_string() {
        assert_eq!(extract_minutes(&json!("176 min")).unwrap(), 176);
    }

    #[test]
    fn minutes_coerce_float_to_integer() {
        assert_eq!(extract_minutes(&json!(176.0)).unwrap(), 176);
    }

    #[test]
    fn minutes_reject_non_numeric_lead() {
        assert!(matches!(
            extract_minutes(&json!("N/A")),
            Err(ScraperError::Numeric(_))
        ));
    }

    #[test]
    fn first_category_is_trimmed() {
        assert_eq!(extract_first_category("Action, Crime, Drama"), "Action");
        assert_eq!(extract_first_category(" Drama "), "Drama");
        assert_eq!(extract_first_category(""), "");
    }

    #[test]
    fn gross_millions_suffix() {
        assert_eq!(
            convert_gross_to_numeric(&json!("$16.46M"), GrossUnit::Dollars).unwrap(),
            16_460_000
        );
    }

    #[test]
    fn gross_lowercase_suffix_is_not_a_unit() {
        assert!(convert_gross_to_numeric(&json!("$16.46m"), GrossUnit::Dollars).is_err());
    }

    #[test]
    fn gross_comma_grouped_is_literal() {
        assert_eq!(
            convert_gross_to_numeric(&json!("5,581"), GrossUnit::Millions).unwrap(),
            5_581
        );
    }

    #[test]
    fn gross_plain_integer_takes_caller_unit() {
        assert_eq!(
            convert_gross_to_numeric(&json!("310"), GrossUnit::Dollars).unwrap(),
            310
        );
        assert_eq!(
            convert_gross_to_numeric(&json!("310"), GrossUnit::Millions).unwrap(),
            310_000_000
        );
    }

    #[test]
    fn gross_unparseable_is_an_error_not_zero() {
        assert!(matches!(
            convert_gross_to_numeric(&json!("abc"), GrossUnit::Dollars),
            Err(ScraperError::Numeric(_))
        ));
        assert!(convert_gross_to_numeric(&json!("-"), GrossUnit::Dollars).is_err());
        // A parsed zero stays a zero
        assert_eq!(
            convert_gross_to_numeric(&json!("0"), GrossUnit::Dollars).unwrap(),
            0
        );
    }

    #[test]
    fn gross_passes_numeric_input_through() {
        assert_eq!(
            convert_gross_to_numeric(&json!(16_460_000), GrossUnit::Millions).unwrap(),
            16_460_000
        );
    }
}
