//! Display formatting
//!
//! Turns a [`Readout`] into the text on the calculator's display. The engine
//! never stores a decimal separator: the formatter inserts one at the
//! fractional boundary of an entry and when printing committed values.

use serde::{Deserialize, Serialize};

use crate::core::{non_finite_text, Readout};

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Character placed between integer and fractional digits
    pub decimal_separator: char,
    /// Text shown while the engine is in error
    pub error_text: String,
    /// Magnitudes above this switch to scientific notation
    pub scientific_above: f64,
    /// Non-zero magnitudes below this switch to scientific notation
    pub scientific_below: f64,
    /// Maximum fractional digits shown for a committed value
    pub max_fraction_digits: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            error_text: "Error".to_string(),
            scientific_above: 1e9,
            scientific_below: 1e-9,
            max_fraction_digits: 9,
        }
    }
}

impl DisplayConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal separator
    #[must_use]
    pub const fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Set the error text
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Set the upper scientific threshold
    #[must_use]
    pub const fn with_scientific_above(mut self, threshold: f64) -> Self {
        self.scientific_above = threshold;
        self
    }

    /// Set the lower scientific threshold
    #[must_use]
    pub const fn with_scientific_below(mut self, threshold: f64) -> Self {
        self.scientific_below = threshold;
        self
    }

    /// Set the fractional digit limit
    #[must_use]
    pub const fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }
}

/// Formats readouts for display
#[derive(Debug, Clone, Default)]
pub struct DisplayFormatter {
    config: DisplayConfig,
}

impl DisplayFormatter {
    /// Creates a formatter with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with custom settings
    #[must_use]
    pub fn with_config(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Formats a readout
    #[must_use]
    pub fn format(&self, readout: &Readout) -> String {
        match readout {
            Readout::Error => self.config.error_text.clone(),
            Readout::Editing {
                digits,
                fraction_digits,
                negative,
            } => self.format_editing(digits, *fraction_digits, *negative),
            Readout::Value(value) => self.format_value(*value),
        }
    }

    fn format_editing(
        &self,
        digits: &str,
        fraction_digits: Option<usize>,
        negative: bool,
    ) -> String {
        let mut text = String::with_capacity(digits.len() + 2);
        if negative {
            text.push('-');
        }
        match fraction_digits {
            Some(n) => {
                let integer_chars = digits.chars().count().saturating_sub(n);
                let split = digits
                    .char_indices()
                    .nth(integer_chars)
                    .map_or(digits.len(), |(i, _)| i);
                text.push_str(&digits[..split]);
                text.push(self.config.decimal_separator);
                text.push_str(&digits[split..]);
            }
            None => text.push_str(digits),
        }
        text
    }

    fn format_value(&self, value: f64) -> String {
        if !value.is_finite() {
            return non_finite_text(value).to_string();
        }
        if value == 0.0 {
            return "0".to_string();
        }
        let magnitude = value.abs();
        if magnitude > self.config.scientific_above || magnitude < self.config.scientific_below {
            self.format_scientific(value)
        } else {
            self.format_plain(value)
        }
    }

    fn format_plain(&self, value: f64) -> String {
        let text = format!("{:.*}", self.config.max_fraction_digits, value);
        let trimmed = trim_fraction(&text);
        if trimmed == "-0" {
            return "0".to_string();
        }
        self.localize(trimmed)
    }

    fn format_scientific(&self, value: f64) -> String {
        let text = format!("{:.*e}", self.config.max_fraction_digits, value);
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                format!("{}E{exponent}", self.localize(trim_fraction(mantissa)))
            }
            None => self.localize(&text),
        }
    }

    fn localize(&self, text: &str) -> String {
        if self.config.decimal_separator == '.' {
            text.to_string()
        } else {
            text.replacen('.', &self.config.decimal_separator.to_string(), 1)
        }
    }
}

/// Drops trailing fractional zeros and a dangling point
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(digits: &str, fraction_digits: Option<usize>, negative: bool) -> Readout {
        Readout::Editing {
            digits: digits.to_string(),
            fraction_digits,
            negative,
        }
    }

    fn fmt(readout: &Readout) -> String {
        DisplayFormatter::new().format(readout)
    }

    // ===== Config =====

    #[test]
    fn test_config_defaults() {
        let config = DisplayConfig::new();
        assert_eq!(config.decimal_separator, '.');
        assert_eq!(config.error_text, "Error");
        assert_eq!(config.scientific_above, 1e9);
        assert_eq!(config.max_fraction_digits, 9);
    }

    #[test]
    fn test_config_builders() {
        let config = DisplayConfig::new()
            .with_decimal_separator(',')
            .with_error_text("E")
            .with_scientific_above(1e6)
            .with_scientific_below(1e-3)
            .with_max_fraction_digits(4);
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(config.error_text, "E");
        assert_eq!(config.scientific_above, 1e6);
        assert_eq!(config.scientific_below, 1e-3);
        assert_eq!(config.max_fraction_digits, 4);
    }

    #[test]
    fn test_config_partial_deserialize_uses_defaults() {
        let config: DisplayConfig = serde_json::from_str(r#"{"decimal_separator":","}"#).unwrap();
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(config.error_text, "Error");
    }

    // ===== Error =====

    #[test]
    fn test_error_text() {
        assert_eq!(fmt(&Readout::Error), "Error");
        let formatter =
            DisplayFormatter::with_config(DisplayConfig::new().with_error_text("Oops"));
        assert_eq!(formatter.format(&Readout::Error), "Oops");
    }

    // ===== Editing =====

    #[test]
    fn test_editing_integer() {
        assert_eq!(fmt(&editing("125", None, false)), "125");
    }

    #[test]
    fn test_editing_bare_point() {
        assert_eq!(fmt(&editing("12", Some(0), false)), "12.");
    }

    #[test]
    fn test_editing_fraction_with_separator() {
        let formatter =
            DisplayFormatter::with_config(DisplayConfig::new().with_decimal_separator(','));
        assert_eq!(formatter.format(&editing("1205", Some(2), false)), "12,05");
    }

    #[test]
    fn test_editing_negative_fraction() {
        assert_eq!(fmt(&editing("005", Some(2), true)), "-0.05");
    }

    #[test]
    fn test_editing_splits_on_char_boundaries() {
        assert_eq!(fmt(&editing("1é", Some(1), false)), "1.é");
        assert_eq!(fmt(&editing("é5", Some(1), false)), "é.5");
        assert_eq!(fmt(&editing("٣", Some(3), false)), ".٣");
    }

    #[test]
    fn test_editing_from_json_with_wide_chars() {
        let readout: Readout = serde_json::from_str(
            r#"{"state":"editing","value":{"digits":"12€","fraction_digits":2,"negative":true}}"#,
        )
        .unwrap();
        assert_eq!(fmt(&readout), "-1.2€");
    }

    #[test]
    fn test_editing_keeps_leading_zeros() {
        assert_eq!(fmt(&editing("00002", Some(3), false)), "00.002");
    }

    // ===== Values =====

    #[test]
    fn test_value_integer() {
        assert_eq!(fmt(&Readout::Value(22.0)), "22");
        assert_eq!(fmt(&Readout::Value(-7.0)), "-7");
    }

    #[test]
    fn test_value_zero() {
        assert_eq!(fmt(&Readout::Value(0.0)), "0");
        assert_eq!(fmt(&Readout::Value(-0.0)), "0");
    }

    #[test]
    fn test_value_fraction() {
        assert_eq!(fmt(&Readout::Value(0.5)), "0.5");
        assert_eq!(fmt(&Readout::Value(0.1 + 0.2)), "0.3");
        assert_eq!(fmt(&Readout::Value(0.002 * 0.002)), "0.000004");
    }

    #[test]
    fn test_value_localized_separator() {
        let formatter =
            DisplayFormatter::with_config(DisplayConfig::new().with_decimal_separator(','));
        assert_eq!(formatter.format(&Readout::Value(-2.25)), "-2,25");
    }

    #[test]
    fn test_value_at_threshold_stays_plain() {
        assert_eq!(fmt(&Readout::Value(1e9)), "1000000000");
    }

    #[test]
    fn test_value_large_is_scientific() {
        assert_eq!(fmt(&Readout::Value(1e10)), "1E10");
        assert_eq!(fmt(&Readout::Value(-1.5e10)), "-1.5E10");
    }

    #[test]
    fn test_value_small_is_scientific() {
        assert_eq!(fmt(&Readout::Value(2.5e-12)), "2.5E-12");
    }

    #[test]
    fn test_scientific_localized_mantissa() {
        let formatter =
            DisplayFormatter::with_config(DisplayConfig::new().with_decimal_separator(','));
        assert_eq!(formatter.format(&Readout::Value(1.25e15)), "1,25E15");
    }

    #[test]
    fn test_value_non_finite_is_not_error_text() {
        assert_eq!(fmt(&Readout::Value(f64::INFINITY)), "∞");
        assert_eq!(fmt(&Readout::Value(f64::NEG_INFINITY)), "-∞");
        assert_eq!(fmt(&Readout::Value(f64::NAN)), "NaN");
    }

    #[test]
    fn test_value_respects_fraction_limit() {
        let formatter =
            DisplayFormatter::with_config(DisplayConfig::new().with_max_fraction_digits(2));
        assert_eq!(formatter.format(&Readout::Value(3.14159)), "3.14");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("1.500"), "1.5");
        assert_eq!(trim_fraction("2.000"), "2");
        assert_eq!(trim_fraction("100"), "100");
    }
}
