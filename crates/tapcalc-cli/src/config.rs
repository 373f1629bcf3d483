//! CLI configuration

use serde::{Deserialize, Serialize};
use tapcalc::display::DisplayConfig;

use crate::error::{CliError, CliResult};

/// Largest fractional digit count an `f64` can meaningfully show
const MAX_FRACTION_DIGITS: usize = 17;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - engine decisions
    Debug,
    /// Trace - every key press
    Trace,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the log filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Display formatting
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set display formatting
    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Rejects settings the display cannot honour
    pub fn validate(&self) -> CliResult<()> {
        let separator = self.display.decimal_separator;
        if separator.is_ascii_digit() || separator.is_whitespace() || separator == '-' {
            return Err(CliError::invalid_argument(format!(
                "decimal separator {separator:?} would be ambiguous"
            )));
        }
        let threshold = self.display.scientific_above;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(CliError::invalid_argument(format!(
                "scientific threshold must be a positive number, got {threshold}"
            )));
        }
        if self.display.max_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(CliError::invalid_argument(format!(
                "at most {MAX_FRACTION_DIGITS} fraction digits, got {}",
                self.display.max_fraction_digits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, 7), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(Verbosity::Quiet.filter_directive(), "error");
        assert_eq!(Verbosity::Normal.filter_directive(), "warn");
        assert_eq!(Verbosity::Trace.filter_directive(), "trace");
    }

    #[test]
    fn test_config_builders() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Debug)
            .with_display(DisplayConfig::new().with_decimal_separator(','));
        assert_eq!(config.verbosity, Verbosity::Debug);
        assert_eq!(config.display.decimal_separator, ',');
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CliConfig::new().validate().is_ok());
    }

    #[test]
    fn test_digit_separator_rejected() {
        let config =
            CliConfig::new().with_display(DisplayConfig::new().with_decimal_separator('5'));
        assert!(matches!(
            config.validate(),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let config =
            CliConfig::new().with_display(DisplayConfig::new().with_scientific_above(-1.0));
        assert!(config.validate().is_err());
        let config =
            CliConfig::new().with_display(DisplayConfig::new().with_scientific_above(f64::NAN));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_too_many_fraction_digits_rejected() {
        let config =
            CliConfig::new().with_display(DisplayConfig::new().with_max_fraction_digits(30));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_string(&CliConfig::new()).unwrap();
        assert!(json.contains(r#""verbosity":"Normal""#));
        assert!(json.contains(r#""decimal_separator":".""#));
    }
}
