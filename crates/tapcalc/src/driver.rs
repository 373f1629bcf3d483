//! Calculator drivers
//!
//! A driver is whatever sits between the buttons and the engine: it forwards
//! presses and keeps a display string in sync with the engine's readout.
//! The `verify_*` functions below are written against the trait, so any
//! front end can be checked with the same key sequences.

use crate::core::{Engine, Readout};
use crate::display::{DisplayConfig, DisplayFormatter};
use crate::keypad::Button;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses one button
    fn press(&mut self, button: Button);

    /// Returns the current display text
    fn display(&self) -> String;

    /// Returns the engine's readout
    fn readout(&self) -> Readout;

    /// Returns the calculator to its initial state
    fn clear(&mut self);

    /// Presses buttons in order
    fn press_all(&mut self, buttons: &[Button]) {
        for button in buttons {
            self.press(*button);
        }
    }
}

/// Keypad front end: an engine plus the text shown on its display
#[derive(Debug, Clone)]
pub struct KeypadSession {
    engine: Engine,
    formatter: DisplayFormatter,
    display_text: String,
}

impl Default for KeypadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadSession {
    /// Creates a session with default display settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DisplayConfig::default())
    }

    /// Creates a session with custom display settings
    #[must_use]
    pub fn with_config(config: DisplayConfig) -> Self {
        let engine = Engine::new();
        let formatter = DisplayFormatter::with_config(config);
        let display_text = formatter.format(&engine.readout());
        Self {
            engine,
            formatter,
            display_text,
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the formatter
    #[must_use]
    pub fn formatter(&self) -> &DisplayFormatter {
        &self.formatter
    }

    /// Returns the display text without allocating
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    fn refresh(&mut self) {
        self.display_text = self.formatter.format(&self.engine.readout());
    }
}

impl CalculatorDriver for KeypadSession {
    fn press(&mut self, button: Button) {
        self.engine.apply(button.operation());
        self.refresh();
    }

    fn display(&self) -> String {
        self.display_text.clone()
    }

    fn readout(&self) -> Readout {
        self.engine.readout()
    }

    fn clear(&mut self) {
        self.engine.reset();
        self.refresh();
    }
}

// ===== Driver-agnostic verification =====
// These work with ANY CalculatorDriver implementation

#[allow(clippy::panic)]
fn press_keys<D: CalculatorDriver>(driver: &mut D, keys: &str) {
    for key in keys.chars().filter(|c| !c.is_whitespace()) {
        let button = Button::from_key(key).unwrap_or_else(|| panic!("no button for {key:?}"));
        driver.press(button);
    }
}

/// Verifies the four binary operators and left-to-right chaining
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("2+3=", "5"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("1+2+3=", "6"),
        ("2+3*4=", "20"),
    ];
    for (keys, expected) in cases {
        driver.clear();
        press_keys(driver, keys);
        assert_eq!(driver.display(), expected, "keys {keys}");
    }
    driver.clear();
}

/// Verifies entry editing: digit cap, decimal point and deletion
pub fn verify_entry_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_keys(driver, "1234567890");
    assert_eq!(driver.display(), "123456789");

    driver.clear();
    press_keys(driver, "3..5");
    assert_eq!(driver.display(), "3.5");

    driver.clear();
    press_keys(driver, ".");
    assert_eq!(driver.display(), "0.");

    driver.clear();
    press_keys(driver, "7.<");
    assert_eq!(driver.display(), "7");

    driver.clear();
    press_keys(driver, "5n");
    assert_eq!(driver.display(), "-5");
    driver.clear();
}

/// Verifies the unary functions against committed and typed values
pub fn verify_unary_functions<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_keys(driver, "17+25r=");
    assert_eq!(driver.display(), "22");

    driver.clear();
    press_keys(driver, "17+255<rn=");
    assert_eq!(driver.display(), "12");

    driver.clear();
    press_keys(driver, "00.00.2s-");
    assert_eq!(driver.display(), "0.000004");

    driver.clear();
    press_keys(driver, "4!");
    assert_eq!(driver.display(), "24");

    driver.clear();
    press_keys(driver, "8i");
    assert_eq!(driver.display(), "0.125");
    driver.clear();
}

/// Verifies that errors latch until clear
pub fn verify_error_latch<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_keys(driver, "5/0=");
    assert_eq!(driver.readout(), Readout::Error);
    press_keys(driver, "1+2=");
    assert_eq!(driver.readout(), Readout::Error);

    driver.press(Button::Clear);
    assert_eq!(driver.readout(), Readout::Value(0.0));
    assert_eq!(driver.display(), "0");

    press_keys(driver, "4nr");
    assert_eq!(driver.readout(), Readout::Error);
    driver.clear();
}

/// Verifies that deleting the only digit drops the pending operator
pub fn verify_delete_cancels_pending<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_keys(driver, "8+3<");
    assert_eq!(driver.display(), "8");
    press_keys(driver, "=");
    assert_eq!(driver.display(), "8");
    driver.clear();
}

/// Verifies sign toggling on a committed value
pub fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_keys(driver, "7=");
    driver.press(Button::PlusMinus);
    assert_eq!(driver.readout(), Readout::Value(-7.0));
    assert_eq!(driver.display(), "-7");
    driver.clear();
}

/// Runs every verification against one driver
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_entry_editing(driver);
    verify_unary_functions(driver);
    verify_error_latch(driver);
    verify_delete_cancels_pending(driver);
    verify_sign_toggle(driver);
}
