//! Incremental decimal-literal entry
//!
//! Digits are stored without the decimal point; the point's position is
//! kept as a count of trailing fractional digits. Appending, deleting and
//! committing all work off the same two fields, so they stay symmetric.

use crate::core::{CalcError, CalcResult, Readout};

/// Maximum number of digits in one entry (the decimal point is not counted)
pub const MAX_INPUT_LEN: usize = 9;

/// A number being typed on the keypad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBuffer {
    /// Decimal digits, most significant first
    digits: String,
    /// Trailing digits after the point; `None` until a point is entered
    fraction_digits: Option<usize>,
    /// Leading minus
    negative: bool,
}

impl EntryBuffer {
    /// Starts an entry with a single digit, or `None` if `digit` is not 0-9
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Self> {
        let ch = char::from_digit(u32::from(digit), 10)?;
        Some(Self {
            digits: ch.to_string(),
            fraction_digits: None,
            negative: false,
        })
    }

    /// Starts an entry at `0`, as when the point is pressed first
    #[must_use]
    pub fn zero() -> Self {
        Self {
            digits: "0".to_string(),
            fraction_digits: None,
            negative: false,
        }
    }

    /// Appends a digit; returns false if it was dropped
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if self.is_full() {
            return false;
        }
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return false;
        };
        self.digits.push(ch);
        if let Some(n) = self.fraction_digits.as_mut() {
            *n += 1;
        }
        true
    }

    /// Enters the decimal point; a second point is ignored
    pub fn push_point(&mut self) {
        self.fraction_digits.get_or_insert(0);
    }

    /// Flips the leading minus
    pub fn toggle_sign(&mut self) {
        self.negative = !self.negative;
    }

    /// Removes the last typed character
    ///
    /// A point with no digits after it goes first; otherwise the last digit.
    /// Returns true when no digits remain and the entry should be discarded.
    pub fn pop(&mut self) -> bool {
        if self.fraction_digits == Some(0) {
            self.fraction_digits = None;
            return false;
        }
        self.digits.pop();
        if let Some(n) = self.fraction_digits.as_mut() {
            *n = n.saturating_sub(1);
        }
        self.digits.is_empty()
    }

    /// Returns the digits typed so far
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns the fractional digit count
    #[must_use]
    pub fn fraction_digits(&self) -> Option<usize> {
        self.fraction_digits
    }

    /// Returns true if the minus is toggled on
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns the number of digits typed
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns true if no digits are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns true once no further digit fits
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= MAX_INPUT_LEN
    }

    /// Parses the entry into a number
    pub fn value(&self) -> CalcResult<f64> {
        let magnitude: u64 = self
            .digits
            .parse()
            .map_err(|e| CalcError::malformed(format!("{:?}: {e}", self.digits)))?;
        let mut value = magnitude as f64;
        if let Some(n) = self.fraction_digits {
            value /= 10f64.powi(n as i32);
        }
        Ok(if self.negative { -value } else { value })
    }

    /// Projects the entry into the readout shown while typing
    #[must_use]
    pub fn readout(&self) -> Readout {
        Readout::Editing {
            digits: self.digits.clone(),
            fraction_digits: self.fraction_digits,
            negative: self.negative,
        }
    }
}
