//! Keypad buttons and layouts
//!
//! The keypad is what a user presses; the engine only sees [`Operation`]s.
//! This module maps between the two, lays buttons out on a grid and reads
//! key sequences typed on a keyboard.
//!
//! Portrait layout:
//! ```text
//! [ ± ] [x² ] [ √ ] [ C ]
//! [ 7 ] [ 8 ] [ 9 ] [ ÷ ]
//! [ 4 ] [ 5 ] [ 6 ] [ × ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 0 ] [ . ] [ = ] [ + ]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operation};

/// A button on the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Digit key (0-9)
    Digit(u8),
    /// Decimal separator
    DecimalSeparator,
    /// =
    Equals,
    /// C
    Clear,
    /// +
    Add,
    /// -
    Subtract,
    /// ×
    Multiply,
    /// ÷
    Divide,
    /// ±
    PlusMinus,
    /// x²
    Square,
    /// √
    SquareRoot,
    /// Delete the last typed character
    Backspace,
    /// 1/x
    Inverse,
    /// x!
    Factorial,
    /// π
    Pi,
    /// e
    Euler,
}

impl Button {
    /// Returns the engine operation this button sends
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            Self::Digit(d) => Operation::Digit(d),
            Self::DecimalSeparator => Operation::DecimalPoint,
            Self::Equals => Operation::Equals,
            Self::Clear => Operation::Reset,
            Self::Add => Operation::Add,
            Self::Subtract => Operation::Subtract,
            Self::Multiply => Operation::Multiply,
            Self::Divide => Operation::Divide,
            Self::PlusMinus => Operation::ToggleSign,
            Self::Square => Operation::Square,
            Self::SquareRoot => Operation::SquareRoot,
            Self::Backspace => Operation::DeleteLastDigit,
            Self::Inverse => Operation::Inverse,
            Self::Factorial => Operation::Factorial,
            Self::Pi => Operation::Pi,
            Self::Euler => Operation::Euler,
        }
    }

    /// Returns the label printed on the button
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.operation().symbol()
    }

    /// Maps a keyboard character to a button
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        let button = match key {
            '0'..='9' => Self::Digit(key.to_digit(10)? as u8),
            '.' | ',' => Self::DecimalSeparator,
            '=' => Self::Equals,
            'c' | 'C' => Self::Clear,
            '+' => Self::Add,
            '-' => Self::Subtract,
            '*' | 'x' | '×' => Self::Multiply,
            '/' | '÷' => Self::Divide,
            'n' | '±' => Self::PlusMinus,
            's' | '²' => Self::Square,
            'r' | '√' => Self::SquareRoot,
            '<' | '\u{8}' | '\u{7f}' | '⌫' => Self::Backspace,
            'i' => Self::Inverse,
            '!' => Self::Factorial,
            'p' | 'π' => Self::Pi,
            'e' => Self::Euler,
            _ => return None,
        };
        Some(button)
    }

    /// Returns the ASCII key that selects this button
    #[must_use]
    pub fn key(self) -> char {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10).unwrap_or('?'),
            Self::DecimalSeparator => '.',
            Self::Equals => '=',
            Self::Clear => 'c',
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::PlusMinus => 'n',
            Self::Square => 's',
            Self::SquareRoot => 'r',
            Self::Backspace => '<',
            Self::Inverse => 'i',
            Self::Factorial => '!',
            Self::Pi => 'p',
            Self::Euler => 'e',
        }
    }
}

impl From<Button> for Operation {
    fn from(button: Button) -> Self {
        button.operation()
    }
}

/// Parses a typed key sequence, skipping whitespace
pub fn parse_keys(input: &str) -> CalcResult<Vec<Button>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Button::from_key(c).ok_or(CalcError::UnknownKey(c)))
        .collect()
}

/// Button arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// 4 columns × 5 rows
    #[default]
    Portrait,
    /// 5 columns × 4 rows
    Landscape,
    /// Portrait with an extra row of scientific keys on top
    Scientific,
}

/// Buttons arranged on a grid, in row-major order
#[derive(Debug, Clone)]
pub struct Keypad {
    layout: Layout,
    buttons: Vec<Button>,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl Keypad {
    /// Creates a keypad with the given layout
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        use Button::{
            Add, Clear, DecimalSeparator, Digit, Divide, Equals, Euler, Factorial, Inverse,
            Multiply, Pi, PlusMinus, Square, SquareRoot, Subtract,
        };

        #[rustfmt::skip]
        let portrait = [
            PlusMinus, Square, SquareRoot, Clear,
            Digit(7), Digit(8), Digit(9), Divide,
            Digit(4), Digit(5), Digit(6), Multiply,
            Digit(1), Digit(2), Digit(3), Subtract,
            Digit(0), DecimalSeparator, Equals, Add,
        ];
        let (buttons, cols) = match layout {
            Layout::Portrait => (portrait.to_vec(), 4),
            Layout::Landscape => (
                vec![
                    Clear, Digit(7), Digit(8), Digit(9), Divide,
                    PlusMinus, Digit(4), Digit(5), Digit(6), Multiply,
                    Square, Digit(1), Digit(2), Digit(3), Subtract,
                    SquareRoot, Digit(0), DecimalSeparator, Equals, Add,
                ],
                5,
            ),
            Layout::Scientific => {
                let mut buttons = vec![Inverse, Factorial, Pi, Euler];
                buttons.extend_from_slice(&portrait);
                (buttons, 4)
            }
        };

        Self {
            layout,
            buttons,
            cols,
        }
    }

    /// Returns the layout
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.buttons.len() / self.cols
    }

    /// Returns the number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<Button> {
        if row < self.rows() && col < self.cols {
            self.buttons.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Finds the (row, col) of a button
    #[must_use]
    pub fn position_of(&self, button: Button) -> Option<(usize, usize)> {
        self.buttons
            .iter()
            .position(|b| *b == button)
            .map(|i| (i / self.cols, i % self.cols))
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = Button> + '_ {
        self.buttons.iter().copied()
    }

    /// Renders the grid as text, one row per line
    #[must_use]
    pub fn render(&self) -> String {
        self.buttons
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|b| format!("[{:^3}]", b.label()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
