//! tapcalc - a key-press driven calculator engine
//!
//! Models a simple pocket calculator: one accumulator, one pending operator
//! and a sticky error mode. Keys go in through [`core::Engine::apply`]; what
//! the calculator shows comes out as a [`core::Readout`], which
//! [`display::DisplayFormatter`] turns into text.
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.apply_all([
//!     Operation::Digit(1),
//!     Operation::Digit(7),
//!     Operation::Add,
//!     Operation::Digit(2),
//!     Operation::Digit(5),
//!     Operation::SquareRoot,
//!     Operation::Equals,
//! ]);
//! assert_eq!(engine.readout(), Readout::Value(22.0));
//!
//! // Errors latch until reset
//! engine.apply_all([Operation::Divide, Operation::Digit(0), Operation::Equals]);
//! assert_eq!(engine.readout(), Readout::Error);
//! engine.apply(Operation::Reset);
//! assert_eq!(engine.readout(), Readout::Value(0.0));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod display;
pub mod driver;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::entry::MAX_INPUT_LEN;
    pub use crate::core::{
        BinaryOperator, CalcError, CalcResult, Constant, Engine, EntryBuffer, Operation,
        OperationKind, Readout, UnaryFunction,
    };
    pub use crate::display::{DisplayConfig, DisplayFormatter};
    pub use crate::driver::{CalculatorDriver, KeypadSession};
    pub use crate::keypad::{parse_keys, Button, Keypad, Layout};
}
