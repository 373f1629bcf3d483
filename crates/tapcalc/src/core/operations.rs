//! Operation vocabulary and the arithmetic behind it
//!
//! Every key the engine understands is an [`Operation`]. Arithmetic keys
//! classify into binary operators, unary functions or constants, each of
//! which knows how to compute itself and which arguments it rejects.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Largest argument whose factorial is a finite `f64`
const MAX_FACTORIAL: f64 = 170.0;

/// A single key press sent to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Append a decimal digit (0-9)
    Digit(u8),
    /// Enter the decimal point
    DecimalPoint,
    /// Flip the sign of the entry, or negate the committed value
    ToggleSign,
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// x²
    Square,
    /// √x
    SquareRoot,
    /// 1/x
    Inverse,
    /// x!
    Factorial,
    /// π
    Pi,
    /// Euler's number e
    Euler,
    /// Resolve the pending operator
    Equals,
    /// Remove the last typed character
    DeleteLastDigit,
    /// Return to the zeroed state
    Reset,
}

/// How the engine handles an [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Entry editing: digit
    Digit(u8),
    /// Entry editing: decimal point
    DecimalPoint,
    /// Entry editing or in-place negation
    ToggleSign,
    /// Deferred two-operand arithmetic
    Binary(BinaryOperator),
    /// Immediate one-operand function on the accumulator
    Unary(UnaryFunction),
    /// Loads a constant as if it had been typed
    Constant(Constant),
    /// Resolve the pending operator
    Equals,
    /// Entry editing: backspace
    DeleteLastDigit,
    /// Zero everything
    Reset,
}

impl Operation {
    /// Every operation except digits, in keypad order
    pub const NON_DIGIT: [Self; 15] = [
        Self::DecimalPoint,
        Self::ToggleSign,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Square,
        Self::SquareRoot,
        Self::Inverse,
        Self::Factorial,
        Self::Pi,
        Self::Euler,
        Self::Equals,
        Self::DeleteLastDigit,
        Self::Reset,
    ];

    /// Classifies the operation
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Digit(d) => OperationKind::Digit(*d),
            Self::DecimalPoint => OperationKind::DecimalPoint,
            Self::ToggleSign => OperationKind::ToggleSign,
            Self::Add => OperationKind::Binary(BinaryOperator::Add),
            Self::Subtract => OperationKind::Binary(BinaryOperator::Subtract),
            Self::Multiply => OperationKind::Binary(BinaryOperator::Multiply),
            Self::Divide => OperationKind::Binary(BinaryOperator::Divide),
            Self::Square => OperationKind::Unary(UnaryFunction::Square),
            Self::SquareRoot => OperationKind::Unary(UnaryFunction::SquareRoot),
            Self::Inverse => OperationKind::Unary(UnaryFunction::Inverse),
            Self::Factorial => OperationKind::Unary(UnaryFunction::Factorial),
            Self::Pi => OperationKind::Constant(Constant::Pi),
            Self::Euler => OperationKind::Constant(Constant::Euler),
            Self::Equals => OperationKind::Equals,
            Self::DeleteLastDigit => OperationKind::DeleteLastDigit,
            Self::Reset => OperationKind::Reset,
        }
    }

    /// Returns the symbol printed on the key
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Digit(d) if (*d as usize) < DIGIT_LABELS.len() => DIGIT_LABELS[*d as usize],
            Self::Digit(_) => "?",
            Self::DecimalPoint => ".",
            Self::ToggleSign => "±",
            Self::Add => BinaryOperator::Add.symbol(),
            Self::Subtract => BinaryOperator::Subtract.symbol(),
            Self::Multiply => BinaryOperator::Multiply.symbol(),
            Self::Divide => BinaryOperator::Divide.symbol(),
            Self::Square => "x²",
            Self::SquareRoot => "√",
            Self::Inverse => "1/x",
            Self::Factorial => "x!",
            Self::Pi => "π",
            Self::Euler => "e",
            Self::Equals => "=",
            Self::DeleteLastDigit => "⌫",
            Self::Reset => "C",
        }
    }
}

/// Binary operator held pending until the next operator or equals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// lhs + rhs
    Add,
    /// lhs - rhs
    Subtract,
    /// lhs × rhs
    Multiply,
    /// lhs ÷ rhs
    Divide,
}

impl BinaryOperator {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Applies the operator, `lhs` being the earlier operand
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

impl From<BinaryOperator> for Operation {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Add => Self::Add,
            BinaryOperator::Subtract => Self::Subtract,
            BinaryOperator::Multiply => Self::Multiply,
            BinaryOperator::Divide => Self::Divide,
        }
    }
}

/// Function applied to the accumulator in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryFunction {
    /// x²
    Square,
    /// √x, x ≥ 0
    SquareRoot,
    /// 1/x, x ≠ 0
    Inverse,
    /// x!, x a non-negative integer up to 170
    Factorial,
    /// -x
    Negate,
}

impl UnaryFunction {
    /// Applies the function
    pub fn apply(self, x: f64) -> CalcResult<f64> {
        match self {
            Self::Square => Ok(x * x),
            Self::SquareRoot => {
                if x < 0.0 {
                    return Err(CalcError::domain(format!("square root of {x}")));
                }
                Ok(x.sqrt())
            }
            Self::Inverse => {
                if x == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(1.0 / x)
            }
            Self::Factorial => factorial(x),
            Self::Negate => Ok(-x),
        }
    }
}

fn factorial(x: f64) -> CalcResult<f64> {
    if x < 0.0 || x.fract() != 0.0 || x.is_nan() {
        return Err(CalcError::domain(format!("factorial of {x}")));
    }
    if x > MAX_FACTORIAL {
        return Err(CalcError::domain(format!("factorial of {x} overflows")));
    }
    let n = x as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}

/// Constant loaded into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    /// π
    Pi,
    /// e
    Euler,
}

impl Constant {
    /// Returns the constant's value
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::Euler => std::f64::consts::E,
        }
    }
}
