//! Calculator engine state machine
//!
//! Two registers, one pending operator, an optional entry being typed and
//! an error latch. [`Engine::apply`] is the only way to change any of them
//! and never fails: arithmetic errors latch the engine instead of being
//! returned, and only [`Operation::Reset`] clears the latch.

use tracing::{debug, trace, warn};

use crate::core::{
    BinaryOperator, CalcError, CalcResult, EntryBuffer, Operation, OperationKind, Readout,
    UnaryFunction,
};

/// Single-accumulator calculator driven by key presses
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// Register X: the committed operand or the last result
    accumulator: f64,
    /// Register Y: left operand of the pending operator
    previous: f64,
    /// Operator waiting for its right operand
    pending: Option<BinaryOperator>,
    /// Number being typed, if any
    entry: Option<EntryBuffer>,
    /// Set once an operation fails; cleared only by reset
    error: Option<CalcError>,
}

impl Engine {
    /// Creates an engine in the zeroed state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to the zeroed state, clearing the error latch
    pub fn reset(&mut self) {
        debug!("reset");
        *self = Self::default();
    }

    /// Applies one key press
    ///
    /// While latched in error every operation except reset is ignored.
    pub fn apply(&mut self, operation: Operation) {
        let kind = operation.kind();
        if kind == OperationKind::Reset {
            self.reset();
            return;
        }
        if let Some(err) = &self.error {
            debug!(?operation, %err, "ignored while in error");
            return;
        }
        trace!(?operation, "apply");
        if let Err(err) = self.step(kind) {
            warn!(?operation, %err, "calculator latched in error");
            self.error = Some(err);
        }
    }

    /// Applies a sequence of key presses in order
    pub fn apply_all<I>(&mut self, operations: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for operation in operations {
            self.apply(operation);
        }
    }

    /// Returns what the calculator shows
    #[must_use]
    pub fn readout(&self) -> Readout {
        if self.error.is_some() {
            Readout::Error
        } else if let Some(entry) = &self.entry {
            entry.readout()
        } else {
            Readout::Value(self.accumulator)
        }
    }

    /// Returns register X
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Returns register Y
    #[must_use]
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Returns the operator waiting to be resolved
    #[must_use]
    pub fn pending(&self) -> Option<BinaryOperator> {
        self.pending
    }

    /// Returns the number being typed
    #[must_use]
    pub fn entry(&self) -> Option<&EntryBuffer> {
        self.entry.as_ref()
    }

    /// Returns true while latched in error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns why the error latch was set
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    fn step(&mut self, kind: OperationKind) -> CalcResult<()> {
        match kind {
            OperationKind::Digit(digit) => match self.entry.as_mut() {
                Some(entry) => {
                    if !entry.push_digit(digit) {
                        trace!(digit, "digit dropped");
                    }
                }
                None => self.entry = EntryBuffer::from_digit(digit),
            },
            OperationKind::DecimalPoint => {
                self.entry.get_or_insert_with(EntryBuffer::zero).push_point();
            }
            OperationKind::ToggleSign => match self.entry.as_mut() {
                Some(entry) => entry.toggle_sign(),
                None => self.accumulator = UnaryFunction::Negate.apply(self.accumulator)?,
            },
            OperationKind::Unary(function) => {
                self.commit()?;
                self.accumulator = function.apply(self.accumulator)?;
            }
            OperationKind::Constant(constant) => {
                self.commit()?;
                self.accumulator = constant.value();
            }
            OperationKind::Binary(operator) => {
                self.commit()?;
                self.resolve_pending()?;
                self.pending = Some(operator);
            }
            OperationKind::Equals => {
                self.commit()?;
                self.resolve_pending()?;
            }
            OperationKind::DeleteLastDigit => {
                if let Some(entry) = self.entry.as_mut() {
                    if entry.pop() {
                        // An emptied entry also drops the operator in flight.
                        self.entry = None;
                        self.pending = None;
                    }
                }
            }
            OperationKind::Reset => self.reset(),
        }
        Ok(())
    }

    /// Moves the entry, if any, into the accumulator
    fn commit(&mut self) -> CalcResult<()> {
        if let Some(entry) = self.entry.take() {
            let value = entry.value()?;
            debug!(value, "commit");
            self.previous = self.accumulator;
            self.accumulator = value;
        }
        Ok(())
    }

    fn resolve_pending(&mut self) -> CalcResult<()> {
        if let Some(operator) = self.pending.take() {
            let result = operator.apply(self.previous, self.accumulator)?;
            debug!(
                lhs = self.previous,
                rhs = self.accumulator,
                operator = operator.symbol(),
                result,
                "resolve"
            );
            self.accumulator = result;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation::{
        Add, DecimalPoint, DeleteLastDigit, Digit, Divide, Equals, Euler, Factorial, Inverse,
        Multiply, Pi, Reset, Square, SquareRoot, Subtract, ToggleSign,
    };

    fn run(ops: &[Operation]) -> Engine {
        let mut engine = Engine::new();
        engine.apply_all(ops.iter().copied());
        engine
    }

    fn value(ops: &[Operation]) -> f64 {
        match run(ops).readout() {
            Readout::Value(v) => v,
            other => panic!("expected a value, got {other:?}"),
        }
    }

    // ===== Initial state =====

    #[test]
    fn test_new_engine_is_zeroed() {
        let engine = Engine::new();
        assert_eq!(engine.readout(), Readout::Value(0.0));
        assert_eq!(engine.accumulator(), 0.0);
        assert_eq!(engine.previous(), 0.0);
        assert!(engine.pending().is_none());
        assert!(engine.entry().is_none());
        assert!(!engine.is_error());
        assert!(engine.last_error().is_none());
    }

    // ===== Entry editing =====

    #[test]
    fn test_digits_start_editing() {
        let engine = run(&[Digit(4), Digit(2)]);
        assert_eq!(
            engine.readout(),
            Readout::Editing {
                digits: "42".into(),
                fraction_digits: None,
                negative: false,
            }
        );
    }

    #[test]
    fn test_tenth_digit_is_dropped() {
        let mut ops = vec![Digit(9); 9];
        let before = run(&ops).readout();
        ops.push(Digit(1));
        assert_eq!(run(&ops).readout(), before);
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        assert_eq!(run(&[Digit(10)]).readout(), Readout::Value(0.0));
        assert_eq!(
            run(&[Digit(3), Digit(12)]).readout(),
            run(&[Digit(3)]).readout()
        );
    }

    #[test]
    fn test_decimal_point_first_seeds_zero() {
        let engine = run(&[DecimalPoint]);
        assert_eq!(
            engine.readout(),
            Readout::Editing {
                digits: "0".into(),
                fraction_digits: Some(0),
                negative: false,
            }
        );
    }

    #[test]
    fn test_decimal_point_idempotent() {
        assert_eq!(
            run(&[Digit(3), DecimalPoint, DecimalPoint]).readout(),
            run(&[Digit(3), DecimalPoint]).readout()
        );
    }

    #[test]
    fn test_toggle_sign_while_editing() {
        let engine = run(&[Digit(5), ToggleSign]);
        assert_eq!(
            engine.readout(),
            Readout::Editing {
                digits: "5".into(),
                fraction_digits: None,
                negative: true,
            }
        );
        assert_eq!(engine.accumulator(), 0.0);
    }

    #[test]
    fn test_toggle_sign_on_committed_value() {
        let mut engine = run(&[Digit(7), Equals]);
        assert_eq!(engine.readout(), Readout::Value(7.0));
        engine.apply(ToggleSign);
        assert_eq!(engine.readout(), Readout::Value(-7.0));
        assert_eq!(engine.previous(), 0.0);
    }

    // ===== Deletion =====

    #[test]
    fn test_delete_last_digit() {
        let engine = run(&[Digit(2), Digit(5), Digit(5), DeleteLastDigit]);
        assert_eq!(engine.entry().unwrap().digits(), "25");
    }

    #[test]
    fn test_delete_bare_point() {
        let engine = run(&[Digit(2), DecimalPoint, DeleteLastDigit]);
        let entry = engine.entry().unwrap();
        assert_eq!(entry.digits(), "2");
        assert_eq!(entry.fraction_digits(), None);
    }

    #[test]
    fn test_delete_without_entry_is_noop() {
        let engine = run(&[Digit(8), Add, DeleteLastDigit]);
        assert_eq!(engine.readout(), Readout::Value(8.0));
        assert_eq!(engine.pending(), Some(BinaryOperator::Add));
    }

    #[test]
    fn test_delete_sole_digit_clears_entry_and_pending() {
        let engine = run(&[Digit(8), Add, Digit(3), DeleteLastDigit]);
        assert!(engine.entry().is_none());
        assert!(engine.pending().is_none());
        assert_eq!(engine.readout(), Readout::Value(8.0));

        let mut engine = engine;
        engine.apply(Equals);
        assert_eq!(engine.readout(), Readout::Value(8.0));
    }

    // ===== Unary functions =====

    #[test]
    fn test_sqrt_after_addition() {
        let result = value(&[Digit(1), Digit(7), Add, Digit(2), Digit(5), SquareRoot, Equals]);
        assert_eq!(result, 22.0);
    }

    #[test]
    fn test_delete_sqrt_negate_chain() {
        let result = value(&[
            Digit(1),
            Digit(7),
            Add,
            Digit(2),
            Digit(5),
            Digit(5),
            DeleteLastDigit,
            SquareRoot,
            ToggleSign,
            Equals,
        ]);
        assert_eq!(result, 12.0);
    }

    #[test]
    fn test_decimal_entry_squared() {
        let result = value(&[
            Digit(0),
            Digit(0),
            DecimalPoint,
            Digit(0),
            Digit(0),
            DecimalPoint,
            Digit(2),
            Square,
            Subtract,
        ]);
        assert!((result - 0.000004).abs() < 1e-18);
    }

    #[test]
    fn test_square_of_committed_value() {
        assert_eq!(value(&[Digit(3), Equals, Square]), 9.0);
    }

    #[test]
    fn test_sqrt_of_negative_latches_error() {
        let engine = run(&[Digit(4), ToggleSign, SquareRoot]);
        assert_eq!(engine.readout(), Readout::Error);
        assert!(matches!(
            engine.last_error(),
            Some(CalcError::DomainError(_))
        ));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(value(&[Digit(4), Inverse]), 0.25);
    }

    #[test]
    fn test_inverse_of_zero_latches_error() {
        assert!(run(&[Digit(0), Inverse]).is_error());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(value(&[Digit(4), Factorial]), 24.0);
    }

    #[test]
    fn test_factorial_of_fraction_latches_error() {
        assert!(run(&[Digit(2), DecimalPoint, Digit(5), Factorial]).is_error());
    }

    // ===== Constants =====

    #[test]
    fn test_constant_leaves_previous_register() {
        let engine = run(&[Digit(2), Add, Pi]);
        assert_eq!(engine.accumulator(), std::f64::consts::PI);
        assert_eq!(engine.previous(), 0.0);
        assert_eq!(value(&[Digit(2), Add, Pi, Equals]), std::f64::consts::PI);
    }

    #[test]
    fn test_constant_matches_unary_contract() {
        let square = run(&[Digit(2), Add, Square]);
        let pi = run(&[Digit(2), Add, Pi]);
        assert_eq!(pi.previous(), square.previous());
        assert_eq!(pi.pending(), square.pending());
    }

    #[test]
    fn test_constant_commits_entry_first() {
        let engine = run(&[Digit(2), Add, Digit(5), Euler]);
        assert!(engine.entry().is_none());
        assert_eq!(engine.previous(), 2.0);
        assert_eq!(engine.accumulator(), std::f64::consts::E);

        let result = value(&[Digit(2), Add, Digit(5), Pi, Equals]);
        assert_eq!(result, 2.0 + std::f64::consts::PI);
    }

    // ===== Binary operators =====

    #[test]
    fn test_each_binary_operator() {
        assert_eq!(value(&[Digit(9), Add, Digit(3), Equals]), 12.0);
        assert_eq!(value(&[Digit(9), Subtract, Digit(3), Equals]), 6.0);
        assert_eq!(value(&[Digit(9), Multiply, Digit(3), Equals]), 27.0);
        assert_eq!(value(&[Digit(9), Divide, Digit(3), Equals]), 3.0);
    }

    #[test]
    fn test_chain_evaluates_left_to_right() {
        assert_eq!(
            value(&[Digit(1), Add, Digit(2), Add, Digit(3), Equals]),
            6.0
        );
        assert_eq!(
            value(&[Digit(2), Add, Digit(3), Multiply, Digit(4), Equals]),
            20.0
        );
    }

    #[test]
    fn test_operator_shows_intermediate_result() {
        let engine = run(&[Digit(2), Add, Digit(3), Multiply]);
        assert_eq!(engine.readout(), Readout::Value(5.0));
        assert_eq!(engine.pending(), Some(BinaryOperator::Multiply));
    }

    #[test]
    fn test_equals_clears_pending() {
        let engine = run(&[Digit(2), Add, Digit(3), Equals]);
        assert!(engine.pending().is_none());
        let mut engine = engine;
        engine.apply(Equals);
        assert_eq!(engine.readout(), Readout::Value(5.0));
    }

    #[test]
    fn test_equals_without_pending_commits() {
        let engine = run(&[Digit(6), Equals]);
        assert_eq!(engine.readout(), Readout::Value(6.0));
        assert!(engine.entry().is_none());
    }

    #[test]
    fn test_commit_saves_previous_register() {
        let engine = run(&[Digit(6), Add, Digit(4)]);
        assert_eq!(engine.accumulator(), 6.0);
        let mut engine = engine;
        engine.apply(Equals);
        assert_eq!(engine.previous(), 6.0);
        assert_eq!(engine.accumulator(), 10.0);
    }

    // ===== Error latch =====

    #[test]
    fn test_division_by_zero_latches() {
        let mut engine = run(&[Digit(5), Divide, Digit(0), Equals]);
        assert_eq!(engine.readout(), Readout::Error);
        assert_eq!(engine.last_error(), Some(&CalcError::DivisionByZero));

        engine.apply(Digit(1));
        assert_eq!(engine.readout(), Readout::Error);

        engine.apply(Reset);
        assert_eq!(engine.readout(), Readout::Value(0.0));
        assert!(!engine.is_error());
    }

    #[test]
    fn test_error_ignores_every_operation() {
        let mut engine = run(&[Digit(5), Divide, Digit(0), Equals]);
        for op in Operation::NON_DIGIT {
            if op == Reset {
                continue;
            }
            engine.apply(op);
            assert_eq!(engine.readout(), Readout::Error, "{op:?} escaped the latch");
        }
    }

    #[test]
    fn test_reset_method_matches_operation() {
        let mut engine = run(&[Digit(5), Add, Digit(2)]);
        engine.reset();
        assert_eq!(engine.readout(), Readout::Value(0.0));
        assert!(engine.pending().is_none());
        assert_eq!(engine.previous(), 0.0);
    }
}
