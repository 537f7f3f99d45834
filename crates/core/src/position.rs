//! Per-symbol position lifecycle state machine.
//!
//! Exactly one `Position` record exists per symbol; it resets to flat rather
//! than disappearing. Transitions fire only on submitted actions and
//! confirmed execution outcomes. An attempted edge outside the lifecycle
//! graph is a hard invariant violation: the cycle aborts and the record is
//! left untouched.

use crate::action::{Action, ExecutionOutcome};
use crate::error::KernelError;
use crate::mandate::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Entering,
    Open,
    Reducing,
    Closing,
}

impl PositionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Entering => "entering",
            Self::Open => "open",
            Self::Reducing => "reducing",
            Self::Closing => "closing",
        }
    }

    /// Returns true for states awaiting an execution confirmation.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Entering | Self::Reducing | Self::Closing)
    }
}

/// One symbol's position record, owned exclusively by the kernel and mutated
/// only through [`Position::apply_submission`] and [`Position::apply_outcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub state: PositionState,
    /// Fixed from the entry submission until the lifecycle returns to flat.
    pub direction: Option<Direction>,
    /// Non-negative magnitude; strictly decreasing across confirmed
    /// reductions.
    pub quantity: Decimal,
}

impl Position {
    /// Creates a flat position record for a symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            state: PositionState::Flat,
            direction: None,
            quantity: Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn is_flat(&self) -> bool {
        matches!(self.state, PositionState::Flat)
    }

    /// Requests the lifecycle edge for a submitted action.
    ///
    /// `NoAction` leaves the record untouched. The legal edges are:
    /// entry `Flat -> Entering` (fixing the direction), exit
    /// `Entering | Open | Reducing -> Closing`, reduce
    /// `Open | Reducing -> Reducing`.
    ///
    /// # Errors
    /// `KernelError::IllegalTransition` when the action is incompatible with
    /// the current state; the record is not mutated.
    pub fn apply_submission(&mut self, action: Action) -> Result<PositionState, KernelError> {
        match (action, self.state) {
            (Action::NoAction, _) => Ok(self.state),
            (Action::Entry { direction }, PositionState::Flat) => {
                self.direction = Some(direction);
                self.state = PositionState::Entering;
                Ok(self.state)
            }
            (
                Action::Exit,
                PositionState::Entering | PositionState::Open | PositionState::Reducing,
            ) => {
                self.state = PositionState::Closing;
                Ok(self.state)
            }
            (Action::Reduce, PositionState::Open | PositionState::Reducing) => {
                self.state = PositionState::Reducing;
                Ok(self.state)
            }
            (action, state) => Err(KernelError::illegal_transition(state, action.as_str())),
        }
    }

    /// Applies a confirmed execution outcome.
    ///
    /// The legal edges are: entry confirmed `Entering -> Open` (positive
    /// quantity), partial reduce confirmed `Reducing -> Open` (remaining
    /// strictly between zero and the current quantity), exit confirmed
    /// `Closing -> Flat` (record reset). A failure outcome leaves the record
    /// at its transient state; the next cycle re-evaluates from there.
    ///
    /// # Errors
    /// `KernelError::IllegalTransition` for any other pairing, including a
    /// reduction that does not strictly decrease the quantity or a confirmed
    /// entry with non-positive quantity; the record is not mutated.
    pub fn apply_outcome(&mut self, outcome: &ExecutionOutcome) -> Result<PositionState, KernelError> {
        match (outcome, self.state) {
            (ExecutionOutcome::Failed { .. }, _) => Ok(self.state),
            (ExecutionOutcome::EntryConfirmed { quantity }, PositionState::Entering)
                if *quantity > Decimal::ZERO =>
            {
                self.quantity = *quantity;
                self.state = PositionState::Open;
                Ok(self.state)
            }
            (
                ExecutionOutcome::ReduceConfirmed { remaining_quantity },
                PositionState::Reducing,
            ) if *remaining_quantity > Decimal::ZERO && *remaining_quantity < self.quantity => {
                self.quantity = *remaining_quantity;
                self.state = PositionState::Open;
                Ok(self.state)
            }
            (ExecutionOutcome::ExitConfirmed, PositionState::Closing) => {
                self.quantity = Decimal::ZERO;
                self.direction = None;
                self.state = PositionState::Flat;
                Ok(self.state)
            }
            (outcome, state) => Err(KernelError::illegal_transition(state, outcome.as_str())),
        }
    }
}
