//! The execution-action contract between arbitration and the execution layer.

use crate::mandate::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The single authorized action of a cycle.
///
/// `NoAction` is an explicit sentinel, not the absence of a result: the
/// kernel emits one of these four every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Entry { direction: Direction },
    Exit,
    Reduce,
    NoAction,
}

impl Action {
    /// Returns true if the action requests anything of the execution layer.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        !matches!(self, Self::NoAction)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry { .. } => "entry",
            Self::Exit => "exit",
            Self::Reduce => "reduce",
            Self::NoAction => "no-action",
        }
    }
}

/// A confirmed execution outcome — the only trigger for lifecycle
/// transitions. Elapsed time and inference never move the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// Entry filled; the position opens with the filled quantity.
    EntryConfirmed { quantity: Decimal },
    /// Partial reduction filled; the position re-opens with the remaining
    /// quantity, which must be strictly positive and strictly smaller.
    ReduceConfirmed { remaining_quantity: Decimal },
    /// Exit filled; the lifecycle returns to flat.
    ExitConfirmed,
    /// Execution failed. The position stays at its transient state and the
    /// next cycle re-evaluates from there — there is no rollback.
    Failed { reason: String },
}

impl ExecutionOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntryConfirmed { .. } => "entry-confirmed",
            Self::ReduceConfirmed { .. } => "reduce-confirmed",
            Self::ExitConfirmed => "exit-confirmed",
            Self::Failed { .. } => "failed",
        }
    }
}
