//! Kernel error taxonomy.
//!
//! Only unrecoverable faults surface as errors: an illegal lifecycle
//! transition or a halted upstream signal aborts the cycle with no partial
//! result. Locally-recovered faults (malformed mandates, unevaluable risk)
//! are discard reasons on the arbitration result, not errors.

use crate::position::PositionState;
use thiserror::Error;

/// Unrecoverable kernel faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// An action or outcome was matched against a lifecycle state outside
    /// the compatibility table. The position is not mutated.
    #[error("illegal transition: {attempted} from {state:?}")]
    IllegalTransition {
        state: PositionState,
        attempted: String,
    },

    /// The observation layer reported a non-usable state. No mandates are
    /// evaluated for the symbol this cycle and no cached or default data is
    /// substituted.
    #[error("upstream halted for {symbol}")]
    UpstreamHalted { symbol: String },

    /// An input was evaluated against a position for a different symbol.
    #[error("symbol mismatch: position {expected}, input {got}")]
    SymbolMismatch { expected: String, got: String },
}

impl KernelError {
    pub fn illegal_transition(state: PositionState, attempted: impl Into<String>) -> Self {
        Self::IllegalTransition {
            state,
            attempted: attempted.into(),
        }
    }

    pub fn upstream_halted(symbol: impl Into<String>) -> Self {
        Self::UpstreamHalted {
            symbol: symbol.into(),
        }
    }

    pub fn symbol_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::SymbolMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Returns true for the terminal upstream-halt condition.
    #[must_use]
    pub const fn is_upstream_halt(&self) -> bool {
        matches!(self, Self::UpstreamHalted { .. })
    }
}
