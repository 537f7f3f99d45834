use arbiter_core::{Action, ArbitrationResult, Position, PositionState};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Events streamed by a symbol actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CycleEvent {
    /// A kernel cycle completed and emitted its result.
    Decision(ArbitrationResult),

    /// An authorized action was handed to the execution route.
    ActionSubmitted { symbol: String, action: Action },

    /// The position record changed after a confirmed outcome.
    PositionUpdate {
        symbol: String,
        state: PositionState,
        quantity: Decimal,
    },

    /// The execution route reported a failure; the position stays at its
    /// transient state.
    ExecutionFailed { symbol: String, reason: String },

    /// The actor hit an unrecoverable fault and refuses further cycles.
    Fault { symbol: String, message: String },
}

/// Lifecycle state of a symbol actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorState {
    Running,
    /// Terminal: the upstream observation signal declared a halt.
    Halted,
    /// Terminal: a kernel invariant was violated.
    Error,
    Stopped,
}

/// Latest published status for a symbol actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolStatus {
    pub symbol: String,
    pub state: ActorState,
    pub position: Position,
    pub last_heartbeat: DateTime<Utc>,
    pub error: Option<String>,
}

impl SymbolStatus {
    /// Initial status for a freshly spawned actor.
    #[must_use]
    pub fn initial(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            position: Position::new(symbol.clone()),
            symbol,
            state: ActorState::Running,
            last_heartbeat: Utc::now(),
            error: None,
        }
    }
}
