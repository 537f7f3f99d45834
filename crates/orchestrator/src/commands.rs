use anyhow::Result;
use arbiter_core::{
    ArbitrationResult, ExecutionOutcome, FactSnapshot, Mandate, Position, PositionState,
    RiskLimits,
};
use tokio::sync::oneshot;

/// Commands accepted by a symbol actor.
#[derive(Debug)]
pub enum SymbolCommand {
    /// Run one kernel cycle. When the result is actionable the actor applies
    /// the submission edge, routes the action to execution, and writes back
    /// the confirmed outcome before replying.
    Evaluate {
        snapshot: FactSnapshot,
        mandates: Vec<Mandate>,
        reply: oneshot::Sender<Result<ArbitrationResult>>,
    },
    /// Apply an externally confirmed execution outcome to the position.
    ApplyOutcome {
        outcome: ExecutionOutcome,
        reply: oneshot::Sender<Result<PositionState>>,
    },
    GetPosition(oneshot::Sender<Position>),
    Shutdown,
}

/// Configuration for spawning one symbol actor.
#[derive(Debug, Clone)]
pub struct SymbolConfig {
    pub symbol: String,
    pub limits: RiskLimits,
    pub command_buffer: usize,
    pub event_buffer: usize,
}

impl SymbolConfig {
    /// Creates a config with default channel capacities.
    #[must_use]
    pub fn new(symbol: impl Into<String>, limits: RiskLimits) -> Self {
        Self {
            symbol: symbol.into(),
            limits,
            command_buffer: 32,
            event_buffer: 1024,
        }
    }
}
