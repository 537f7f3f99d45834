//! Boundary traits between the kernel and its external collaborators.
//!
//! The kernel itself is pure and synchronous; these seams are where the
//! surrounding system plugs in observation, proposal generation, and
//! execution.

use crate::action::{Action, ExecutionOutcome};
use crate::mandate::Mandate;
use crate::snapshot::FactSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Source of validated fact snapshots (the observation layer).
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Returns the next snapshot, or `None` when the stream is exhausted.
    async fn next_snapshot(&mut self) -> Result<Option<FactSnapshot>>;
}

/// The pluggable, stateless proposal layer: turns a snapshot into candidate
/// mandates for one cycle.
#[async_trait]
pub trait MandateSource: Send + Sync {
    /// Proposes zero or more mandates for the snapshot's symbol.
    async fn propose(&mut self, snapshot: &FactSnapshot) -> Result<Vec<Mandate>>;

    /// Returns the name of this proposal source.
    fn name(&self) -> &str;
}

/// Downstream execution: submits the authorized action and reports the
/// confirmed outcome.
#[async_trait]
pub trait ExecutionRoute: Send + Sync {
    async fn submit(&mut self, symbol: &str, action: Action) -> Result<ExecutionOutcome>;
}
