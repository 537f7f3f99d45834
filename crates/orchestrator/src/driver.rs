use crate::handle::SymbolHandle;
use anyhow::{Context, Result};
use arbiter_core::{ArbitrationResult, MandateSource, SnapshotSource};

/// Drives one symbol's cycles from a snapshot source and a proposal source.
///
/// Each pulled snapshot becomes exactly one kernel cycle on the actor; the
/// driver stops when the snapshot stream ends and propagates the first hard
/// fault without retrying — a declared failure is terminal.
pub struct CycleDriver<S, M>
where
    S: SnapshotSource,
    M: MandateSource,
{
    snapshots: S,
    proposals: M,
    handle: SymbolHandle,
}

impl<S, M> CycleDriver<S, M>
where
    S: SnapshotSource,
    M: MandateSource,
{
    pub fn new(snapshots: S, proposals: M, handle: SymbolHandle) -> Self {
        Self {
            snapshots,
            proposals,
            handle,
        }
    }

    /// Runs cycles until the snapshot stream is exhausted.
    ///
    /// # Errors
    /// Returns the first hard fault: a halted upstream signal, an illegal
    /// transition, or an unreachable actor.
    pub async fn run(&mut self) -> Result<Vec<ArbitrationResult>> {
        let mut results = Vec::new();

        while let Some(snapshot) = self.snapshots.next_snapshot().await? {
            let mandates = self
                .proposals
                .propose(&snapshot)
                .await
                .with_context(|| format!("proposal source {} failed", self.proposals.name()))?;

            let result = self.handle.evaluate(snapshot, mandates).await?;
            results.push(result);
        }

        Ok(results)
    }
}
