use crate::commands::SymbolCommand;
use crate::events::{CycleEvent, SymbolStatus};
use anyhow::{Context, Result};
use arbiter_core::{ArbitrationResult, ExecutionOutcome, FactSnapshot, Mandate, Position, PositionState};
use tokio::sync::{broadcast, mpsc, oneshot, watch};

/// Cloneable handle to one symbol actor.
#[derive(Debug, Clone)]
pub struct SymbolHandle {
    tx: mpsc::Sender<SymbolCommand>,
    event_tx: broadcast::Sender<CycleEvent>,
    status_rx: watch::Receiver<SymbolStatus>,
}

impl SymbolHandle {
    /// Creates a new handle from the actor's channels.
    #[must_use]
    pub const fn new(
        tx: mpsc::Sender<SymbolCommand>,
        event_tx: broadcast::Sender<CycleEvent>,
        status_rx: watch::Receiver<SymbolStatus>,
    ) -> Self {
        Self {
            tx,
            event_tx,
            status_rx,
        }
    }

    /// Runs one kernel cycle on the actor and returns its result.
    ///
    /// # Errors
    /// Returns an error if the actor is unreachable, has faulted, or the
    /// cycle itself aborted.
    pub async fn evaluate(
        &self,
        snapshot: FactSnapshot,
        mandates: Vec<Mandate>,
    ) -> Result<ArbitrationResult> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SymbolCommand::Evaluate {
                snapshot,
                mandates,
                reply,
            })
            .await
            .context("symbol actor unavailable")?;
        rx.await.context("symbol actor dropped the reply")?
    }

    /// Applies an externally confirmed execution outcome.
    ///
    /// # Errors
    /// Returns an error if the actor is unreachable or the outcome is
    /// illegal for the current lifecycle state.
    pub async fn apply_outcome(&self, outcome: ExecutionOutcome) -> Result<PositionState> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SymbolCommand::ApplyOutcome { outcome, reply })
            .await
            .context("symbol actor unavailable")?;
        rx.await.context("symbol actor dropped the reply")?
    }

    /// Returns a snapshot of the actor's position record.
    ///
    /// # Errors
    /// Returns an error if the actor is unreachable.
    pub async fn position(&self) -> Result<Position> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SymbolCommand::GetPosition(reply))
            .await
            .context("symbol actor unavailable")?;
        rx.await.context("symbol actor dropped the reply")
    }

    /// Subscribes to the actor's cycle event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CycleEvent> {
        self.event_tx.subscribe()
    }

    /// Returns the most recently published status.
    #[must_use]
    pub fn latest_status(&self) -> SymbolStatus {
        self.status_rx.borrow().clone()
    }

    /// Shuts the actor down.
    ///
    /// # Errors
    /// Returns an error if the command cannot be sent.
    pub async fn shutdown(&self) -> Result<()> {
        self.tx.send(SymbolCommand::Shutdown).await?;
        Ok(())
    }
}
