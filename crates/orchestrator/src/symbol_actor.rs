use crate::commands::SymbolCommand;
use crate::events::{ActorState, CycleEvent, SymbolStatus};
use anyhow::{Context, Result};
use arbiter_core::{
    ArbitrationResult, ExecutionOutcome, ExecutionRoute, FactSnapshot, KernelError, Mandate,
    Position, PositionState, RiskLimits,
};
use arbiter_kernel::evaluate_cycle;
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, watch};

/// One actor per symbol, exclusively owning that symbol's position record.
///
/// The per-symbol exclusive-write discipline is ownership: the position lives
/// inside the actor task, every cycle reads it in place, and only confirmed
/// execution outcomes mutate it. Actors for different symbols share nothing
/// and run on independent tasks.
pub struct SymbolActor {
    position: Position,
    limits: RiskLimits,
    route: Box<dyn ExecutionRoute>,
    rx: mpsc::Receiver<SymbolCommand>,
    event_tx: broadcast::Sender<CycleEvent>,
    status_tx: watch::Sender<SymbolStatus>,
    state: ActorState,
    fault: Option<String>,
}

impl SymbolActor {
    /// Creates a new symbol actor with a flat position.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        limits: RiskLimits,
        route: Box<dyn ExecutionRoute>,
        rx: mpsc::Receiver<SymbolCommand>,
        event_tx: broadcast::Sender<CycleEvent>,
        status_tx: watch::Sender<SymbolStatus>,
    ) -> Self {
        Self {
            position: Position::new(symbol),
            limits,
            route,
            rx,
            event_tx,
            status_tx,
            state: ActorState::Running,
            fault: None,
        }
    }

    /// Runs the actor until shutdown or channel close.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Symbol actor {} started", self.position.symbol);

        while let Some(command) = self.rx.recv().await {
            match command {
                SymbolCommand::Evaluate {
                    snapshot,
                    mandates,
                    reply,
                } => {
                    let result = self.handle_evaluate(snapshot, mandates).await;
                    // Status must be current before the caller observes the
                    // reply.
                    self.publish_status();
                    let _ = reply.send(result);
                }
                SymbolCommand::ApplyOutcome { outcome, reply } => {
                    let result = self.handle_outcome(&outcome);
                    self.publish_status();
                    let _ = reply.send(result);
                }
                SymbolCommand::GetPosition(reply) => {
                    let _ = reply.send(self.position.clone());
                }
                SymbolCommand::Shutdown => {
                    self.state = ActorState::Stopped;
                    self.publish_status();
                    break;
                }
            }
        }

        tracing::info!("Symbol actor {} stopped", self.position.symbol);
        Ok(())
    }

    /// Runs one kernel cycle and drives any authorized action through the
    /// execution route.
    async fn handle_evaluate(
        &mut self,
        snapshot: FactSnapshot,
        mandates: Vec<Mandate>,
    ) -> Result<ArbitrationResult> {
        if let Some(fault) = &self.fault {
            anyhow::bail!("symbol {} refuses evaluation: {fault}", self.position.symbol);
        }

        let result = match evaluate_cycle(&self.position, &snapshot, mandates, &self.limits) {
            Ok(result) => result,
            Err(err) => {
                self.record_fault(&err);
                return Err(err).context("kernel cycle aborted");
            }
        };

        let _ = self.event_tx.send(CycleEvent::Decision(result.clone()));

        if result.selected_action.is_actionable() {
            if let Err(err) = self.position.apply_submission(result.selected_action) {
                self.record_fault(&err);
                return Err(err).context("submission edge rejected");
            }
            let _ = self.event_tx.send(CycleEvent::ActionSubmitted {
                symbol: self.position.symbol.clone(),
                action: result.selected_action,
            });

            match self.route.submit(&self.position.symbol, result.selected_action).await {
                Ok(outcome) => {
                    self.handle_outcome(&outcome)?;
                }
                Err(err) => {
                    // The position stays at its transient state; the next
                    // cycle re-evaluates from there.
                    tracing::warn!(
                        "execution route failed for {}: {err:#}",
                        self.position.symbol
                    );
                    let _ = self.event_tx.send(CycleEvent::ExecutionFailed {
                        symbol: self.position.symbol.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }

    /// Applies a confirmed outcome to the position record — the sole
    /// mutation point after submission.
    fn handle_outcome(&mut self, outcome: &ExecutionOutcome) -> Result<PositionState> {
        if let Some(fault) = &self.fault {
            anyhow::bail!("symbol {} refuses outcome: {fault}", self.position.symbol);
        }

        if let ExecutionOutcome::Failed { reason } = outcome {
            tracing::warn!(
                "execution failed for {}, position stays {}: {reason}",
                self.position.symbol,
                self.position.state.as_str()
            );
            let _ = self.event_tx.send(CycleEvent::ExecutionFailed {
                symbol: self.position.symbol.clone(),
                reason: reason.clone(),
            });
            return Ok(self.position.state);
        }

        match self.position.apply_outcome(outcome) {
            Ok(state) => {
                let _ = self.event_tx.send(CycleEvent::PositionUpdate {
                    symbol: self.position.symbol.clone(),
                    state,
                    quantity: self.position.quantity,
                });
                Ok(state)
            }
            Err(err) => {
                self.record_fault(&err);
                Err(err).context("confirmed outcome rejected")
            }
        }
    }

    fn record_fault(&mut self, err: &KernelError) {
        tracing::error!("symbol {} faulted: {err}", self.position.symbol);
        self.state = if err.is_upstream_halt() {
            ActorState::Halted
        } else {
            ActorState::Error
        };
        self.fault = Some(err.to_string());
        let _ = self.event_tx.send(CycleEvent::Fault {
            symbol: self.position.symbol.clone(),
            message: err.to_string(),
        });
    }

    fn publish_status(&self) {
        let _ = self.status_tx.send(SymbolStatus {
            symbol: self.position.symbol.clone(),
            state: self.state,
            position: self.position.clone(),
            last_heartbeat: Utc::now(),
            error: self.fault.clone(),
        });
    }
}
