//! Integration tests for the per-symbol actor runtime.
//!
//! These drive full evaluate -> submit -> confirm lifecycles through a
//! registry-spawned actor with a scripted execution route, and verify the
//! terminal behavior on upstream halts.

use anyhow::Result;
use arbiter_core::{
    AccountState, Action, Direction, ExecutionOutcome, FactSnapshot, Mandate, MandateSource,
    PositionState, RiskLimits, SizingInputs, SnapshotSource,
};
use arbiter_orchestrator::{
    ActorState, CycleDriver, CycleEvent, RecordedRoute, SymbolConfig, SymbolRegistry,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use std::collections::VecDeque;

fn usable_snapshot() -> FactSnapshot {
    FactSnapshot::new("BTC", Utc::now())
        .with_mark_price(dec!(100))
        .with_sizing(SizingInputs {
            entry_quantity: Some(dec!(10)),
            reduce_quantity: Some(dec!(4)),
            projected_liquidation_price: Some(dec!(40)),
        })
        .with_account(AccountState {
            equity: dec!(100000),
            ..AccountState::default()
        })
}

async fn spawn_with_route(
    registry: &SymbolRegistry,
    route: RecordedRoute,
) -> arbiter_orchestrator::SymbolHandle {
    registry
        .spawn_symbol(
            SymbolConfig::new("BTC", RiskLimits::default()),
            Box::new(route),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn entry_cycle_confirms_and_opens_the_position() {
    let registry = SymbolRegistry::new();
    let route = RecordedRoute::new(vec![ExecutionOutcome::EntryConfirmed { quantity: dec!(10) }]);
    let handle = spawn_with_route(&registry, route).await;

    let result = handle
        .evaluate(usable_snapshot(), vec![Mandate::entry(Direction::Long, "e1")])
        .await
        .unwrap();
    assert_eq!(
        result.selected_action,
        Action::Entry {
            direction: Direction::Long
        }
    );

    let position = handle.position().await.unwrap();
    assert_eq!(position.state, PositionState::Open);
    assert_eq!(position.quantity, dec!(10));
    assert_eq!(position.direction, Some(Direction::Long));
}

#[tokio::test]
async fn failed_execution_keeps_the_transient_state() {
    let registry = SymbolRegistry::new();
    let route = RecordedRoute::new(vec![ExecutionOutcome::Failed {
        reason: "venue rejected".to_string(),
    }]);
    let handle = spawn_with_route(&registry, route).await;

    handle
        .evaluate(usable_snapshot(), vec![Mandate::entry(Direction::Long, "e1")])
        .await
        .unwrap();

    // No rollback: the position stays at the transient entering state and
    // the next cycle evaluates from there.
    let position = handle.position().await.unwrap();
    assert_eq!(position.state, PositionState::Entering);

    let result = handle
        .evaluate(usable_snapshot(), vec![Mandate::exit("bail")])
        .await
        .unwrap();
    assert_eq!(result.selected_action, Action::Exit);
}

#[tokio::test]
async fn halted_snapshot_makes_the_actor_terminal() {
    let registry = SymbolRegistry::new();
    let handle = spawn_with_route(&registry, RecordedRoute::empty()).await;

    let halted = FactSnapshot::halted("BTC", Utc::now());
    assert!(handle.evaluate(halted, Vec::new()).await.is_err());

    let status = handle.latest_status();
    assert_eq!(status.state, ActorState::Halted);
    assert!(status.error.is_some());

    // Terminal: even a usable snapshot is refused afterwards.
    assert!(handle
        .evaluate(usable_snapshot(), vec![Mandate::exit("x1")])
        .await
        .is_err());
}

#[tokio::test]
async fn decision_and_position_events_are_broadcast() {
    let registry = SymbolRegistry::new();
    let route = RecordedRoute::new(vec![ExecutionOutcome::EntryConfirmed { quantity: dec!(10) }]);
    let handle = spawn_with_route(&registry, route).await;
    let mut events = handle.subscribe();

    handle
        .evaluate(usable_snapshot(), vec![Mandate::entry(Direction::Long, "e1")])
        .await
        .unwrap();

    let decision = events.recv().await.unwrap();
    assert!(matches!(decision, CycleEvent::Decision(_)));
    let submitted = events.recv().await.unwrap();
    assert!(matches!(submitted, CycleEvent::ActionSubmitted { .. }));
    let update = events.recv().await.unwrap();
    match update {
        CycleEvent::PositionUpdate { state, quantity, .. } => {
            assert_eq!(state, PositionState::Open);
            assert_eq!(quantity, dec!(10));
        }
        other => panic!("expected position update, got {other:?}"),
    }
}

#[tokio::test]
async fn external_outcome_write_back_closes_the_lifecycle() {
    let registry = SymbolRegistry::new();
    // Entry confirms via the route; the exit confirmation arrives externally.
    let route = RecordedRoute::new(vec![
        ExecutionOutcome::EntryConfirmed { quantity: dec!(10) },
        ExecutionOutcome::Failed {
            reason: "fill pending".to_string(),
        },
    ]);
    let handle = spawn_with_route(&registry, route).await;

    handle
        .evaluate(usable_snapshot(), vec![Mandate::entry(Direction::Long, "e1")])
        .await
        .unwrap();
    handle
        .evaluate(usable_snapshot(), vec![Mandate::exit("x1")])
        .await
        .unwrap();
    assert_eq!(
        handle.position().await.unwrap().state,
        PositionState::Closing
    );

    let state = handle
        .apply_outcome(ExecutionOutcome::ExitConfirmed)
        .await
        .unwrap();
    assert_eq!(state, PositionState::Flat);
}

// =============================================================================
// Driver composition
// =============================================================================

struct ScriptedSnapshots {
    queue: VecDeque<FactSnapshot>,
}

#[async_trait]
impl SnapshotSource for ScriptedSnapshots {
    async fn next_snapshot(&mut self) -> Result<Option<FactSnapshot>> {
        Ok(self.queue.pop_front())
    }
}

struct ScriptedProposals {
    queue: VecDeque<Vec<Mandate>>,
}

#[async_trait]
impl MandateSource for ScriptedProposals {
    async fn propose(&mut self, _snapshot: &FactSnapshot) -> Result<Vec<Mandate>> {
        Ok(self.queue.pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn driver_runs_one_cycle_per_snapshot() {
    let registry = SymbolRegistry::new();
    let route = RecordedRoute::new(vec![
        ExecutionOutcome::EntryConfirmed { quantity: dec!(10) },
        ExecutionOutcome::ExitConfirmed,
    ]);
    let handle = spawn_with_route(&registry, route).await;

    let snapshots = ScriptedSnapshots {
        queue: VecDeque::from(vec![usable_snapshot(), usable_snapshot(), usable_snapshot()]),
    };
    let proposals = ScriptedProposals {
        queue: VecDeque::from(vec![
            vec![Mandate::entry(Direction::Long, "e1")],
            vec![Mandate::hold("h1")],
            vec![Mandate::exit("x1")],
        ]),
    };

    let mut driver = CycleDriver::new(snapshots, proposals, handle.clone());
    let results = driver.run().await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].selected_action,
        Action::Entry {
            direction: Direction::Long
        }
    );
    assert_eq!(results[1].selected_action, Action::NoAction);
    assert_eq!(results[2].selected_action, Action::Exit);
    assert!(handle.position().await.unwrap().is_flat());
}

#[tokio::test]
async fn driver_stops_on_upstream_halt() {
    let registry = SymbolRegistry::new();
    let handle = spawn_with_route(&registry, RecordedRoute::empty()).await;

    let snapshots = ScriptedSnapshots {
        queue: VecDeque::from(vec![
            FactSnapshot::halted("BTC", Utc::now()),
            usable_snapshot(),
        ]),
    };
    let proposals = ScriptedProposals {
        queue: VecDeque::new(),
    };

    let mut driver = CycleDriver::new(snapshots, proposals, handle);
    assert!(driver.run().await.is_err());
}
