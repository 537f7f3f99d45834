//! One kernel cycle: the staged pipeline from proposed mandates to a single
//! authorized action.
//!
//! Stages run strictly in order — halt gate, boundary validation,
//! admissibility, expiry, risk gate, arbitration — and every stage only
//! narrows the candidate set. The cycle is pure computation over
//! already-resolved inputs; it performs no I/O and never suspends.

use crate::admissibility::is_admissible;
use crate::arbitration::arbitrate;
use crate::risk_gate;
use arbiter_core::{
    ArbitrationResult, DiscardReason, DiscardedMandate, FactSnapshot, KernelError, Mandate,
    Position, RiskLimits,
};

/// Evaluates one cycle for one symbol.
///
/// Always emits a result, including an explicit no-action result, unless the
/// cycle itself is unevaluable: a halted upstream signal or mismatched
/// symbol aborts with no partial output and no position mutation.
///
/// # Errors
/// `KernelError::UpstreamHalted` when the snapshot is not usable;
/// `KernelError::SymbolMismatch` when the snapshot does not belong to the
/// position's symbol.
pub fn evaluate_cycle(
    position: &Position,
    snapshot: &FactSnapshot,
    mandates: Vec<Mandate>,
    limits: &RiskLimits,
) -> Result<ArbitrationResult, KernelError> {
    if !snapshot.is_usable() {
        return Err(KernelError::upstream_halted(snapshot.symbol.clone()));
    }
    if snapshot.symbol != position.symbol {
        return Err(KernelError::symbol_mismatch(
            position.symbol.clone(),
            snapshot.symbol.clone(),
        ));
    }

    let input_mandates = mandates.clone();
    let mut discarded = Vec::new();
    let mut survivors = Vec::new();

    for mandate in mandates {
        if let Err(defect) = mandate.validate() {
            discarded.push(DiscardedMandate {
                mandate,
                reason: DiscardReason::Malformed { defect },
            });
            continue;
        }
        if !is_admissible(position.state, mandate.mandate_type) {
            discarded.push(DiscardedMandate {
                mandate,
                reason: DiscardReason::InadmissibleForState,
            });
            continue;
        }
        if mandate.expiry.holds(snapshot) {
            discarded.push(DiscardedMandate {
                mandate,
                reason: DiscardReason::Expired,
            });
            continue;
        }
        if let Err(limit) = risk_gate::assess(mandate.mandate_type, position, snapshot, limits) {
            tracing::warn!(
                "risk gate vetoed {} mandate {} on {}: {}",
                mandate.mandate_type.as_str(),
                mandate.trigger_id,
                snapshot.symbol,
                limit.as_str()
            );
            discarded.push(DiscardedMandate {
                mandate,
                reason: DiscardReason::RiskVetoed { limit },
            });
            continue;
        }
        survivors.push(mandate);
    }

    let resolution = arbitrate(survivors);
    discarded.extend(resolution.suppressed.into_iter().map(|mandate| DiscardedMandate {
        mandate,
        reason: DiscardReason::ConflictSuppressed,
    }));

    tracing::info!(
        "{} cycle from {}: {} ({} of {} mandates discarded)",
        snapshot.symbol,
        position.state.as_str(),
        resolution.selected_action.as_str(),
        discarded.len(),
        input_mandates.len()
    );

    Ok(ArbitrationResult {
        symbol: snapshot.symbol.clone(),
        position_state_before: position.state,
        input_mandates,
        discarded,
        selected_action: resolution.selected_action,
        selected_trigger: resolution.selected_trigger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::{
        Action, AccountState, Direction, ExecutionOutcome, LimitName, MandateDefect, MandateType,
        SizingInputs,
    };
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn snapshot() -> FactSnapshot {
        FactSnapshot::new("BTC", Utc::now())
            .with_mark_price(dec!(100))
            .with_sizing(SizingInputs {
                entry_quantity: Some(dec!(10)),
                reduce_quantity: Some(dec!(5)),
                projected_liquidation_price: Some(dec!(40)),
            })
            .with_account(AccountState {
                equity: dec!(50000),
                ..AccountState::default()
            })
    }

    fn open_position() -> Position {
        let mut position = Position::new("BTC");
        position
            .apply_submission(Action::Entry {
                direction: Direction::Long,
            })
            .unwrap();
        position
            .apply_outcome(&ExecutionOutcome::EntryConfirmed { quantity: dec!(10) })
            .unwrap();
        position
    }

    #[test]
    fn halted_snapshot_aborts_without_a_result() {
        let halted = FactSnapshot::halted("BTC", Utc::now());
        let err = evaluate_cycle(
            &Position::new("BTC"),
            &halted,
            vec![Mandate::exit("x1")],
            &RiskLimits::default(),
        )
        .unwrap_err();
        assert!(err.is_upstream_halt());
    }

    #[test]
    fn mismatched_symbol_is_a_hard_fault() {
        let err = evaluate_cycle(
            &Position::new("ETH"),
            &snapshot(),
            Vec::new(),
            &RiskLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::SymbolMismatch { .. }));
    }

    #[test]
    fn empty_mandate_set_still_emits_a_result() {
        let result = evaluate_cycle(
            &Position::new("BTC"),
            &snapshot(),
            Vec::new(),
            &RiskLimits::default(),
        )
        .unwrap();
        assert_eq!(result.selected_action, Action::NoAction);
        assert!(result.input_mandates.is_empty());
        assert!(result.discarded.is_empty());
    }

    #[test]
    fn malformed_mandate_is_dropped_not_fatal() {
        let broken = Mandate {
            mandate_type: MandateType::Entry,
            direction: None,
            trigger_id: "bad".to_string(),
            expiry: Default::default(),
        };
        let result = evaluate_cycle(
            &Position::new("BTC"),
            &snapshot(),
            vec![broken, Mandate::entry(Direction::Long, "good")],
            &RiskLimits::default(),
        )
        .unwrap();
        assert_eq!(
            result.discard_reason("bad"),
            Some(&DiscardReason::Malformed {
                defect: MandateDefect::MissingDirection
            })
        );
        assert_eq!(
            result.selected_action,
            Action::Entry {
                direction: Direction::Long
            }
        );
    }

    #[test]
    fn expired_mandate_is_discarded_before_ranking() {
        use arbiter_core::ExpiryCondition;

        // Expired exit must not exercise supremacy.
        let expired_exit =
            Mandate::exit("x1").with_expiry(ExpiryCondition::PriceAbove(dec!(50)));
        let result = evaluate_cycle(
            &open_position(),
            &snapshot(),
            vec![expired_exit, Mandate::reduce("r1")],
            &RiskLimits::default(),
        )
        .unwrap();
        assert_eq!(result.discard_reason("x1"), Some(&DiscardReason::Expired));
        assert_eq!(result.selected_action, Action::Reduce);
    }

    #[test]
    fn risk_veto_is_recorded_with_the_limit_name() {
        let mut tight = RiskLimits::default();
        tight.max_position_notional = dec!(100);
        let result = evaluate_cycle(
            &Position::new("BTC"),
            &snapshot(),
            vec![Mandate::entry(Direction::Long, "e1")],
            &tight,
        )
        .unwrap();
        assert_eq!(
            result.discard_reason("e1"),
            Some(&DiscardReason::RiskVetoed {
                limit: LimitName::PositionSize
            })
        );
        assert_eq!(result.selected_action, Action::NoAction);
    }

    #[test]
    fn every_input_mandate_is_accounted_for() {
        let result = evaluate_cycle(
            &open_position(),
            &snapshot(),
            vec![
                Mandate::exit("x1"),
                Mandate::reduce("r1"),
                Mandate::entry(Direction::Long, "e1"),
            ],
            &RiskLimits::default(),
        )
        .unwrap();
        assert_eq!(result.input_mandates.len(), 3);
        // One selected, the rest discarded.
        assert_eq!(result.discarded.len(), 2);
        assert_eq!(result.selected_action, Action::Exit);
        assert_eq!(result.selected_trigger.as_deref(), Some("x1"));
    }
}
