//! Risk invariant gate: veto-only exposure checks for entry and reduce
//! candidates.
//!
//! The gate projects post-execution exposure and checks it against every
//! configured limit. A single failing check vetoes the mandate outright —
//! there is no partial approval and no down-sizing here; sizing adjustment
//! happens strictly downstream in execution. Exposure that cannot be
//! computed deterministically vetoes the mandate as unevaluable, never
//! optimistically admits it.
//!
//! Exit, block, and hold mandates are never gated: exits must always be
//! reachable.

use arbiter_core::{FactSnapshot, LimitName, MandateType, Position, RiskLimits};
use rust_decimal::Decimal;

/// Checks one surviving mandate against the configured limits.
///
/// # Errors
/// Returns the name of the first limit whose check fails, in the fixed
/// order: position size, aggregate exposure, correlated exposure, leverage,
/// liquidation buffer, then (entries only) daily loss, weekly loss,
/// consecutive losses.
pub fn assess(
    mandate_type: MandateType,
    position: &Position,
    snapshot: &FactSnapshot,
    limits: &RiskLimits,
) -> Result<(), LimitName> {
    match mandate_type {
        MandateType::Entry => assess_entry(snapshot, limits),
        MandateType::Reduce => assess_reduce(position, snapshot, limits),
        MandateType::Exit | MandateType::Hold | MandateType::Block => Ok(()),
    }
}

fn assess_entry(snapshot: &FactSnapshot, limits: &RiskLimits) -> Result<(), LimitName> {
    let mark = positive(snapshot.mark_price)?;
    let quantity = positive(snapshot.sizing.entry_quantity)?;
    let notional = quantity * mark;
    let account = &snapshot.account;

    check_exposure(
        notional,
        account.aggregate_notional + notional,
        account.correlated_notional + notional,
        account.equity,
        mark,
        snapshot.sizing.projected_liquidation_price,
        limits,
    )?;

    if account.realized_loss_day >= limits.max_daily_loss {
        return Err(LimitName::DailyLoss);
    }
    if account.realized_loss_week >= limits.max_weekly_loss {
        return Err(LimitName::WeeklyLoss);
    }
    if account.consecutive_losses >= limits.max_consecutive_losses {
        return Err(LimitName::ConsecutiveLosses);
    }
    Ok(())
}

fn assess_reduce(
    position: &Position,
    snapshot: &FactSnapshot,
    limits: &RiskLimits,
) -> Result<(), LimitName> {
    let mark = positive(snapshot.mark_price)?;
    let shaved = positive(snapshot.sizing.reduce_quantity)?;
    // A reduction must leave a strictly positive remainder; full closure
    // travels the exit path.
    if shaved >= position.quantity {
        return Err(LimitName::Unevaluable);
    }

    let remaining_notional = (position.quantity - shaved) * mark;
    let shaved_notional = shaved * mark;
    let account = &snapshot.account;

    check_exposure(
        remaining_notional,
        (account.aggregate_notional - shaved_notional).max(Decimal::ZERO),
        (account.correlated_notional - shaved_notional).max(Decimal::ZERO),
        account.equity,
        mark,
        snapshot.sizing.projected_liquidation_price,
        limits,
    )
}

/// The five exposure checks shared by entries and reductions.
#[allow(clippy::too_many_arguments)]
fn check_exposure(
    position_notional: Decimal,
    aggregate_notional: Decimal,
    correlated_notional: Decimal,
    equity: Decimal,
    mark: Decimal,
    projected_liquidation_price: Option<Decimal>,
    limits: &RiskLimits,
) -> Result<(), LimitName> {
    if position_notional > limits.max_position_notional {
        return Err(LimitName::PositionSize);
    }
    if aggregate_notional > limits.max_aggregate_notional {
        return Err(LimitName::AggregateExposure);
    }
    if correlated_notional > limits.max_correlated_notional {
        return Err(LimitName::CorrelatedExposure);
    }

    if equity <= Decimal::ZERO {
        return Err(LimitName::Unevaluable);
    }
    if aggregate_notional / equity > limits.max_leverage {
        return Err(LimitName::Leverage);
    }

    let Some(liquidation_price) = projected_liquidation_price else {
        return Err(LimitName::Unevaluable);
    };
    let buffer = (mark - liquidation_price).abs() / mark;
    if buffer < limits.min_liquidation_buffer_pct {
        return Err(LimitName::LiquidationBuffer);
    }

    Ok(())
}

fn positive(value: Option<Decimal>) -> Result<Decimal, LimitName> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(LimitName::Unevaluable),
    }
}
