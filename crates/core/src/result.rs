//! Per-cycle arbitration result: the mandatory record of one decision.
//!
//! A result is emitted every cycle, including no-action cycles. Every input
//! mandate is accounted for — either it sourced the selected action or it
//! appears in `discarded` with a closed reason — so each decision is
//! reconstructable from mandates, position state, and static risk
//! configuration alone.

use crate::action::Action;
use crate::mandate::{Mandate, MandateDefect};
use crate::position::PositionState;
use serde::{Deserialize, Serialize};

/// Names the risk limit that vetoed a mandate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitName {
    PositionSize,
    AggregateExposure,
    CorrelatedExposure,
    Leverage,
    LiquidationBuffer,
    DailyLoss,
    WeeklyLoss,
    ConsecutiveLosses,
    /// Projected exposure could not be computed deterministically.
    Unevaluable,
}

impl LimitName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PositionSize => "position-size",
            Self::AggregateExposure => "aggregate-exposure",
            Self::CorrelatedExposure => "correlated-exposure",
            Self::Leverage => "leverage",
            Self::LiquidationBuffer => "liquidation-buffer",
            Self::DailyLoss => "daily-loss",
            Self::WeeklyLoss => "weekly-loss",
            Self::ConsecutiveLosses => "consecutive-losses",
            Self::Unevaluable => "unevaluable",
        }
    }
}

/// Why a mandate was dropped before or during arbitration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscardReason {
    /// The mandate type is outside the admissible set for the current
    /// position state.
    InadmissibleForState,
    /// The expiry predicate already held at arbitration time.
    Expired,
    /// The mandate failed schema validation at the boundary.
    Malformed { defect: MandateDefect },
    /// The risk gate vetoed the projected exposure.
    RiskVetoed { limit: LimitName },
    /// A higher-authority or same-type winner displaced the mandate.
    ConflictSuppressed,
}

/// A discarded mandate with its recorded reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscardedMandate {
    pub mandate: Mandate,
    pub reason: DiscardReason,
}

/// The output of one kernel cycle for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationResult {
    pub symbol: String,
    pub position_state_before: PositionState,
    /// The mandate set exactly as received, before any filtering.
    pub input_mandates: Vec<Mandate>,
    pub discarded: Vec<DiscardedMandate>,
    pub selected_action: Action,
    /// Trigger of the first input mandate of the winning type, when an
    /// action was selected.
    pub selected_trigger: Option<String>,
}

impl ArbitrationResult {
    /// Looks up the recorded discard reason for a trigger id.
    #[must_use]
    pub fn discard_reason(&self, trigger_id: &str) -> Option<&DiscardReason> {
        self.discarded
            .iter()
            .find(|d| d.mandate.trigger_id == trigger_id)
            .map(|d| &d.reason)
    }
}
