//! Mandate types: one-cycle, stateless proposals for an action.
//!
//! A mandate is never an action itself. The proposal layer emits a fresh set
//! every cycle, arbitration resolves that set into at most one action, and
//! nothing survives the cycle that produced it — there is no storage type for
//! yesterday's mandate.

use crate::snapshot::FactSnapshot;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of an entry mandate or an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// The closed set of mandate types.
///
/// Adding a variant here is deliberately a compile-time-visible change:
/// admissibility, risk gating, and arbitration all match exhaustively on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandateType {
    Entry,
    Exit,
    Reduce,
    Hold,
    Block,
}

impl MandateType {
    /// All mandate types, in declaration order.
    pub const ALL: [Self; 5] = [Self::Entry, Self::Exit, Self::Reduce, Self::Hold, Self::Block];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Reduce => "reduce",
            Self::Hold => "hold",
            Self::Block => "block",
        }
    }
}

/// Expiry predicate evaluated against the current fact snapshot.
///
/// A mandate whose predicate already holds at arbitration time is discarded
/// before ranking. The enum is closed so that expiry never consults a clock
/// or any state outside the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ExpiryCondition {
    /// Never expires within its cycle.
    #[default]
    None,
    /// Holds when the snapshot mark price is strictly above the threshold.
    PriceAbove(Decimal),
    /// Holds when the snapshot mark price is strictly below the threshold.
    PriceBelow(Decimal),
    /// Holds when the snapshot was taken after the given instant.
    SnapshotAfter(DateTime<Utc>),
}

impl ExpiryCondition {
    /// Returns true if the predicate holds against the snapshot.
    ///
    /// Price predicates cannot hold when the snapshot carries no mark price.
    #[must_use]
    pub fn holds(&self, snapshot: &FactSnapshot) -> bool {
        match self {
            Self::None => false,
            Self::PriceAbove(threshold) => {
                snapshot.mark_price.map_or(false, |mark| mark > *threshold)
            }
            Self::PriceBelow(threshold) => {
                snapshot.mark_price.map_or(false, |mark| mark < *threshold)
            }
            Self::SnapshotAfter(instant) => snapshot.taken_at > *instant,
        }
    }
}

/// Shape defects detected at the mandate boundary.
///
/// A defective mandate is dropped and recorded, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MandateDefect {
    /// An entry mandate must carry a direction.
    #[error("entry mandate missing direction")]
    MissingDirection,
    /// Only entry mandates may carry a direction.
    #[error("non-entry mandate carries a direction")]
    UnexpectedDirection,
    /// The trigger reference must be non-empty.
    #[error("empty trigger id")]
    EmptyTrigger,
}

/// A one-cycle proposal for an action on a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mandate {
    pub mandate_type: MandateType,
    /// Entry mandates must carry a direction; all other types must not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Opaque reference to the upstream fact that justified emission.
    /// Carries no score or magnitude semantics.
    pub trigger_id: String,
    #[serde(default)]
    pub expiry: ExpiryCondition,
}

impl Mandate {
    /// Creates an entry mandate in the given direction.
    #[must_use]
    pub fn entry(direction: Direction, trigger_id: impl Into<String>) -> Self {
        Self {
            mandate_type: MandateType::Entry,
            direction: Some(direction),
            trigger_id: trigger_id.into(),
            expiry: ExpiryCondition::None,
        }
    }

    /// Creates an exit mandate.
    #[must_use]
    pub fn exit(trigger_id: impl Into<String>) -> Self {
        Self::undirected(MandateType::Exit, trigger_id)
    }

    /// Creates a reduce mandate. Magnitude resolution happens downstream in
    /// execution, never in the kernel.
    #[must_use]
    pub fn reduce(trigger_id: impl Into<String>) -> Self {
        Self::undirected(MandateType::Reduce, trigger_id)
    }

    /// Creates a hold mandate.
    #[must_use]
    pub fn hold(trigger_id: impl Into<String>) -> Self {
        Self::undirected(MandateType::Hold, trigger_id)
    }

    /// Creates a block mandate.
    #[must_use]
    pub fn block(trigger_id: impl Into<String>) -> Self {
        Self::undirected(MandateType::Block, trigger_id)
    }

    fn undirected(mandate_type: MandateType, trigger_id: impl Into<String>) -> Self {
        Self {
            mandate_type,
            direction: None,
            trigger_id: trigger_id.into(),
            expiry: ExpiryCondition::None,
        }
    }

    /// Attaches an expiry predicate.
    #[must_use]
    pub fn with_expiry(mut self, expiry: ExpiryCondition) -> Self {
        self.expiry = expiry;
        self
    }

    /// Validates the mandate shape at the kernel boundary.
    ///
    /// # Errors
    /// Returns the first defect found: entry without a direction, a direction
    /// on a non-entry mandate, or an empty trigger id.
    pub fn validate(&self) -> Result<(), MandateDefect> {
        match (self.mandate_type, self.direction) {
            (MandateType::Entry, None) => return Err(MandateDefect::MissingDirection),
            (MandateType::Entry, Some(_)) => {}
            (_, Some(_)) => return Err(MandateDefect::UnexpectedDirection),
            (_, None) => {}
        }
        if self.trigger_id.is_empty() {
            return Err(MandateDefect::EmptyTrigger);
        }
        Ok(())
    }
}
