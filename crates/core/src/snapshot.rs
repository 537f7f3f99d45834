//! Immutable, already-validated fact snapshots from the observation layer.
//!
//! The kernel consumes the snapshot as opaque input: it never re-validates,
//! re-orders, or back-fills observation data. A halted status makes the whole
//! cycle refuse to run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upstream observation status for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotStatus {
    Usable,
    /// The observation pipeline declared itself failed. Terminal for the
    /// cycle; never retried or downgraded by the kernel.
    Halted,
}

/// Sizing inputs for projecting post-execution exposure.
///
/// The risk gate vetoes any candidate whose projection these inputs cannot
/// support — missing inputs are never optimistically defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizingInputs {
    /// Quantity the execution layer would submit for an entry.
    pub entry_quantity: Option<Decimal>,
    /// Quantity the execution layer would shave off on a reduce.
    pub reduce_quantity: Option<Decimal>,
    /// Liquidation price projected for the post-execution position.
    pub projected_liquidation_price: Option<Decimal>,
}

/// Account-level exposure and loss facts at snapshot time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub equity: Decimal,
    /// Total open notional across all symbols.
    pub aggregate_notional: Decimal,
    /// Open notional in instruments correlated with this symbol.
    pub correlated_notional: Decimal,
    /// Realized loss magnitude so far today (positive number).
    pub realized_loss_day: Decimal,
    /// Realized loss magnitude so far this week (positive number).
    pub realized_loss_week: Decimal,
    pub consecutive_losses: u32,
}

/// One symbol's validated fact snapshot for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSnapshot {
    pub symbol: String,
    pub taken_at: DateTime<Utc>,
    pub status: SnapshotStatus,
    pub mark_price: Option<Decimal>,
    #[serde(default)]
    pub sizing: SizingInputs,
    #[serde(default)]
    pub account: AccountState,
}

impl FactSnapshot {
    /// Creates a usable snapshot with no market or account facts attached.
    #[must_use]
    pub fn new(symbol: impl Into<String>, taken_at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            taken_at,
            status: SnapshotStatus::Usable,
            mark_price: None,
            sizing: SizingInputs::default(),
            account: AccountState::default(),
        }
    }

    /// Creates a halted snapshot, carrying only the failure signal.
    #[must_use]
    pub fn halted(symbol: impl Into<String>, taken_at: DateTime<Utc>) -> Self {
        Self {
            status: SnapshotStatus::Halted,
            ..Self::new(symbol, taken_at)
        }
    }

    /// Sets the mark price.
    #[must_use]
    pub fn with_mark_price(mut self, price: Decimal) -> Self {
        self.mark_price = Some(price);
        self
    }

    /// Sets the sizing inputs.
    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingInputs) -> Self {
        self.sizing = sizing;
        self
    }

    /// Sets the account state.
    #[must_use]
    pub fn with_account(mut self, account: AccountState) -> Self {
        self.account = account;
        self
    }

    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self.status, SnapshotStatus::Usable)
    }
}
