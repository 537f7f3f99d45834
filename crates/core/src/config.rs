//! Application and risk-limit configuration.
//!
//! Risk limits are static, versioned inputs to the kernel: loaded once,
//! checked every cycle, never learned or mutated.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub risk: RiskLimits,
}

/// Orchestrator runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Symbols to spawn actors for in orchestrated runs.
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            command_buffer: default_command_buffer(),
            event_buffer: default_event_buffer(),
        }
    }
}

const fn default_command_buffer() -> usize {
    32
}

const fn default_event_buffer() -> usize {
    1024
}

/// Static risk limits checked by the risk invariant gate.
///
/// All notionals and losses are positive magnitudes in quote currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Configuration version tag, carried for audit only.
    #[serde(default = "default_version")]
    pub version: String,
    /// Cap on a single position's projected notional.
    #[serde(default = "default_max_position_notional")]
    pub max_position_notional: Decimal,
    /// Cap on total open notional across all symbols.
    #[serde(default = "default_max_aggregate_notional")]
    pub max_aggregate_notional: Decimal,
    /// Cap on open notional across correlated instruments.
    #[serde(default = "default_max_correlated_notional")]
    pub max_correlated_notional: Decimal,
    /// Leverage ceiling, nominally 1x.
    #[serde(default = "default_max_leverage")]
    pub max_leverage: Decimal,
    /// Minimum distance to the projected liquidation price, as a fraction of
    /// the mark price.
    #[serde(default = "default_min_liquidation_buffer_pct")]
    pub min_liquidation_buffer_pct: Decimal,
    /// Daily realized-loss magnitude at which new entries stop.
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss: Decimal,
    /// Weekly realized-loss magnitude at which new entries stop.
    #[serde(default = "default_max_weekly_loss")]
    pub max_weekly_loss: Decimal,
    /// Consecutive losing trades at which new entries stop.
    #[serde(default = "default_max_consecutive_losses")]
    pub max_consecutive_losses: u32,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_position_notional: default_max_position_notional(),
            max_aggregate_notional: default_max_aggregate_notional(),
            max_correlated_notional: default_max_correlated_notional(),
            max_leverage: default_max_leverage(),
            min_liquidation_buffer_pct: default_min_liquidation_buffer_pct(),
            max_daily_loss: default_max_daily_loss(),
            max_weekly_loss: default_max_weekly_loss(),
            max_consecutive_losses: default_max_consecutive_losses(),
        }
    }
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_max_position_notional() -> Decimal {
    Decimal::from(10_000)
}

fn default_max_aggregate_notional() -> Decimal {
    Decimal::from(25_000)
}

fn default_max_correlated_notional() -> Decimal {
    Decimal::from(15_000)
}

fn default_max_leverage() -> Decimal {
    Decimal::ONE
}

fn default_min_liquidation_buffer_pct() -> Decimal {
    // 15% of mark price
    Decimal::new(15, 2)
}

fn default_max_daily_loss() -> Decimal {
    Decimal::from(500)
}

fn default_max_weekly_loss() -> Decimal {
    Decimal::from(1_500)
}

const fn default_max_consecutive_losses() -> u32 {
    5
}

impl RiskLimits {
    /// Validates that the limits are internally consistent.
    ///
    /// # Errors
    /// Returns an error naming the first inconsistent field.
    pub fn validate(&self) -> Result<()> {
        if self.max_position_notional <= Decimal::ZERO {
            anyhow::bail!("max_position_notional must be positive");
        }
        if self.max_aggregate_notional < self.max_position_notional {
            anyhow::bail!("max_aggregate_notional must not be below max_position_notional");
        }
        if self.max_correlated_notional <= Decimal::ZERO {
            anyhow::bail!("max_correlated_notional must be positive");
        }
        if self.max_leverage < Decimal::ONE {
            anyhow::bail!("max_leverage must be at least 1");
        }
        if self.min_liquidation_buffer_pct < Decimal::ZERO
            || self.min_liquidation_buffer_pct >= Decimal::ONE
        {
            anyhow::bail!("min_liquidation_buffer_pct must be in [0, 1)");
        }
        if self.max_weekly_loss < self.max_daily_loss {
            anyhow::bail!("max_weekly_loss must not be below max_daily_loss");
        }
        Ok(())
    }
}
