//! Deterministic replay of recorded cycle streams.
//!
//! A replay file is JSONL: one record per cycle carrying the snapshot, the
//! proposed mandates, and (for cycles expected to authorize an action) the
//! execution outcome to script. Replaying the same file against the same
//! configuration twice produces byte-identical output.

use anyhow::{Context, Result};
use arbiter_core::{ExecutionOutcome, FactSnapshot, Mandate, RiskLimits};
use arbiter_orchestrator::{RecordedRoute, SymbolConfig, SymbolRegistry};
use serde::{Deserialize, Serialize};

/// One recorded cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub snapshot: FactSnapshot,
    #[serde(default)]
    pub mandates: Vec<Mandate>,
    /// Scripted outcome, consumed in file order by each authorized action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ExecutionOutcome>,
}

/// Parses a JSONL replay stream.
///
/// # Errors
/// Returns an error naming the first malformed line, or an empty stream.
pub fn parse_records(raw: &str) -> Result<Vec<ReplayRecord>> {
    let mut records = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ReplayRecord = serde_json::from_str(line)
            .with_context(|| format!("malformed replay record on line {}", index + 1))?;
        records.push(record);
    }
    if records.is_empty() {
        anyhow::bail!("replay stream holds no records");
    }
    Ok(records)
}

/// Replays a JSONL cycle stream through a registry-spawned symbol actor,
/// printing one arbitration result per line.
///
/// # Errors
/// Returns the first hard fault: a malformed record, a halted upstream
/// signal, or an illegal transition. Per the kernel contract nothing is
/// retried.
pub async fn run_replay(path: &str, limits: RiskLimits) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let records = parse_records(&raw)?;
    let symbol = records[0].snapshot.symbol.clone();

    let outcomes: Vec<ExecutionOutcome> =
        records.iter().filter_map(|r| r.outcome.clone()).collect();
    let registry = SymbolRegistry::new();
    let handle = registry
        .spawn_symbol(
            SymbolConfig::new(&symbol, limits),
            Box::new(RecordedRoute::new(outcomes)),
        )
        .await?;

    tracing::info!("replaying {} cycles for {} from {}", records.len(), symbol, path);

    for record in records {
        let result = handle.evaluate(record.snapshot, record.mandates).await?;
        println!("{}", serde_json::to_string(&result)?);
    }

    registry.shutdown_all().await
}
