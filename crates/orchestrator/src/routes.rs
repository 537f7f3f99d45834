use anyhow::Result;
use arbiter_core::{Action, ExecutionOutcome, ExecutionRoute};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Execution route that replays a scripted sequence of confirmed outcomes.
///
/// Used by replay runs and tests: each submitted action consumes the next
/// scripted outcome in order. Submitting past the end of the script reports
/// a failure, which leaves the position at its transient state.
pub struct RecordedRoute {
    outcomes: VecDeque<ExecutionOutcome>,
}

impl RecordedRoute {
    /// Creates a route that replays the given outcomes in order.
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = ExecutionOutcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Creates a route with no scripted outcomes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            outcomes: VecDeque::new(),
        }
    }

    /// Remaining scripted outcomes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

#[async_trait]
impl ExecutionRoute for RecordedRoute {
    async fn submit(&mut self, symbol: &str, action: Action) -> Result<ExecutionOutcome> {
        let outcome = self.outcomes.pop_front().unwrap_or_else(|| {
            ExecutionOutcome::Failed {
                reason: format!("no scripted outcome for {} {}", symbol, action.as_str()),
            }
        });
        tracing::debug!(
            "recorded route: {} {} -> {}",
            symbol,
            action.as_str(),
            outcome.as_str()
        );
        Ok(outcome)
    }
}
