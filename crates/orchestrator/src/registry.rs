use crate::commands::{SymbolCommand, SymbolConfig};
use crate::events::SymbolStatus;
use crate::handle::SymbolHandle;
use crate::symbol_actor::SymbolActor;
use anyhow::Result;
use arbiter_core::ExecutionRoute;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch, RwLock};

/// Registry of running symbol actors.
///
/// Invocations for different symbols are mutually independent: each actor
/// runs on its own task with no shared mutable state and no cross-symbol
/// ordering.
pub struct SymbolRegistry {
    actors: Arc<RwLock<HashMap<String, SymbolHandle>>>,
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Spawns an actor for a symbol with its own execution route.
    ///
    /// # Errors
    /// Returns an error if an actor for the symbol already exists.
    pub async fn spawn_symbol(
        &self,
        config: SymbolConfig,
        route: Box<dyn ExecutionRoute>,
    ) -> Result<SymbolHandle> {
        let mut actors = self.actors.write().await;
        if actors.contains_key(&config.symbol) {
            anyhow::bail!("actor for {} already running", config.symbol);
        }

        let (tx, rx) = mpsc::channel::<SymbolCommand>(config.command_buffer);
        let (event_tx, _event_rx) = broadcast::channel(config.event_buffer);
        let (status_tx, status_rx) = watch::channel(SymbolStatus::initial(&config.symbol));

        let handle = SymbolHandle::new(tx, event_tx.clone(), status_rx);
        let actor = SymbolActor::new(&config.symbol, config.limits, route, rx, event_tx, status_tx);

        let symbol = config.symbol.clone();
        tokio::spawn(async move {
            if let Err(e) = actor.run().await {
                tracing::error!("Symbol actor {} error: {}", symbol, e);
            }
        });

        actors.insert(config.symbol, handle.clone());
        Ok(handle)
    }

    /// Gets a handle to the actor for a symbol.
    #[must_use]
    pub async fn get(&self, symbol: &str) -> Option<SymbolHandle> {
        self.actors.read().await.get(symbol).cloned()
    }

    /// Lists all symbols with running actors.
    #[must_use]
    pub async fn list(&self) -> Vec<String> {
        self.actors.read().await.keys().cloned().collect()
    }

    /// Removes and shuts down the actor for a symbol.
    ///
    /// # Errors
    /// Returns an error if the shutdown command cannot be delivered.
    pub async fn remove(&self, symbol: &str) -> Result<()> {
        let removed = self.actors.write().await.remove(symbol);
        if let Some(handle) = removed {
            handle.shutdown().await?;
        }
        Ok(())
    }

    /// Shuts down every actor in the registry.
    ///
    /// # Errors
    /// Returns an error if any shutdown command cannot be delivered.
    pub async fn shutdown_all(&self) -> Result<()> {
        let handles: Vec<_> = self.actors.read().await.values().cloned().collect();
        for handle in handles {
            handle.shutdown().await?;
        }
        self.actors.write().await.clear();
        Ok(())
    }
}
