pub mod action;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod mandate;
pub mod position;
pub mod result;
pub mod snapshot;
pub mod traits;

pub use action::{Action, ExecutionOutcome};
pub use config::{AppConfig, EngineConfig, RiskLimits};
pub use config_loader::ConfigLoader;
pub use error::KernelError;
pub use mandate::{Direction, ExpiryCondition, Mandate, MandateDefect, MandateType};
pub use position::{Position, PositionState};
pub use result::{ArbitrationResult, DiscardReason, DiscardedMandate, LimitName};
pub use snapshot::{AccountState, FactSnapshot, SizingInputs, SnapshotStatus};
pub use traits::{ExecutionRoute, MandateSource, SnapshotSource};
