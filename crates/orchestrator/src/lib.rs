pub mod commands;
pub mod driver;
pub mod events;
pub mod handle;
pub mod registry;
pub mod routes;
pub mod symbol_actor;

pub use commands::{SymbolCommand, SymbolConfig};
pub use driver::CycleDriver;
pub use events::{ActorState, CycleEvent, SymbolStatus};
pub use handle::SymbolHandle;
pub use registry::SymbolRegistry;
pub use routes::RecordedRoute;
pub use symbol_actor::SymbolActor;
