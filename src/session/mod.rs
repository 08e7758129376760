pub mod core;
pub mod guard;
pub mod manager;

// Re-export from the submodules so we can do "use crate::session::*;"
// (`self::` keeps the local module from clashing with the built-in `core`.)
pub use self::core::{SessionCore, SessionEvent, SessionSnapshot};
pub use guard::{evaluate, Access, GuardDecision};
pub use manager::SessionManager;
