pub mod manager;
pub mod plain_platform;
pub mod platform;
pub mod unsupported;
pub mod worker;

// Re-export the primary items so code outside can do
// "use crate::push::{PushManager, PushPlatform};"
pub use manager::PushManager;
pub use platform::{create_platform, Permission, PushPlatform};
pub use worker::{LogNotifier, Notifier, OsNotification, PushWorker};
