pub mod notification;
pub mod push;
pub mod user;

// Re-export the common types so code outside can do "use crate::models::User;".
pub use notification::{NotificationKind, NotificationRecord, UnreadCount};
pub use push::{PushSubscription, SubscriptionKeys};
pub use user::{AuthResponse, RegisterProfile, User};
