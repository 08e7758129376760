pub mod client;
pub mod error;

// Re-export so code outside can do "use crate::http::{ApiClient, ApiError};"
pub use client::ApiClient;
pub use error::ApiError;
