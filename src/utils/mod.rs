pub mod encoding;
pub mod logger;
pub mod throttle;
