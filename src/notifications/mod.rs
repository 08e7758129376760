pub mod poller;

pub use poller::{fetch_feed, mark_read, FeedState, NotificationPoller};
