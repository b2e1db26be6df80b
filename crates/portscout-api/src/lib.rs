// HTTP clients for the PortMaster JSON feeds
pub mod feeds;
pub mod models;

// Re-export common types
pub use feeds::{FeedClient, FeedError, FeedUrls};
pub use models::{DeviceEntry, ImageEntry, PortAttrEntry, PortEntry, PortsFeed, SourceEntry, StatsFeed};
