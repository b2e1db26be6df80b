// Core business logic lives here - the brain of the operation
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod state;

pub use catalog::CatalogStore;
pub use config::Config;
pub use error::Error;
pub use filter::{filter_ports, FilterOutcome, FilterState};
pub use models::{Device, DeviceMap, FilteredPort, Port};
pub use render::PortCard;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
