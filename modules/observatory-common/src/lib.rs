pub mod config;
pub mod dataset;
pub mod error;
pub mod types;

pub use config::{Config, StoreTarget};
pub use dataset::SeedDataset;
pub use error::{FetchError, ObservatoryError};
pub use types::*;
