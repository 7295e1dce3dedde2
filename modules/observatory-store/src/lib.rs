//! Read side of the observatory: gateway to the document store, the
//! session-wide repository built on top of it, and the out-of-band seeder.

pub mod gateway;
pub mod memory;
pub mod observer;
pub mod repository;
pub mod seed;

pub use gateway::{client_from_config, decode_document, FirestoreGateway, RiskGateway};
pub use memory::MemoryGateway;
pub use observer::{StateObserver, SubscriptionId};
pub use repository::{RepositoryState, RiskRepository};
pub use seed::{SeedReport, Seeder};
