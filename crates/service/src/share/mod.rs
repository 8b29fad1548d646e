//! Shared-data store: domain record, repository abstraction, and the
//! application service that mints ids and enforces the store's rules.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::SharedRecord;
pub use repository::{SeaOrmShareRepository, ShareRepository};
pub use service::ShareService;
