//! Migrator for the share-link store.
pub use sea_orm_migration::prelude::*;

mod m20241116_000001_create_shared_links;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241116_000001_create_shared_links::Migration)]
    }
}
