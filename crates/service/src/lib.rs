//! Service layer for the shared-data store.
//! - `id_gen` mints short URL-safe identifiers.
//! - `share` holds the repository seam and the `ShareService` business rules.
//! - `runtime` prepares the on-disk store at startup.

pub mod errors;
pub mod id_gen;
pub mod runtime;
pub mod share;
#[cfg(test)]
pub mod test_support;
