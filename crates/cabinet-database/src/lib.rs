//! # cabinet-database
//!
//! SQLite connection management, the schema migration, repository
//! implementations for folders, files and file types, and the two
//! [`EntityStore`](cabinet_entity::EntityStore) implementations: the
//! durable [`SqliteEntityStore`] and the in-process [`MemoryEntityStore`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod seed;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryEntityStore;
pub use store::SqliteEntityStore;
