//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool - no Arc<Mutex<Connection>>
//! - Multi-step writes run in one transaction
//! - Check-then-insert is backed by a UNIQUE constraint
//! - Child rows are fetched with explicit queries, never lazily

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
