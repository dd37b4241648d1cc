//! Database connection management and post repositories.

mod connections;
mod memory_repo;

#[cfg(feature = "postgres")]
mod error;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{
    DatabaseConfig, MAINTENANCE_DATABASE, RetryExhausted, RetryPolicy, is_valid_database_name,
};
pub use memory_repo::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConnections, StartupError};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
