//! PostgreSQL connection management
//!
//! Connecting (with startup retry), running migrations, readiness probing and
//! closing the pool on shutdown.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect_from_config, connect_from_config_with_retry, run_migrations};
pub use health::check_health;

pub use sea_orm::{DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
