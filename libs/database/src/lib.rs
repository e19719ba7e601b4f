//! Database connectivity for the catalog services
//!
//! Wraps SeaORM's PostgreSQL connection pool with the pieces every service
//! needs at its edges: configuration, connecting with startup retry, running
//! migrations, a readiness probe and an explicit close on shutdown.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` support for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "products_api").await?;
//! // ... serve requests ...
//! postgres::close(db).await;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
