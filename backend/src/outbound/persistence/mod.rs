//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by SQLite via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use rentals::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, SchemaMode, sync_schema,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("rentals.sqlite")).await?;
//! sync_schema(&pool, SchemaMode::Preserve).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_accomodation_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_sync;

pub use diesel_accomodation_repository::DieselAccomodationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, IN_MEMORY_DATABASE, PoolConfig, PoolError, SqliteConn};
pub use schema_sync::{ParseSchemaModeError, SchemaMode, SchemaSyncError, sync_schema};
