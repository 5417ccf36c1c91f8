//! Shared test infrastructure.
//!
//! Currently provides [`TestDatabase`], a containerized PostgreSQL instance
//! for integration tests.

pub mod postgres;

pub use postgres::TestDatabase;
