//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresSessionStore` - Session aggregates as versioned JSONB rows
//! - `run_migrations` - Applies the schema under `migrations/`

mod session_store;

pub use session_store::{run_migrations, PostgresSessionStore};
