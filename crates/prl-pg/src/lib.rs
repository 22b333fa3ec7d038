//! PostgreSQL connectivity and schema management.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from `DB_URL`
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`migrate()`] — Applies DDL for a schema-bearing type

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
///
/// # Panics
///
/// Panics if `DB_URL` is not set or if connection fails.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    Arc::new(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
pub const USERS: &str = "users";

/// Table metadata and DDL generation for persistent entities.
pub trait Schema {
    fn name() -> &'static str;
    fn creates() -> &'static str;
    fn indices() -> &'static str;
}

/// Applies CREATE TABLE and index DDL for `T`. Idempotent.
pub async fn migrate<T>(client: &Client) -> Result<(), PgErr>
where
    T: Schema,
{
    log::debug!("[pg] migrating {}", T::name());
    client.batch_execute(T::creates()).await?;
    client.batch_execute(T::indices()).await?;
    Ok(())
}
