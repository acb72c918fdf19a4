//! Database provisioning helpers for Diesel adapter tests.
//!
//! - Databases are created with `postgres` so `CREATE DATABASE` runs outside
//!   any Diesel transaction.
//! - Schemas come from the crate's embedded migrations so tests never drift
//!   from production.
//! - Users are seeded directly; the service has no way to create them.

use foodapp::domain::User;
use foodapp::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Create an empty database on `cluster`, migrate it, and return its URL.
pub async fn create_migrated_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("test_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let statement = format!("CREATE DATABASE \"{name}\"");
    tokio::task::spawn_blocking(move || {
        let mut client =
            Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(&statement)
            .map_err(|err| format_postgres_error(&err))
    })
    .await
    .map_err(|err| err.to_string())??;

    let url = cluster.connection().database_url(&name);
    run_pending_migrations(&url)
        .await
        .map_err(|err| err.to_string())?;
    Ok(url)
}

/// Insert `user` into the `users` table at `url`.
pub async fn seed_user(url: &str, user: &User) -> Result<(), String> {
    let url = url.to_owned();
    let user = user.clone();
    tokio::task::spawn_blocking(move || {
        let mut client =
            Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .execute(
                "INSERT INTO users (id, user_name, email) VALUES ($1, $2, $3)",
                &[&user.id.as_uuid(), &user.user_name, &user.email.as_ref()],
            )
            .map(|_| ())
            .map_err(|err| format_postgres_error(&err))
    })
    .await
    .map_err(|err| err.to_string())?
}
