//! The connection pool and schema migrations.
//!
//! The backend is picked at compile time. `sqlite` takes precedence when both
//! features are enabled, which is what the test build does.
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};
use rocket::fairing;
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("enable either the `postgres` or the `sqlite` feature");

#[cfg(not(feature = "sqlite"))]
pub type DbConn = diesel::PgConnection;

#[cfg(feature = "sqlite")]
pub type DbConn = diesel::SqliteConnection;

#[cfg(not(feature = "sqlite"))]
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgres");

#[cfg(feature = "sqlite")]
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/sqlite");

/// Name of the pool in Rocket's `databases` configuration table.
pub const DATABASE_NAME: &str = "blogly";

#[database("blogly")]
pub struct Db(DbConn);

/// Brings the schema up to date before the server starts accepting requests.
pub async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match Db::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("no database connection available for migrations");
            return Err(rocket);
        }
    };

    let applied = conn
        .run(|conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| e.to_string())
        })
        .await;

    match applied {
        Ok(count) => {
            info!("applied {} pending migration(s)", count);
            Ok(rocket)
        }
        Err(e) => {
            error!("failed to run migrations: {}", e);
            Err(rocket)
        }
    }
}
