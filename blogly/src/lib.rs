//! Blogly: a small blog administration tool.
//!
//! Users write posts, posts carry tags. Everything is served as HTML pages
//! rendered with tera templates, backed by Diesel on PostgreSQL (or SQLite
//! with the `sqlite` feature).
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod helper;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;

pub use config::BloglyConfig;
pub use error::{AppError, AppResult};

/// Assembles the application: pool, migrations, templates, routes.
pub fn build(config: &BloglyConfig) -> Rocket<Build> {
    rocket::custom(config.figment())
        .attach(db::Db::fairing())
        .attach(AdHoc::try_on_ignite("Diesel Migrations", db::run_migrations))
        .attach(Template::fairing())
        .mount("/", routes::routes())
        .register("/", error::catchers())
}
