use std::env;

use rocket::figment::Figment;
use rocket::fs::relative;

use crate::db::DATABASE_NAME;

/// Upper bound for url-encoded form bodies. Post content is free text, so
/// Rocket's 32 KiB default is far too small.
pub const FORM_LIMIT: &str = "8 MiB";

#[cfg(not(feature = "sqlite"))]
pub const DEFAULT_DATABASE_URL: &str = "postgres:///blogly";

#[cfg(feature = "sqlite")]
pub const DEFAULT_DATABASE_URL: &str = "blogly.sqlite3";

/// Process level configuration.
///
/// Only the database location is ours; everything else (port, log level,
/// pool size) goes through Rocket's own `Rocket.toml` / `ROCKET_*` handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloglyConfig {
    pub database_url: String,
}

impl BloglyConfig {
    /// Reads `DATABASE_URL`, falling back to a local development database.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        BloglyConfig { database_url }
    }

    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge((
                format!("databases.{}.url", DATABASE_NAME),
                self.database_url.as_str(),
            ))
            .merge(("template_dir", relative!("templates")))
            .merge(("limits.form", FORM_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_carries_database_url() {
        let config = BloglyConfig {
            database_url: "somewhere.sqlite3".into(),
        };
        let url: String = config
            .figment()
            .extract_inner("databases.blogly.url")
            .unwrap();
        assert_eq!(url, "somewhere.sqlite3");

        let dir: String = config.figment().extract_inner("template_dir").unwrap();
        assert!(dir.ends_with("templates"));

        let limits: rocket::data::Limits = config.figment().extract_inner("limits").unwrap();
        assert_eq!(limits.get("form"), Some(rocket::data::ByteUnit::Mebibyte(8)));
    }
}
