//! Runtime configuration
//!
//! Precedence, lowest first: built-in defaults, `learnlog.toml` in the
//! working directory, `.env`, then `LEARNLOG_*` environment variables.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use learnlog_core::logging_facility::Profile;
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = ".learnlog/journal.db";
pub const DEFAULT_LOG_PROFILE: &str = "production";
pub const DEFAULT_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_path: PathBuf,
    pub log_profile: String,
    /// Entries shown by `entry list` when no `--limit` is given
    pub list_limit: usize,
}

impl Settings {
    /// Load from `learnlog.toml`, `.env` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal; real env vars still win over it
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("learnlog.toml"))
    }

    /// As [`Settings::load`] but reading the TOML file at `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("LEARNLOG").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn profile(&self) -> Result<Profile, String> {
        self.log_profile.parse()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("database_path", DEFAULT_DATABASE_PATH)?
        .set_default("log_profile", DEFAULT_LOG_PROFILE)?
        .set_default("list_limit", DEFAULT_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.list_limit, 100);
        assert_eq!(settings.profile(), Ok(Profile::Production));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learnlog.toml");
        std::fs::write(&path, "list_limit = 5\nlog_profile = \"dev\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.list_limit, 5);
        assert_eq!(settings.profile(), Ok(Profile::Development));
    }
}
