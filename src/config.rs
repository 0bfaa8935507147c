//! Runtime settings: built-in defaults, then an optional `config.toml` in the
//! platform config directory, then `LIBRARY_MANAGER_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, ensure, Context, Result};
use config::{Config, Environment, File, Map};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::loan::LoanPolicy;

const ENV_PREFIX: &str = "LIBRARY_MANAGER";
const DATA_FILE_NAME: &str = "library_data.json";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON document holding the catalog.
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `library_manager=debug`.
    pub log_level: String,
    #[serde(default)]
    pub loan: LoanPolicy,
}

impl AppConfig {
    /// Resolve settings for the current user.
    pub fn load() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "library-manager")
            .ok_or_else(|| anyhow!("could not locate home directory"))?;
        let config_file = dirs.config_dir().join(CONFIG_FILE_NAME);
        Self::load_from(dirs.data_dir(), Some(&config_file), None)
    }

    /// Build settings rooted at `data_dir`, layering `config_file` (if it
    /// exists) and then environment variables on top. `env` replaces the
    /// process environment when given.
    pub fn load_from(
        data_dir: &Path,
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_file", path_value(&data_dir.join(DATA_FILE_NAME)))?
            .set_default("log_dir", path_value(&data_dir.join(LOG_DIR_NAME)))?
            .set_default("log_level", "info")?;

        if let Some(file) = config_file {
            builder = builder.add_source(File::from(file).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to read configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.data_file.as_os_str().is_empty(),
            "data_file must not be empty"
        );
        ensure!(self.loan.loan_days > 0, "loan.loan_days must be at least 1");
        Ok(())
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_live_under_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), None, Some(Map::new())).unwrap();

        assert_eq!(config.data_file, dir.path().join("library_data.json"));
        assert_eq!(config.log_dir, dir.path().join("logs"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.loan, LoanPolicy::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(
            &file,
            "log_level = \"debug\"\n\n[loan]\nloan_days = 21\nfine_per_day = 2\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), Some(&file), Some(Map::new())).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.loan.loan_days, 21);
        assert_eq!(config.loan.fine_per_day, 2);
    }

    #[test]
    fn partial_loan_section_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[loan]\nfine_per_day = 5\n").unwrap();

        let config = AppConfig::load_from(dir.path(), Some(&file), Some(Map::new())).unwrap();

        assert_eq!(config.loan.loan_days, 14);
        assert_eq!(config.loan.fine_per_day, 5);
    }

    #[test]
    fn zero_day_loans_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[loan]\nloan_days = 0\n").unwrap();

        assert!(AppConfig::load_from(dir.path(), Some(&file), Some(Map::new())).is_err());
    }

    #[test]
    fn missing_config_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("absent.toml");
        assert!(AppConfig::load_from(dir.path(), Some(&file), Some(Map::new())).is_ok());
    }

    #[test]
    fn environment_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "log_level = \"warn\"\n").unwrap();
        let env = Map::from([
            ("LIBRARY_MANAGER_LOG_LEVEL".to_string(), "debug".to_string()),
            ("LIBRARY_MANAGER_LOAN__LOAN_DAYS".to_string(), "21".to_string()),
        ]);

        let config = AppConfig::load_from(dir.path(), Some(&file), Some(env)).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.loan.loan_days, 21);
        assert_eq!(config.loan.fine_per_day, 1);
    }
}
