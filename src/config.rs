//! Configuration file handling for payoff.
//!
//! The configuration file is stored at `$PAYOFF_HOME/config.json` and holds the disposable income
//! along with the location of the storage file.

use crate::model::Amount;
use crate::storage::FileStorage;
use crate::store::DebtStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "payoff";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORAGE_JSON: &str = "storage.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$PAYOFF_HOME` and from there it loads `$PAYOFF_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json` file with default settings.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail, or if a config file already exists.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the payoff home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `payoff_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(payoff_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = payoff_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "Payoff home '{}' is missing, run 'payoff init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn disposable_income(&self) -> Option<Amount> {
        self.config_file.disposable_income
    }

    /// Saves `income` as the disposable income in `config.json`.
    pub fn set_disposable_income(&mut self, income: Amount) -> Result<()> {
        let config_file = ConfigFile {
            disposable_income: Some(income),
            ..self.config_file.clone()
        };
        config_file.save(&self.config_path)?;
        self.config_file = config_file;
        Ok(())
    }

    /// Returns the stored `storage_path` if it is absolute, otherwise resolves the relative path.
    pub fn storage_path(&self) -> PathBuf {
        let p = self.config_file.storage_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Opens the storage file and loads the debt store from it, injecting the configured
    /// disposable income.
    pub fn store(&self) -> Result<DebtStore<FileStorage>> {
        let storage = FileStorage::open(self.storage_path())?;
        Ok(DebtStore::load(storage)?
            .with_disposable_income(self.disposable_income().map(|income| income.value())))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "payoff",
///   "config_version": 1,
///   "disposable_income": "650",
///   "storage_path": "storage.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "payoff"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The monthly amount available to pay down debt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disposable_income: Option<Amount>,

    /// Path to the storage file (optional, relative to $PAYOFF_HOME or absolute)
    /// Defaults to $PAYOFF_HOME/storage.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            disposable_income: None,
            storage_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data).context("Unable to write config file")
    }

    fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORAGE_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("payoff_home");
        let created = Config::create(&home).unwrap();
        assert!(created.config_path().is_file());
        assert_eq!(created.disposable_income(), None);

        let loaded = Config::load(&home).unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(loaded.storage_path(), created.root().join(STORAGE_JSON));
    }

    #[test]
    fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).unwrap();
        assert!(Config::create(dir.path()).is_err());
    }

    #[test]
    fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("payoff init"));
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[test]
    fn test_disposable_income_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::create(dir.path()).unwrap();
        let income = Amount::from_str("$650").unwrap();
        config.set_disposable_income(income).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.disposable_income(), Some(income));
        let store = loaded.store().unwrap();
        assert_eq!(store.disposable_income(), Some(Decimal::from(650)));
    }

    #[test]
    fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        std::fs::write(&path, r#"{ "app_name": "payoff", "config_version": 1 }"#).unwrap();
        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.storage_path(), PathBuf::from(STORAGE_JSON));
    }

    #[test]
    fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        std::fs::write(&path, r#"{ "app_name": "budget", "config_version": 1 }"#).unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_absolute_storage_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let elsewhere = dir.path().join("elsewhere.json");
        let file = ConfigFile {
            storage_path: Some(elsewhere.clone()),
            ..ConfigFile::default()
        };
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        file.save(dir.path().join("home").join(CONFIG_JSON)).unwrap();
        let config = Config::load(dir.path().join("home")).unwrap();
        assert_eq!(config.storage_path(), elsewhere);
    }

    #[test]
    fn test_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("disposable_income"));
        assert!(!json.contains("storage_path"));
    }
}
