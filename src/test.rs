//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{DebtId, DebtUpdate};
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a payoff home directory with a Config and an empty storage file.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("payoff")).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Loads the Config from disk, so it reflects any change saved since the environment was made.
    pub fn config(&self) -> Config {
        Config::load(self.config.root()).unwrap()
    }

    /// Adds a debt and sets its balance and interest rate, returning its id.
    pub fn add_debt(&self, title: &str, balance: &str, rate: &str) -> DebtId {
        let mut store = self.config().store().unwrap();
        let debt = store.add_debt(title).unwrap().unwrap();
        let update = DebtUpdate::parse(balance, rate, None).unwrap();
        store.update_debt(debt.id(), update).unwrap();
        debt.id()
    }
}
