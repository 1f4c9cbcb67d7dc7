//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration and the default holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayDefinition;

use super::types::{FormattingConfig, HolidayCalendarConfig, PayrollConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── payroll.yaml   # Rates, overtime defaults, tip pool, formatting
/// └── holidays.yaml  # Default holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Holidays loaded: {}", loader.holidays().len());
/// println!("Overtime multiplier: {}", loader.config().overtime.multiplier);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
    holidays: Vec<HolidayDefinition>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let calendar = Self::load_yaml::<HolidayCalendarConfig>(&path.join("holidays.yaml"))?;

        Ok(Self {
            config,
            holidays: calendar.holidays,
        })
    }

    /// Builds a loader from already-constructed values.
    pub fn from_parts(config: PayrollConfig, holidays: Vec<HolidayDefinition>) -> Self {
        Self { config, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the default holiday calendar.
    pub fn holidays(&self) -> &[HolidayDefinition] {
        &self.holidays
    }

    /// Returns the formatting settings.
    pub fn formatting(&self) -> &FormattingConfig {
        &self.config.formatting
    }
}
