//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads statutory rates, overtime defaults, tip pool parameters,
//! formatting settings and the default holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config").unwrap();
//! println!("SSS rate: {}", loader.config().statutory.sss.rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrencyDisplay, DateFormat, FormattingConfig, HolidayCalendarConfig, OvertimeConfig, PayrollConfig,
    SchemeRate, StatutoryRates, TipPoolConfig,
};
