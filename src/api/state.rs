//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::{SimulatedTipPool, TipPoolSource};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded payroll configuration and the tip pool source. Both are
/// shared across handlers through `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    tip_source: Arc<dyn TipPoolSource>,
}

impl AppState {
    /// Creates a state with a simulated tip pool built from the configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let tip_source = Arc::new(SimulatedTipPool::new(&config.config().tip_pool));
        Self::with_tip_source(config, tip_source)
    }

    /// Creates a state with an explicit tip pool source.
    pub fn with_tip_source(config: ConfigLoader, tip_source: Arc<dyn TipPoolSource>) -> Self {
        Self {
            config: Arc::new(config),
            tip_source,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the tip pool source.
    pub fn tip_source(&self) -> &dyn TipPoolSource {
        self.tip_source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::FixedTipPool;
    use crate::models::PayPeriod;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_explicit_tip_source_is_used() {
        let state = AppState::with_tip_source(
            ConfigLoader::default(),
            Arc::new(FixedTipPool::new(Decimal::new(2000, 0), 4)),
        );
        let period = PayPeriod::parse("9/2025").unwrap();
        let pool = state.tip_source().pool_for_period(&period).unwrap();
        assert_eq!(pool.share(), Decimal::new(500, 0));
    }
}
