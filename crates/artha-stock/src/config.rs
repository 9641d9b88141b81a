//! Configuration for the analytical core

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Thresholds and sizes used by the local analysers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Deviation (in percent) at or beyond which price leaves the neutral zone
    pub deviation_threshold_pct: f64,

    /// Multiplier from deviation percent to gauge track percent
    pub gauge_scale: f64,

    /// Upper bound of the gauge indicator, in percent of track
    pub gauge_cap: f64,

    /// Broker summary values strictly above this read as big accumulation
    pub summary_accumulation_above: u8,

    /// Broker summary values strictly below this read as big distribution
    pub summary_distribution_below: u8,

    /// Number of peer slots in a fresh sector panel
    pub peer_panel_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            deviation_threshold_pct: 2.0,
            gauge_scale: 5.0,
            gauge_cap: 50.0,
            summary_accumulation_above: 60,
            summary_distribution_below: 40,
            peer_panel_size: 5,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Apply `ARTHA_*` environment overrides, ignoring values that do not parse
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(threshold) = env_parse("ARTHA_DEVIATION_THRESHOLD") {
            self.deviation_threshold_pct = threshold;
        }
        if let Some(cap) = env_parse("ARTHA_GAUGE_CAP") {
            self.gauge_cap = cap;
        }
        if let Some(size) = env_parse("ARTHA_PEER_PANEL_SIZE") {
            self.peer_panel_size = size;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.deviation_threshold_pct.is_finite() && self.deviation_threshold_pct > 0.0) {
            return Err(AnalysisError::ConfigError(
                "deviation_threshold_pct must be a positive number".to_string(),
            ));
        }

        if !(self.gauge_scale.is_finite() && self.gauge_scale > 0.0) {
            return Err(AnalysisError::ConfigError(
                "gauge_scale must be a positive number".to_string(),
            ));
        }

        if !(self.gauge_cap.is_finite() && self.gauge_cap > 0.0) {
            return Err(AnalysisError::ConfigError(
                "gauge_cap must be a positive number".to_string(),
            ));
        }

        if self.summary_accumulation_above > 100
            || self.summary_distribution_below >= self.summary_accumulation_above
        {
            return Err(AnalysisError::ConfigError(format!(
                "broker summary bounds must satisfy distribution < accumulation <= 100 (got {} / {})",
                self.summary_distribution_below, self.summary_accumulation_above
            )));
        }

        if self.peer_panel_size == 0 {
            return Err(AnalysisError::ConfigError(
                "peer_panel_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    deviation_threshold_pct: Option<f64>,
    gauge_scale: Option<f64>,
    gauge_cap: Option<f64>,
    summary_accumulation_above: Option<u8>,
    summary_distribution_below: Option<u8>,
    peer_panel_size: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the neutral-zone half width in percent
    pub fn deviation_threshold_pct(mut self, threshold: f64) -> Self {
        self.deviation_threshold_pct = Some(threshold);
        self
    }

    /// Set the gauge multiplier
    pub fn gauge_scale(mut self, scale: f64) -> Self {
        self.gauge_scale = Some(scale);
        self
    }

    /// Set the gauge cap
    pub fn gauge_cap(mut self, cap: f64) -> Self {
        self.gauge_cap = Some(cap);
        self
    }

    /// Set both broker summary bounds
    pub fn summary_bounds(mut self, distribution_below: u8, accumulation_above: u8) -> Self {
        self.summary_distribution_below = Some(distribution_below);
        self.summary_accumulation_above = Some(accumulation_above);
        self
    }

    /// Set the sector panel size
    pub fn peer_panel_size(mut self, size: usize) -> Self {
        self.peer_panel_size = Some(size);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        let defaults = AnalysisConfig::default();

        let config = AnalysisConfig {
            deviation_threshold_pct: self
                .deviation_threshold_pct
                .unwrap_or(defaults.deviation_threshold_pct),
            gauge_scale: self.gauge_scale.unwrap_or(defaults.gauge_scale),
            gauge_cap: self.gauge_cap.unwrap_or(defaults.gauge_cap),
            summary_accumulation_above: self
                .summary_accumulation_above
                .unwrap_or(defaults.summary_accumulation_above),
            summary_distribution_below: self
                .summary_distribution_below
                .unwrap_or(defaults.summary_distribution_below),
            peer_panel_size: self.peer_panel_size.unwrap_or(defaults.peer_panel_size),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.deviation_threshold_pct, 2.0);
        assert_eq!(config.gauge_cap, 50.0);
        assert_eq!(config.peer_panel_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .deviation_threshold_pct(3.5)
            .peer_panel_size(8)
            .summary_bounds(30, 70)
            .build()
            .unwrap();

        assert_eq!(config.deviation_threshold_pct, 3.5);
        assert_eq!(config.peer_panel_size, 8);
        assert_eq!(config.summary_distribution_below, 30);
        assert_eq!(config.summary_accumulation_above, 70);
        assert_eq!(config.gauge_scale, 5.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(AnalysisConfig::builder().deviation_threshold_pct(0.0).build().is_err());
        assert!(AnalysisConfig::builder().gauge_cap(f64::NAN).build().is_err());
        assert!(AnalysisConfig::builder().gauge_scale(-1.0).build().is_err());
        assert!(AnalysisConfig::builder().peer_panel_size(0).build().is_err());
        assert!(AnalysisConfig::builder().summary_bounds(60, 40).build().is_err());
        assert!(AnalysisConfig::builder().summary_bounds(50, 101).build().is_err());
    }

    #[test]
    fn test_env_overrides_ignore_missing_keys() {
        // None of the ARTHA_* keys are set in the test environment
        let config = AnalysisConfig::default().with_env_overrides();
        assert_eq!(config, AnalysisConfig::default());
    }
}
