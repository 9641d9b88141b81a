//! Price vs. broker reference deviation and bandarmology signals

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AnalysisConfig;

/// Where price sits relative to the broker reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviationZone {
    /// Price materially below broker reference, potential undervaluation
    Accumulation,
    /// Price materially above broker reference, potential overvaluation
    Distribution,
    Neutral,
}

impl DeviationZone {
    pub fn label(&self) -> &'static str {
        match self {
            DeviationZone::Accumulation => "ACCUMULATION",
            DeviationZone::Distribution => "DISTRIBUTION",
            DeviationZone::Neutral => "NEUTRAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeviationZone::Accumulation => {
                "price materially below broker reference - potential undervaluation"
            }
            DeviationZone::Distribution => {
                "price materially above broker reference - potential overvaluation"
            }
            DeviationZone::Neutral => "price near broker reference",
        }
    }
}

impl fmt::Display for DeviationZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which half of the gauge track the indicator fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeSide {
    Below,
    Above,
}

/// Deviation of current price from the broker reference price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDeviation {
    /// Signed deviation in percent
    pub percent: f64,
    pub zone: DeviationZone,
    /// Gauge fill in percent of track, never above the configured cap
    pub magnitude: f64,
}

impl PriceDeviation {
    /// Deviation when no reference price is available yet
    pub fn not_applicable() -> Self {
        Self {
            percent: 0.0,
            zone: DeviationZone::Neutral,
            magnitude: 0.0,
        }
    }

    pub fn side(&self) -> GaugeSide {
        if self.percent < 0.0 {
            GaugeSide::Below
        } else {
            GaugeSide::Above
        }
    }
}

/// Maps (current, reference) prices to a [`PriceDeviation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationAnalyzer {
    threshold_pct: f64,
    gauge_scale: f64,
    gauge_cap: f64,
}

impl Default for DeviationAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl DeviationAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            threshold_pct: config.deviation_threshold_pct,
            gauge_scale: config.gauge_scale,
            gauge_cap: config.gauge_cap,
        }
    }

    /// Deviation of `current_price` from `reference_price`
    ///
    /// A reference that is not a positive finite price (zero means unset)
    /// yields exactly `0.0` and [`DeviationZone::Neutral`]. Zone boundaries
    /// are inclusive at the threshold on both sides.
    pub fn analyze(&self, current_price: f64, reference_price: f64) -> PriceDeviation {
        if reference_price <= 0.0 || !reference_price.is_finite() {
            return PriceDeviation::not_applicable();
        }

        let percent = (current_price - reference_price) / reference_price * 100.0;
        PriceDeviation {
            percent,
            zone: self.zone(percent),
            magnitude: self.magnitude(percent),
        }
    }

    /// Zone for a deviation percent
    pub fn zone(&self, percent: f64) -> DeviationZone {
        if percent <= -self.threshold_pct {
            DeviationZone::Accumulation
        } else if percent >= self.threshold_pct {
            DeviationZone::Distribution
        } else {
            DeviationZone::Neutral
        }
    }

    /// Gauge fill: `min(|percent| * scale, cap)`
    pub fn magnitude(&self, percent: f64) -> f64 {
        (percent.abs() * self.gauge_scale).min(self.gauge_cap)
    }
}

/// Reading of the broker summary slider (0 to 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummarySentiment {
    BigAccumulation,
    BigDistribution,
    Neutral,
}

impl SummarySentiment {
    /// Classify a slider value; values above 100 are clamped
    pub fn from_value(value: u8, config: &AnalysisConfig) -> Self {
        let value = value.min(100);
        if value > config.summary_accumulation_above {
            SummarySentiment::BigAccumulation
        } else if value < config.summary_distribution_below {
            SummarySentiment::BigDistribution
        } else {
            SummarySentiment::Neutral
        }
    }

    /// Desk badge label
    pub fn label(&self) -> &'static str {
        match self {
            SummarySentiment::BigAccumulation => "BIG ACC",
            SummarySentiment::BigDistribution => "BIG DIST",
            SummarySentiment::Neutral => "NETRAL",
        }
    }
}

impl fmt::Display for SummarySentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
