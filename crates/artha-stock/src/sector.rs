//! Peer-sector statistics
//!
//! Averages the eight tracked valuation and profitability ratios across a
//! panel of peer companies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::input::lenient_f64;

/// One of the eight ratios tracked per peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ratio {
    Roe,
    Roa,
    Npm,
    Per,
    Pbv,
    Ps,
    Der,
    Cr,
}

impl Ratio {
    /// All ratios in panel column order
    pub const ALL: [Ratio; 8] = [
        Ratio::Roe,
        Ratio::Roa,
        Ratio::Npm,
        Ratio::Per,
        Ratio::Pbv,
        Ratio::Ps,
        Ratio::Der,
        Ratio::Cr,
    ];

    /// Short column label
    pub fn label(&self) -> &'static str {
        match self {
            Ratio::Roe => "ROE",
            Ratio::Roa => "ROA",
            Ratio::Npm => "NPM",
            Ratio::Per => "PER",
            Ratio::Pbv => "PBV",
            Ratio::Ps => "PS",
            Ratio::Der => "DER",
            Ratio::Cr => "CR",
        }
    }

    /// Display unit: percentages for margins and returns, multiples otherwise
    pub fn suffix(&self) -> &'static str {
        match self {
            Ratio::Roe | Ratio::Roa | Ratio::Npm => "%",
            Ratio::Per | Ratio::Pbv | Ratio::Ps | Ratio::Der | Ratio::Cr => "x",
        }
    }

    /// Parse a ratio name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        Ratio::ALL
            .into_iter()
            .find(|ratio| ratio.label().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ratios entered for one peer company; `0` means "not entered"
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerMetrics {
    #[serde(deserialize_with = "lenient_f64")]
    pub roe: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub roa: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub npm: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub per: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pbv: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ps: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub der: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub cr: f64,
}

/// Arithmetic mean of each ratio across a peer panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAverages {
    pub roe: f64,
    pub roa: f64,
    pub npm: f64,
    pub per: f64,
    pub pbv: f64,
    pub ps: f64,
    pub der: f64,
    pub cr: f64,
}

macro_rules! ratio_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Read one ratio
            pub fn get(&self, ratio: Ratio) -> f64 {
                match ratio {
                    Ratio::Roe => self.roe,
                    Ratio::Roa => self.roa,
                    Ratio::Npm => self.npm,
                    Ratio::Per => self.per,
                    Ratio::Pbv => self.pbv,
                    Ratio::Ps => self.ps,
                    Ratio::Der => self.der,
                    Ratio::Cr => self.cr,
                }
            }

            fn slot(&mut self, ratio: Ratio) -> &mut f64 {
                match ratio {
                    Ratio::Roe => &mut self.roe,
                    Ratio::Roa => &mut self.roa,
                    Ratio::Npm => &mut self.npm,
                    Ratio::Per => &mut self.per,
                    Ratio::Pbv => &mut self.pbv,
                    Ratio::Ps => &mut self.ps,
                    Ratio::Der => &mut self.der,
                    Ratio::Cr => &mut self.cr,
                }
            }
        }
    };
}

ratio_accessors!(PeerMetrics);
ratio_accessors!(SectorAverages);

impl PeerMetrics {
    /// Overwrite one ratio
    pub fn set(&mut self, ratio: Ratio, value: f64) {
        *self.slot(ratio) = value;
    }

    /// Copy with one ratio replaced
    pub fn with(mut self, ratio: Ratio, value: f64) -> Self {
        self.set(ratio, value);
        self
    }
}

impl SectorAverages {
    /// Percentage premium of a company's ratio over the sector mean
    ///
    /// `None` when the sector mean is zero.
    pub fn premium(&self, ratio: Ratio, company_value: f64) -> Option<f64> {
        let mean = self.get(ratio);
        if mean == 0.0 {
            return None;
        }
        Some((company_value - mean) / mean.abs() * 100.0)
    }
}

/// Computes sector averages from a peer collection
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorAggregator;

impl SectorAggregator {
    /// Mean of every tracked ratio across `peers`
    ///
    /// Sums run in input order so results are reproducible bit for bit.
    /// An empty collection fails with [`AnalysisError::EmptyPeerSet`].
    pub fn aggregate(peers: &[PeerMetrics]) -> Result<SectorAverages> {
        if peers.is_empty() {
            tracing::warn!("sector aggregation requested for an empty peer set");
            return Err(AnalysisError::EmptyPeerSet);
        }

        let count = peers.len() as f64;
        let mut averages = SectorAverages::default();
        for ratio in Ratio::ALL {
            let sum = peers.iter().fold(0.0, |acc, peer| acc + peer.get(ratio));
            *averages.slot(ratio) = sum / count;
        }
        Ok(averages)
    }
}

/// Fixed-size, ordered panel of peers as edited by the analyst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPanel {
    peers: Vec<PeerMetrics>,
}

impl SectorPanel {
    /// Panel of `size` zeroed peers
    pub fn new(size: usize) -> Self {
        Self {
            peers: vec![PeerMetrics::default(); size],
        }
    }

    /// Panel sized from configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.peer_panel_size)
    }

    /// Panel holding exactly these peers
    pub fn from_peers(peers: Vec<PeerMetrics>) -> Self {
        Self { peers }
    }

    /// Set one ratio of one peer slot
    pub fn update(&mut self, index: usize, ratio: Ratio, value: f64) -> Result<()> {
        let len = self.peers.len();
        let peer = self
            .peers
            .get_mut(index)
            .ok_or(AnalysisError::InvalidPeerIndex { index, len })?;
        peer.set(ratio, value);
        Ok(())
    }

    pub fn peers(&self) -> &[PeerMetrics] {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Recompute sector averages for the current panel
    pub fn averages(&self) -> Result<SectorAverages> {
        SectorAggregator::aggregate(&self.peers)
    }
}

impl Default for SectorPanel {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn peer(values: [f64; 8]) -> PeerMetrics {
        Ratio::ALL
            .into_iter()
            .zip(values)
            .fold(PeerMetrics::default(), |p, (r, v)| p.with(r, v))
    }

    #[test]
    fn test_aggregate_is_field_mean() {
        let peers = vec![
            peer([15.0, 2.1, 30.0, 12.0, 2.5, 4.0, 0.4, 1.8]),
            peer([18.5, 2.4, 28.0, 15.5, 3.1, 5.2, 0.6, 1.2]),
            peer([9.0, 1.1, 12.0, 8.0, 1.0, 1.5, 1.3, 0.9]),
        ];

        let avg = SectorAggregator::aggregate(&peers).unwrap();
        for ratio in Ratio::ALL {
            let expected = peers.iter().map(|p| p.get(ratio)).sum::<f64>() / 3.0;
            assert!((avg.get(ratio) - expected).abs() < EPS, "{ratio} mismatch");
        }
        assert!((avg.roe - 14.166_666_666_666_666).abs() < EPS);
        assert!((avg.der - 0.766_666_666_666_666_7).abs() < EPS);
    }

    #[test]
    fn test_aggregate_empty_peer_set_fails() {
        let err = SectorAggregator::aggregate(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyPeerSet));
    }

    #[test]
    fn test_aggregate_single_peer_is_identity() {
        let only = peer([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let avg = SectorAggregator::aggregate(&[only]).unwrap();
        for ratio in Ratio::ALL {
            assert_eq!(avg.get(ratio), only.get(ratio));
        }
    }

    #[test]
    fn test_zeroed_panel_averages_to_zero() {
        let panel = SectorPanel::default();
        assert_eq!(panel.len(), 5);
        assert_eq!(panel.averages().unwrap(), SectorAverages::default());
    }

    #[test]
    fn test_panel_update_recomputes() {
        let mut panel = SectorPanel::new(4);
        panel.update(0, Ratio::Per, 10.0).unwrap();
        panel.update(3, Ratio::Per, 30.0).unwrap();
        let avg = panel.averages().unwrap();
        assert!((avg.per - 10.0).abs() < EPS);
        assert_eq!(avg.roe, 0.0);
    }

    #[test]
    fn test_panel_update_out_of_range() {
        let mut panel = SectorPanel::new(2);
        let err = panel.update(2, Ratio::Roe, 1.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPeerIndex { index: 2, len: 2 }));
    }

    #[test]
    fn test_empty_panel_propagates_error() {
        let panel = SectorPanel::from_peers(Vec::new());
        assert!(panel.is_empty());
        assert!(panel.averages().is_err());
    }

    #[test]
    fn test_premium_over_sector() {
        let avg = SectorAverages {
            per: 10.0,
            ..Default::default()
        };
        assert!((avg.premium(Ratio::Per, 12.0).unwrap() - 20.0).abs() < EPS);
        assert!((avg.premium(Ratio::Per, 8.0).unwrap() + 20.0).abs() < EPS);
        assert_eq!(avg.premium(Ratio::Roe, 15.0), None);
    }

    #[test]
    fn test_ratio_parse_and_labels() {
        assert_eq!(Ratio::parse("pbv"), Some(Ratio::Pbv));
        assert_eq!(Ratio::parse(" DER "), Some(Ratio::Der));
        assert_eq!(Ratio::parse("eps"), None);
        assert_eq!(Ratio::Roe.suffix(), "%");
        assert_eq!(Ratio::Cr.suffix(), "x");
    }

    #[test]
    fn test_peer_metrics_missing_fields_default_to_zero() {
        let peer: PeerMetrics = serde_json::from_str(r#"{"roe": 12.5, "per": 9}"#).unwrap();
        assert_eq!(peer.roe, 12.5);
        assert_eq!(peer.per, 9.0);
        assert_eq!(peer.cr, 0.0);
    }

    #[test]
    fn test_peer_metrics_coerce_text_values() {
        let peers: Vec<PeerMetrics> =
            serde_json::from_str(r#"[{"roe": "12.5", "per": "abc", "cr": null}]"#).unwrap();
        assert_eq!(peers[0].roe, 12.5);
        assert_eq!(peers[0].per, 0.0);
        assert_eq!(peers[0].cr, 0.0);

        let avg = SectorAggregator::aggregate(&peers).unwrap();
        assert_eq!(avg.roe, 12.5);
    }
}
