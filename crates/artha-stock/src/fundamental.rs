//! Fundamental analysis payloads
//!
//! The company form sent to the AI collaborator on the fundamental path,
//! its verdict, and the public company profile lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::{lenient_f64, lenient_string, lenient_vec, null_as_default};

/// Company financial metrics as entered by the analyst
///
/// Monetary amounts are in billions of rupiah; ratios in percent or
/// multiples. Every field defaults to `0` ("not entered").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockMetrics {
    // Profitability
    #[serde(deserialize_with = "lenient_f64")]
    pub roe: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub roa: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub npm: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pbv_input: f64,

    // Income statement
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub gross_profit: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub operating_profit: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub eps: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pe_input: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ps_input: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ebitda: f64,

    // Balance sheet
    #[serde(deserialize_with = "lenient_f64")]
    pub total_assets: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_liabilities: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_equity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_assets: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_liabilities: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub cash: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub inventory: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub der_input: f64,

    // Cash flow
    #[serde(deserialize_with = "lenient_f64")]
    pub cfo: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub capex: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub fcf: f64,

    // Growth
    #[serde(deserialize_with = "lenient_f64")]
    pub rev_now: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub rev_prev: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub rev_last_year: f64,

    // Per share
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub bvps: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub revps: f64,
}

impl StockMetrics {
    /// Year-over-year revenue growth in percent
    ///
    /// `None` when last year's revenue has not been entered.
    pub fn yoy_growth_pct(&self) -> Option<f64> {
        if self.rev_last_year == 0.0 {
            return None;
        }
        Some((self.rev_now - self.rev_last_year) / self.rev_last_year * 100.0)
    }
}

/// Investment verdict on the fundamental path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    InvestasiNilai,
    Spekulatif,
    TradingMomentum,
    Hindari,
    /// Missing or unrecognised verdict text
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl Verdict {
    /// Display form with underscores replaced by spaces
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::InvestasiNilai => "INVESTASI NILAI",
            Verdict::Spekulatif => "SPEKULATIF",
            Verdict::TradingMomentum => "TRADING MOMENTUM",
            Verdict::Hindari => "HINDARI",
            Verdict::Unrecognized => "TIDAK DIKETAHUI",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Per-pillar confidence scores (0 to 100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccuracyMatrix {
    #[serde(deserialize_with = "lenient_f64")]
    pub profitability_quality: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub solvency_risk: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub valuation_margin: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub cash_flow_integrity: f64,
}

impl AccuracyMatrix {
    /// Pillars as (label, score) pairs in display order
    pub fn pillars(&self) -> [(&'static str, f64); 4] {
        [
            ("Profitability", self.profitability_quality),
            ("Solvency", self.solvency_risk),
            ("Valuation", self.valuation_margin),
            ("Cash Flow", self.cash_flow_integrity),
        ]
    }
}

const DEFAULT_MOAT: &str = "Daya saing kompetitif terdeteksi stabil dalam koridor sektoral.";

/// AI result for the fundamental path; every field tolerates absence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FundamentalVerdict {
    #[serde(deserialize_with = "lenient_string")]
    pub executive_summary: String,
    #[serde(deserialize_with = "lenient_string")]
    pub long_term_insight: String,
    #[serde(deserialize_with = "lenient_string")]
    pub short_term_insight: String,
    #[serde(deserialize_with = "null_as_default")]
    pub verdict: Verdict,
    #[serde(deserialize_with = "lenient_f64")]
    pub fundamental_score: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub recommendation: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub risk_analysis: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub competitive_moat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accuracy_matrix: AccuracyMatrix,
}

impl FundamentalVerdict {
    /// Score clamped to 0..=100
    pub fn score(&self) -> f64 {
        self.fundamental_score.clamp(0.0, 100.0)
    }

    /// Moat narrative, with the stock sentence when the service gave none
    pub fn moat(&self) -> &str {
        if self.competitive_moat.trim().is_empty() {
            DEFAULT_MOAT
        } else {
            &self.competitive_moat
        }
    }
}

/// Board and executive roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Management {
    pub pres_dir: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub directors: Vec<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub commissioners: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyFinancials {
    pub assets: String,
    pub equity: String,
    pub revenue: String,
    pub net_profit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub price: String,
    pub foreign_flow: String,
}

/// Central securities depository (KSEI) statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KseiStats {
    pub sid_count: String,
    pub investor_dist: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub url: String,
}

/// Public company data returned by the profile lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyProfile {
    pub company_name: String,
    pub sector: String,
    pub address: String,
    pub management: Management,
    #[serde(deserialize_with = "lenient_vec")]
    pub ownership: Vec<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub corporate_actions: Vec<String>,
    pub prospectus_summary: String,
    pub key_financials: KeyFinancials,
    pub market_data: MarketSnapshot,
    pub ksei_stats: KseiStats,
    #[serde(deserialize_with = "null_as_default")]
    pub news: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yoy_growth() {
        let metrics = StockMetrics {
            rev_now: 120.0,
            rev_last_year: 100.0,
            ..Default::default()
        };
        assert!((metrics.yoy_growth_pct().unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(StockMetrics::default().yoy_growth_pct(), None);
    }

    #[test]
    fn test_metrics_coerce_text_values() {
        let metrics: StockMetrics = serde_json::from_str(
            r#"{"roe": "18.2", "pbvInput": "n/a", "revNow": "120", "revLastYear": 100, "cash": null}"#,
        )
        .unwrap();
        assert_eq!(metrics.roe, 18.2);
        assert_eq!(metrics.pbv_input, 0.0);
        assert_eq!(metrics.cash, 0.0);
        assert!((metrics.yoy_growth_pct().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_use_camel_case() {
        let metrics: StockMetrics =
            serde_json::from_str(r#"{"pbvInput": 1.4, "revLastYear": 90}"#).unwrap();
        assert_eq!(metrics.pbv_input, 1.4);
        assert_eq!(metrics.rev_last_year, 90.0);
        assert_eq!(metrics.roe, 0.0);
    }

    #[test]
    fn test_verdict_parsing() {
        let verdict: FundamentalVerdict = serde_json::from_str(
            r#"{
                "verdict": "TRADING_MOMENTUM",
                "fundamentalScore": "78",
                "riskAnalysis": ["Leverage naik"],
                "accuracyMatrix": {"profitabilityQuality": 80, "solvencyRisk": "65"}
            }"#,
        )
        .unwrap();
        assert_eq!(verdict.verdict, Verdict::TradingMomentum);
        assert_eq!(verdict.verdict.to_string(), "TRADING MOMENTUM");
        assert_eq!(verdict.score(), 78.0);
        assert_eq!(verdict.accuracy_matrix.solvency_risk, 65.0);
        assert_eq!(verdict.accuracy_matrix.pillars()[3], ("Cash Flow", 0.0));
        assert!(verdict.executive_summary.is_empty());
    }

    #[test]
    fn test_verdict_tolerates_absent_and_unknown_fields() {
        let verdict: FundamentalVerdict = serde_json::from_str(r#"{"verdict": "BELI"}"#).unwrap();
        assert_eq!(verdict.verdict, Verdict::Unrecognized);
        assert_eq!(verdict.moat(), DEFAULT_MOAT);

        let verdict: FundamentalVerdict = serde_json::from_str("{}").unwrap();
        assert_eq!(verdict, FundamentalVerdict::default());
    }

    #[test]
    fn test_verdict_tolerates_null_fields() {
        let verdict: FundamentalVerdict = serde_json::from_str(
            r#"{"verdict": null, "riskAnalysis": null, "accuracyMatrix": null, "fundamentalScore": 61}"#,
        )
        .unwrap();
        assert_eq!(verdict.verdict, Verdict::Unrecognized);
        assert!(verdict.risk_analysis.is_empty());
        assert_eq!(verdict.accuracy_matrix, AccuracyMatrix::default());
        assert_eq!(verdict.score(), 61.0);

        let profile: CompanyProfile = serde_json::from_str(
            r#"{"ownership": null, "news": null, "management": {"directors": null}}"#,
        )
        .unwrap();
        assert!(profile.ownership.is_empty());
        assert!(profile.news.is_empty());
        assert!(profile.management.directors.is_empty());
    }

    #[test]
    fn test_score_is_clamped() {
        let verdict = FundamentalVerdict {
            fundamental_score: 140.0,
            ..Default::default()
        };
        assert_eq!(verdict.score(), 100.0);
    }

    #[test]
    fn test_company_profile_partial() {
        let profile: CompanyProfile = serde_json::from_str(
            r#"{"companyName": "Bank Central Asia Tbk", "management": {"presDir": "Jahja Setiaatmadja"}, "news": [{"title": "Dividen interim"}]}"#,
        )
        .unwrap();
        assert_eq!(profile.company_name, "Bank Central Asia Tbk");
        assert_eq!(profile.management.pres_dir, "Jahja Setiaatmadja");
        assert!(profile.management.directors.is_empty());
        assert_eq!(profile.news[0].title, "Dividen interim");
        assert!(profile.news[0].url.is_empty());
    }
}
