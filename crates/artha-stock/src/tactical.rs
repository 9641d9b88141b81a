//! Tactical (bandarmology) path payloads
//!
//! [`TacticalInput`] is the analyst form, [`TacticalRequest`] the enriched
//! telemetry sent to the AI collaborator, and [`TacticalAnalysis`] its reply.

use serde::{Deserialize, Serialize};

use crate::broker::{BrokerCategory, BrokerClassifier};
use crate::config::AnalysisConfig;
use crate::deviation::{DeviationAnalyzer, PriceDeviation, SummarySentiment};
use crate::input::{SLIDER_MIDPOINT, lenient_f64, lenient_percent, lenient_string, lenient_vec};

/// Market-microstructure observations entered by the analyst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TacticalInput {
    pub stock_code: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    pub order_book_status: String,
    pub trade_book_status: String,
    /// Broker summary slider, 0 (heavy distribution) to 100 (heavy accumulation)
    #[serde(deserialize_with = "lenient_percent")]
    pub broker_summary_val: u8,
    /// Average buy price of the top three brokers; `0` when not entered
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_price_top3: f64,
    /// Comma-separated broker codes
    pub top_brokers: String,
    pub raw_intelligence_data: Option<String>,
}

impl Default for TacticalInput {
    fn default() -> Self {
        Self {
            stock_code: String::new(),
            price: 0.0,
            order_book_status: "Bid Tebal (Ideal)".to_string(),
            trade_book_status: "Buy Dominan".to_string(),
            broker_summary_val: SLIDER_MIDPOINT,
            avg_price_top3: 0.0,
            top_brokers: String::new(),
            raw_intelligence_data: None,
        }
    }
}

impl TacticalInput {
    /// Current deviation of price from the broker reference
    pub fn deviation(&self, analyzer: &DeviationAnalyzer) -> PriceDeviation {
        analyzer.analyze(self.price, self.avg_price_top3)
    }

    /// Store a broker list the way the input box does: uppercased
    pub fn set_top_brokers(&mut self, raw: &str) {
        self.top_brokers = BrokerClassifier::normalize(raw);
    }

    /// Feedback chips for the current broker list
    pub fn broker_feedback(&self) -> Vec<String> {
        BrokerClassifier::feedback(&self.top_brokers)
    }
}

/// A classified broker as carried in the request payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBroker {
    pub code: String,
    pub category: BrokerCategory,
}

/// Enriched telemetry payload for the tactical AI call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticalRequest {
    pub stock_code: String,
    pub price: f64,
    pub reference_price: f64,
    pub deviation: PriceDeviation,
    pub order_book_status: String,
    pub trade_book_status: String,
    pub broker_summary_val: u8,
    pub broker_summary: SummarySentiment,
    pub brokers: Vec<ClassifiedBroker>,
    pub intelligence: Option<String>,
}

impl TacticalRequest {
    /// Derive the request from the current form state
    pub fn from_input(input: &TacticalInput, config: &AnalysisConfig) -> Self {
        let analyzer = DeviationAnalyzer::new(config);
        let broker_summary_val = input.broker_summary_val.min(100);
        let brokers = BrokerClassifier::classify(&input.top_brokers)
            .map(|entry| ClassifiedBroker {
                code: entry.code,
                category: entry.category,
            })
            .collect();
        let intelligence = input
            .raw_intelligence_data
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string);

        Self {
            stock_code: input.stock_code.trim().to_uppercase(),
            price: input.price,
            reference_price: input.avg_price_top3,
            deviation: input.deviation(&analyzer),
            order_book_status: input.order_book_status.clone(),
            trade_book_status: input.trade_book_status.clone(),
            broker_summary_val,
            broker_summary: SummarySentiment::from_value(broker_summary_val, config),
            brokers,
            intelligence,
        }
    }
}

/// AI result for the tactical path; every field tolerates absence
///
/// Price levels are kept as text: the service may answer with a number or a
/// range such as `"9.200 - 9.350"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TacticalAnalysis {
    #[serde(deserialize_with = "lenient_string")]
    pub market_structure: String,
    #[serde(deserialize_with = "lenient_string")]
    pub prediction: String,
    #[serde(deserialize_with = "lenient_string")]
    pub strategy_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub entry_area: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub stop_loss: String,
    #[serde(deserialize_with = "lenient_string")]
    pub risk_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub long_term_suitability: String,
    #[serde(deserialize_with = "lenient_string")]
    pub short_term_suitability: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub reasoning: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub dynamic_disclaimer: String,
}
