//! ArthaVision analytical core
//!
//! Deterministic, locally computed analysis that prepares and interprets
//! IDX equity data around an external AI reasoning service:
//!
//! - Broker code registry and classification (bandarmology desk labels)
//! - Peer-sector averages for eight valuation and profitability ratios
//! - Price vs. broker-reference deviation with zone and gauge magnitude
//! - Canonical plain-text tactical report, composed and re-parsed
//! - An orchestrator that forwards enriched payloads to the AI service
//!
//! Everything except the orchestrator is a pure, synchronous function of
//! its inputs. Callers recompute derived values after each edit.
//!
//! # Example
//!
//! ```rust
//! use artha_stock::{BrokerClassifier, BrokerCategory, DeviationAnalyzer, DeviationZone};
//!
//! let brokers: Vec<_> = BrokerClassifier::classify("yp, BK ,ms").collect();
//! assert_eq!(brokers[1].category, BrokerCategory::Rich);
//!
//! let deviation = DeviationAnalyzer::default().analyze(98.0, 100.0);
//! assert_eq!(deviation.zone, DeviationZone::Accumulation);
//! ```

pub mod broker;
pub mod config;
pub mod deviation;
pub mod error;
pub mod fundamental;
pub mod input;
pub mod orchestrator;
pub mod report;
pub mod sector;
pub mod tactical;

// Re-export main types for convenience
pub use broker::{BrokerCategory, BrokerClassifier, BrokerEntry, BrokerRegistry};
pub use config::AnalysisConfig;
pub use deviation::{DeviationAnalyzer, DeviationZone, GaugeSide, PriceDeviation, SummarySentiment};
pub use error::{AnalysisError, Result};
pub use fundamental::{CompanyProfile, FundamentalVerdict, StockMetrics, Verdict};
pub use input::parse_number;
pub use orchestrator::{AnalysisOrchestrator, IntelligenceService, Outcome};
pub use report::{ParsedReport, ReportComposer};
pub use sector::{PeerMetrics, Ratio, SectorAggregator, SectorAverages, SectorPanel};
pub use tactical::{TacticalAnalysis, TacticalInput, TacticalRequest};
