//! Canonical plain-text tactical report
//!
//! Renders a [`TacticalAnalysis`] into the clipboard export format and reads
//! that format back. Section labels and their order are a compatibility
//! contract with downstream consumers of the text:
//!
//! ```text
//! TACTICAL INTEL REPORT [BBCA]
//! ========================================
//! STRATEGY: Swing
//! RISK LEVEL: Med
//!
//! [JANGKA PANJANG]
//! ...
//!
//! [JANGKA PENDEK]
//! ...
//!
//! [PREDIKSI PASAR]
//! ...
//!
//! [TACTICAL ZONE]
//! ENTRY: ...
//! TARGET: ...
//! STOP LOSS: ...
//!
//! [POINT ANALISA]
//! • first reason
//! • second reason
//! ========================================
//! DISCLAIMER: ...
//! ```
//!
//! The whole report is trimmed of leading and trailing whitespace.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::tactical::TacticalAnalysis;

const RULE: &str = "========================================";
const BULLET: &str = "• ";

const HEADER_OPEN: &str = "TACTICAL INTEL REPORT [";
const STRATEGY: &str = "STRATEGY: ";
const RISK_LEVEL: &str = "RISK LEVEL: ";
const LONG_TERM: &str = "[JANGKA PANJANG]";
const SHORT_TERM: &str = "[JANGKA PENDEK]";
const PREDICTION: &str = "[PREDIKSI PASAR]";
const ZONE: &str = "[TACTICAL ZONE]";
const ENTRY: &str = "ENTRY: ";
const TARGET: &str = "TARGET: ";
const STOP_LOSS: &str = "STOP LOSS: ";
const POINTS: &str = "[POINT ANALISA]";
const DISCLAIMER: &str = "DISCLAIMER:";

/// Fields recovered from a canonical report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub stock_code: String,
    pub strategy_type: String,
    pub risk_level: String,
    pub long_term_suitability: String,
    pub short_term_suitability: String,
    pub prediction: String,
    pub entry_area: String,
    pub target_price: String,
    pub stop_loss: String,
    pub reasoning: Vec<String>,
    pub dynamic_disclaimer: String,
}

/// Renders and re-reads the canonical tactical report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportComposer;

impl ReportComposer {
    /// Render the report for `stock_code`
    ///
    /// Output is byte-stable for a given input. Absent fields render as
    /// empty text and the report stays well formed.
    pub fn compose(result: &TacticalAnalysis, stock_code: &str) -> String {
        let reasoning = result
            .reasoning
            .iter()
            .map(|reason| format!("{BULLET}{reason}"))
            .collect::<Vec<_>>()
            .join("\n");

        let text = format!(
            "{HEADER_OPEN}{stock_code}]\n\
             {RULE}\n\
             {STRATEGY}{strategy}\n\
             {RISK_LEVEL}{risk}\n\
             \n\
             {LONG_TERM}\n\
             {long_term}\n\
             \n\
             {SHORT_TERM}\n\
             {short_term}\n\
             \n\
             {PREDICTION}\n\
             {prediction}\n\
             \n\
             {ZONE}\n\
             {ENTRY}{entry}\n\
             {TARGET}{target}\n\
             {STOP_LOSS}{stop}\n\
             \n\
             {POINTS}\n\
             {reasoning}\n\
             {RULE}\n\
             {DISCLAIMER} {disclaimer}",
            strategy = result.strategy_type,
            risk = result.risk_level,
            long_term = result.long_term_suitability,
            short_term = result.short_term_suitability,
            prediction = result.prediction,
            entry = result.entry_area,
            target = result.target_price,
            stop = result.stop_loss,
            disclaimer = result.dynamic_disclaimer,
        );

        text.trim().to_string()
    }

    /// Recover report fields by their section markers
    ///
    /// Exact for fields that contain no section markers themselves and no
    /// leading or trailing whitespace at the report edges.
    pub fn parse(report: &str) -> Result<ParsedReport> {
        let mut cursor = Cursor::new(report.trim());

        cursor.expect(HEADER_OPEN)?;
        let stock_code = cursor.until(&format!("]\n{RULE}\n{STRATEGY}"))?;
        let strategy_type = cursor.until(&format!("\n{RISK_LEVEL}"))?;
        let risk_level = cursor.until(&format!("\n\n{LONG_TERM}\n"))?;
        let long_term_suitability = cursor.until(&format!("\n\n{SHORT_TERM}\n"))?;
        let short_term_suitability = cursor.until(&format!("\n\n{PREDICTION}\n"))?;
        let prediction = cursor.until(&format!("\n\n{ZONE}\n{ENTRY}"))?;
        let entry_area = cursor.until(&format!("\n{TARGET}"))?;
        let target_price = cursor.until(&format!("\n{STOP_LOSS}"))?;
        let stop_loss = cursor.until(&format!("\n\n{POINTS}\n"))?;
        let points = cursor.until(&format!("\n{RULE}\n{DISCLAIMER}"))?;
        let disclaimer = cursor.rest();

        let reasoning = if points.is_empty() {
            Vec::new()
        } else {
            points
                .lines()
                .map(|line| line.strip_prefix(BULLET).unwrap_or(line).to_string())
                .collect()
        };

        Ok(ParsedReport {
            stock_code,
            strategy_type,
            risk_level,
            long_term_suitability,
            short_term_suitability,
            prediction,
            entry_area,
            target_price,
            stop_loss,
            reasoning,
            dynamic_disclaimer: disclaimer.strip_prefix(' ').unwrap_or(disclaimer).to_string(),
        })
    }
}

// Forward-only scan over the report text
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn expect(&mut self, marker: &str) -> Result<()> {
        self.rest = self
            .rest
            .strip_prefix(marker)
            .ok_or_else(|| missing(marker))?;
        Ok(())
    }

    // Text up to `marker`, consuming the marker
    fn until(&mut self, marker: &str) -> Result<String> {
        let at = self.rest.find(marker).ok_or_else(|| missing(marker))?;
        let value = self.rest[..at].to_string();
        self.rest = &self.rest[at + marker.len()..];
        Ok(value)
    }

    fn rest(self) -> &'a str {
        self.rest
    }
}

fn missing(marker: &str) -> AnalysisError {
    AnalysisError::ReportFormat(format!("missing section marker {:?}", marker.trim()))
}
