//! Subcommand implementations, each rendering to a string

use anyhow::Context;
use artha_stock::{
    AnalysisConfig, BrokerClassifier, DeviationAnalyzer, PeerMetrics, Ratio, ReportComposer,
    SectorAggregator, TacticalAnalysis, TacticalInput, TacticalRequest, parse_number,
};
use comfy_table::{Table, presets::UTF8_FULL};
use tracing::debug;

pub fn brokers(raw: &str) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Code", "Category", "Broker"]);

    for (i, entry) in BrokerClassifier::classify(raw).enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.code,
            entry.category.label().to_string(),
            entry.description.to_string(),
        ]);
    }
    table.to_string()
}

pub fn deviation(price: &str, reference: &str, config: &AnalysisConfig) -> String {
    let price = parse_number(price);
    let reference = parse_number(reference);
    let deviation = DeviationAnalyzer::new(config).analyze(price, reference);
    debug!(price, reference, percent = deviation.percent, "deviation computed");

    format!(
        "Deviation: {:+.2}%\nZone: {} ({})\nGauge: {:.1}% {:?}",
        deviation.percent,
        deviation.zone,
        deviation.zone.description(),
        deviation.magnitude,
        deviation.side(),
    )
}

pub fn sector(json: &str) -> anyhow::Result<String> {
    let peers: Vec<PeerMetrics> =
        serde_json::from_str(json).context("expected a JSON array of peer ratios")?;
    let averages = SectorAggregator::aggregate(&peers)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![format!("Sector average ({} peers)", peers.len()), "Value".to_string()]);
    for ratio in Ratio::ALL {
        table.add_row(vec![
            ratio.label().to_string(),
            format!("{:.2}{}", averages.get(ratio), ratio.suffix()),
        ]);
    }
    Ok(table.to_string())
}

pub fn report(json: &str, code: &str) -> anyhow::Result<String> {
    let result: TacticalAnalysis =
        serde_json::from_str(json).context("expected a tactical analysis JSON object")?;
    Ok(ReportComposer::compose(&result, &code.trim().to_uppercase()))
}

pub fn request(json: &str, config: &AnalysisConfig) -> anyhow::Result<String> {
    let input: TacticalInput =
        serde_json::from_str(json).context("expected a tactical input JSON object")?;
    let request = TacticalRequest::from_input(&input, config);
    Ok(serde_json::to_string_pretty(&request)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brokers_table() {
        let out = brokers("yp, bk, zz");
        assert!(out.contains("YP"));
        assert!(out.contains("RETAIL"));
        assert!(out.contains("RICH"));
        assert!(out.contains("UNKNOWN"));
    }

    #[test]
    fn test_deviation_output() {
        let out = deviation("98", "100", &AnalysisConfig::default());
        assert!(out.contains("-2.00%"));
        assert!(out.contains("ACCUMULATION"));

        let out = deviation("abc", "", &AnalysisConfig::default());
        assert!(out.contains("+0.00%"));
        assert!(out.contains("NEUTRAL"));
    }

    #[test]
    fn test_sector_table() {
        let out = sector(r#"[{"roe": 10, "per": 8}, {"roe": 20, "per": 12}]"#).unwrap();
        assert!(out.contains("2 peers"));
        assert!(out.contains("15.00%"));
        assert!(out.contains("10.00x"));
    }

    #[test]
    fn test_sector_rejects_empty_panel() {
        let err = sector("[]").unwrap_err();
        assert!(err.to_string().contains("peer set is empty"));
        assert!(sector("{}").is_err());
    }

    #[test]
    fn test_report_from_json() {
        let out = report(r#"{"strategyType": "Scalping", "reasoning": ["x"]}"#, "bbri").unwrap();
        assert!(out.starts_with("TACTICAL INTEL REPORT [BBRI]"));
        assert!(out.contains("STRATEGY: Scalping"));
        assert!(out.contains("• x"));
    }

    #[test]
    fn test_request_json() {
        let out = request(
            r#"{"stockCode": "antm", "price": 1500, "avgPriceTop3": 1600, "topBrokers": "AK"}"#,
            &AnalysisConfig::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stockCode"], "ANTM");
        assert_eq!(value["deviation"]["zone"], "ACCUMULATION");
        assert_eq!(value["brokers"][0]["category"], "RICH");
    }
}
