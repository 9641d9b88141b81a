//! Static broker code registry
//!
//! Maps IDX broker codes to the desk classification used in bandarmology
//! reads. The table is built once on first use and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Desk classification of a broker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrokerCategory {
    /// Foreign and institutional houses, the "smart money" flow
    Rich,
    /// Houses affiliated with local conglomerates
    Konglo,
    /// Retail-dominated online brokers
    Retail,
    /// Houses with a blended client base
    Mixed,
    /// Code not present in the registry
    Unknown,
}

impl BrokerCategory {
    /// Label used on desk feedback chips
    pub fn label(&self) -> &'static str {
        match self {
            BrokerCategory::Rich => "RICH",
            BrokerCategory::Konglo => "KONGLO",
            BrokerCategory::Retail => "RETAIL",
            BrokerCategory::Mixed => "MIXED",
            BrokerCategory::Unknown => "UNKNOWN",
        }
    }

    /// All categories in display order
    pub fn all() -> [BrokerCategory; 5] {
        [
            BrokerCategory::Rich,
            BrokerCategory::Konglo,
            BrokerCategory::Retail,
            BrokerCategory::Mixed,
            BrokerCategory::Unknown,
        ]
    }
}

impl fmt::Display for BrokerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A broker code with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerEntry {
    pub code: String,
    pub category: BrokerCategory,
    pub description: &'static str,
}

const UNKNOWN_DESCRIPTION: &str = "Not in registry";

// (code, category, description)
const BROKERS: &[(&str, BrokerCategory, &str)] = &[
    ("AK", BrokerCategory::Rich, "UBS Sekuritas Indonesia"),
    ("BK", BrokerCategory::Rich, "J.P. Morgan Sekuritas Indonesia"),
    ("CG", BrokerCategory::Rich, "Citigroup Sekuritas Indonesia"),
    ("CS", BrokerCategory::Rich, "Credit Suisse Sekuritas Indonesia"),
    ("DB", BrokerCategory::Rich, "Deutsche Sekuritas Indonesia"),
    ("DP", BrokerCategory::Rich, "DBS Vickers Sekuritas Indonesia"),
    ("GW", BrokerCategory::Rich, "HSBC Sekuritas Indonesia"),
    ("KZ", BrokerCategory::Rich, "CLSA Sekuritas Indonesia"),
    ("MS", BrokerCategory::Rich, "Morgan Stanley Sekuritas Indonesia"),
    ("RX", BrokerCategory::Rich, "Macquarie Sekuritas Indonesia"),
    ("ZP", BrokerCategory::Rich, "Maybank Sekuritas Indonesia"),
    ("AI", BrokerCategory::Konglo, "UOB Kay Hian Sekuritas"),
    ("BQ", BrokerCategory::Konglo, "Korea Investment and Sekuritas Indonesia"),
    ("DX", BrokerCategory::Konglo, "Bahana Sekuritas"),
    ("HP", BrokerCategory::Konglo, "Henan Putihrai Sekuritas"),
    ("LG", BrokerCategory::Konglo, "Trimegah Sekuritas Indonesia"),
    ("MG", BrokerCategory::Konglo, "Semesta Indovest Sekuritas"),
    ("CC", BrokerCategory::Retail, "Mandiri Sekuritas"),
    ("EP", BrokerCategory::Retail, "MNC Sekuritas"),
    ("KK", BrokerCategory::Retail, "Phillip Sekuritas Indonesia"),
    ("NI", BrokerCategory::Retail, "BNI Sekuritas"),
    ("PD", BrokerCategory::Retail, "Indo Premier Sekuritas"),
    ("XC", BrokerCategory::Retail, "Ajaib Sekuritas Asia"),
    ("XL", BrokerCategory::Retail, "Stockbit Sekuritas Digital"),
    ("YP", BrokerCategory::Retail, "Mirae Asset Sekuritas Indonesia"),
    ("DR", BrokerCategory::Mixed, "RHB Sekuritas Indonesia"),
    ("IF", BrokerCategory::Mixed, "Samuel Sekuritas Indonesia"),
    ("OD", BrokerCategory::Mixed, "BRI Danareksa Sekuritas"),
    ("SQ", BrokerCategory::Mixed, "BCA Sekuritas"),
];

static REGISTRY: LazyLock<HashMap<&'static str, (BrokerCategory, &'static str)>> =
    LazyLock::new(|| {
        BROKERS
            .iter()
            .map(|&(code, category, description)| (code, (category, description)))
            .collect()
    });

/// Process-wide, read-only broker lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokerRegistry;

impl BrokerRegistry {
    /// Look up a broker code
    ///
    /// The code is uppercased before lookup. A miss is not an error: it
    /// yields an entry with [`BrokerCategory::Unknown`].
    pub fn lookup(code: &str) -> BrokerEntry {
        let code = code.to_uppercase();
        match REGISTRY.get(code.as_str()) {
            Some(&(category, description)) => BrokerEntry {
                code,
                category,
                description,
            },
            None => {
                tracing::debug!(code = %code, "broker code not in registry");
                BrokerEntry {
                    code,
                    category: BrokerCategory::Unknown,
                    description: UNKNOWN_DESCRIPTION,
                }
            }
        }
    }

    /// Number of registered codes
    #[cfg(test)]
    fn len() -> usize {
        REGISTRY.len()
    }
}
