//! Free-text broker list classification

use std::collections::HashMap;

use super::registry::{BrokerCategory, BrokerEntry, BrokerRegistry};

impl BrokerEntry {
    /// Desk feedback chip text, e.g. `"YP: RETAIL"`
    pub fn feedback(&self) -> String {
        format!("{}: {}", self.code, self.category.label())
    }
}

/// Annotates comma-separated broker codes with their registry category
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokerClassifier;

impl BrokerClassifier {
    /// Uppercase the raw field the way the input box stores it
    pub fn normalize(raw: &str) -> String {
        raw.to_uppercase()
    }

    /// Classify every code in `raw`, in order of appearance
    ///
    /// Tokens are split on commas, trimmed and uppercased; empty tokens are
    /// dropped. Repeated codes are annotated once per occurrence. Token shape
    /// is not validated, so malformed codes fall through to
    /// [`BrokerCategory::Unknown`].
    ///
    /// The returned iterator is lazy and can be cloned to restart it.
    pub fn classify(raw: &str) -> impl Iterator<Item = BrokerEntry> + Clone + '_ {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(BrokerRegistry::lookup)
    }

    /// Feedback chip strings for `raw`
    pub fn feedback(raw: &str) -> Vec<String> {
        Self::classify(raw).map(|entry| entry.feedback()).collect()
    }

    /// Count annotations per category
    pub fn tally(raw: &str) -> HashMap<BrokerCategory, usize> {
        Self::classify(raw).fold(HashMap::new(), |mut counts, entry| {
            *counts.entry(entry.category).or_insert(0) += 1;
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &str) -> Vec<String> {
        BrokerClassifier::classify(raw).map(|e| e.code).collect()
    }

    #[test]
    fn test_classify_trims_and_uppercases() {
        let entries: Vec<_> = BrokerClassifier::classify("yp, BK ,ms").collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].code, "YP");
        assert_eq!(entries[0].category, BrokerCategory::Retail);
        assert_eq!(entries[1].code, "BK");
        assert_eq!(entries[1].category, BrokerCategory::Rich);
        assert_eq!(entries[2].code, "MS");
        assert_eq!(entries[2].category, BrokerCategory::Rich);
    }

    #[test]
    fn test_classify_unknown_code() {
        let entries: Vec<_> = BrokerClassifier::classify("ZZ").collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, BrokerCategory::Unknown);
    }

    #[test]
    fn test_classify_empty_input() {
        assert_eq!(BrokerClassifier::classify("").count(), 0);
        assert_eq!(BrokerClassifier::classify(" , ,,").count(), 0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(codes("bk, yp, bk"), vec!["BK", "YP", "BK"]);
    }

    #[test]
    fn test_malformed_tokens_looked_up_verbatim() {
        let entries: Vec<_> = BrokerClassifier::classify("b k, 12").collect();
        assert_eq!(entries[0].code, "B K");
        assert_eq!(entries[0].category, BrokerCategory::Unknown);
        assert_eq!(entries[1].code, "12");
        assert_eq!(entries[1].category, BrokerCategory::Unknown);
    }

    #[test]
    fn test_classify_is_restartable_and_idempotent() {
        let iter = BrokerClassifier::classify("ak, hp");
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first, BrokerClassifier::classify("ak, hp").collect::<Vec<_>>());
    }

    #[test]
    fn test_feedback_and_tally() {
        assert_eq!(
            BrokerClassifier::feedback("yp, lg, zz"),
            vec!["YP: RETAIL", "LG: KONGLO", "ZZ: UNKNOWN"]
        );

        let tally = BrokerClassifier::tally("bk, ak, yp, zz");
        assert_eq!(tally.get(&BrokerCategory::Rich), Some(&2));
        assert_eq!(tally.get(&BrokerCategory::Retail), Some(&1));
        assert_eq!(tally.get(&BrokerCategory::Unknown), Some(&1));
        assert_eq!(tally.get(&BrokerCategory::Konglo), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(BrokerClassifier::normalize("yp, bk"), "YP, BK");
    }
}
