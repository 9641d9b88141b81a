//! Broker code registry and classification

mod classifier;
mod registry;

pub use classifier::BrokerClassifier;
pub use registry::{BrokerCategory, BrokerEntry, BrokerRegistry};
