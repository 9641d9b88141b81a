//! Orchestration around the remote AI collaborator
//!
//! The collaborator is opaque: it receives a payload and returns a parsed
//! result, or fails. The orchestrator derives the payloads, forwards them,
//! and keeps the last applied result of each path for display.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::fundamental::{CompanyProfile, FundamentalVerdict, StockMetrics};
use crate::report::ReportComposer;
use crate::tactical::{TacticalAnalysis, TacticalInput, TacticalRequest};

/// The remote AI reasoning service
///
/// Implementations own transport, prompts and response schemas. Any
/// failure is reported as an error; the orchestrator does not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntelligenceService: Send + Sync {
    /// Qualitative verdict on company fundamentals
    async fn analyze_fundamental(&self, metrics: StockMetrics) -> Result<FundamentalVerdict>;

    /// Public company data for a stock code
    async fn fetch_profile(&self, stock_code: String) -> Result<CompanyProfile>;

    /// Tactical read from market telemetry plus free-text intelligence
    async fn analyze_tactical(&self, request: TacticalRequest) -> Result<TacticalAnalysis>;

    /// Service name for logs
    fn name(&self) -> &'static str;
}

/// What happened to a response
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The response was the latest and is now the displayed result
    Applied(T),
    /// A newer request was issued while this one was in flight; discarded
    Superseded,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Superseded => None,
        }
    }
}

// Monotonic request tickets for one analysis path
#[derive(Debug, Default)]
struct Tickets(AtomicU64);

impl Tickets {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

#[derive(Debug, Default)]
struct Displayed {
    fundamental: Option<FundamentalVerdict>,
    profile: Option<CompanyProfile>,
    tactical: Option<(String, TacticalAnalysis)>,
}

/// Forwards analyst input to the AI service and holds the displayed results
pub struct AnalysisOrchestrator {
    service: Arc<dyn IntelligenceService>,
    config: AnalysisConfig,
    displayed: RwLock<Displayed>,
    fundamental_tickets: Tickets,
    profile_tickets: Tickets,
    tactical_tickets: Tickets,
}

impl AnalysisOrchestrator {
    pub fn new(service: Arc<dyn IntelligenceService>, config: AnalysisConfig) -> Self {
        Self {
            service,
            config,
            displayed: RwLock::new(Displayed::default()),
            fundamental_tickets: Tickets::default(),
            profile_tickets: Tickets::default(),
            tactical_tickets: Tickets::default(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the fundamental path
    pub async fn run_fundamental(
        &self,
        metrics: StockMetrics,
    ) -> Result<Outcome<FundamentalVerdict>> {
        let ticket = self.fundamental_tickets.issue();
        info!(service = self.service.name(), ticket, "running fundamental analysis");

        let verdict = self
            .service
            .analyze_fundamental(metrics)
            .await
            .map_err(|e| self.external("fundamental", e))?;

        let mut displayed = self.displayed.write().await;
        if !self.fundamental_tickets.is_latest(ticket) {
            debug!(ticket, "fundamental response superseded");
            return Ok(Outcome::Superseded);
        }
        displayed.fundamental = Some(verdict.clone());
        Ok(Outcome::Applied(verdict))
    }

    /// Look up public company data
    ///
    /// An empty stock code is rejected without calling the service.
    pub async fn run_profile(&self, stock_code: &str) -> Result<Outcome<CompanyProfile>> {
        let code = stock_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AnalysisError::ConfigError("stock code is required".to_string()));
        }

        let ticket = self.profile_tickets.issue();
        info!(service = self.service.name(), ticket, code = %code, "fetching company profile");

        let profile = self
            .service
            .fetch_profile(code)
            .await
            .map_err(|e| self.external("profile", e))?;

        let mut displayed = self.displayed.write().await;
        if !self.profile_tickets.is_latest(ticket) {
            debug!(ticket, "profile response superseded");
            return Ok(Outcome::Superseded);
        }
        displayed.profile = Some(profile.clone());
        Ok(Outcome::Applied(profile))
    }

    /// Enrich the tactical form and run the tactical path
    pub async fn run_tactical(&self, input: &TacticalInput) -> Result<Outcome<TacticalAnalysis>> {
        let request = TacticalRequest::from_input(input, &self.config);
        let code = request.stock_code.clone();
        let ticket = self.tactical_tickets.issue();
        info!(
            service = self.service.name(),
            ticket,
            code = %code,
            zone = %request.deviation.zone,
            "running tactical analysis"
        );

        let analysis = self
            .service
            .analyze_tactical(request)
            .await
            .map_err(|e| self.external("tactical", e))?;

        let mut displayed = self.displayed.write().await;
        if !self.tactical_tickets.is_latest(ticket) {
            debug!(ticket, "tactical response superseded");
            return Ok(Outcome::Superseded);
        }
        displayed.tactical = Some((code, analysis.clone()));
        Ok(Outcome::Applied(analysis))
    }

    pub async fn fundamental(&self) -> Option<FundamentalVerdict> {
        self.displayed.read().await.fundamental.clone()
    }

    pub async fn profile(&self) -> Option<CompanyProfile> {
        self.displayed.read().await.profile.clone()
    }

    pub async fn tactical(&self) -> Option<TacticalAnalysis> {
        self.displayed
            .read()
            .await
            .tactical
            .as_ref()
            .map(|(_, analysis)| analysis.clone())
    }

    /// Canonical report for the displayed tactical result, if any
    pub async fn tactical_report(&self) -> Option<String> {
        self.displayed
            .read()
            .await
            .tactical
            .as_ref()
            .map(|(code, analysis)| ReportComposer::compose(analysis, code))
    }

    fn external(&self, path: &str, err: AnalysisError) -> AnalysisError {
        warn!(service = self.service.name(), path, error = %err, "AI service call failed");
        match err {
            AnalysisError::ExternalService(_) => err,
            other => AnalysisError::ExternalService(other.to_string()),
        }
    }
}
