use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{evaluate, DealInput, Metric, ScoreResult};
use crate::narrative::{
    default_narrative, FallbackNarrative, NarrativeContext, NarrativeProvider, NarrativeResult,
    NarrativeUnavailable,
};

/// Upper bound on a single narrative request unless configured otherwise.
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(20);

/// Wire form of an analysis request. Validated into a [`DealInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub arv: Option<f64>,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub repairs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Price is required")]
    MissingPrice,
    #[error("Price must be a positive number")]
    InvalidPrice,
    #[error("{0} must be a non-negative number")]
    InvalidField(&'static str),
}

impl AnalyzeRequest {
    /// Zero-valued optional figures are treated as not supplied.
    pub fn into_input(self) -> Result<DealInput, ValidationError> {
        let price = match self.price {
            None => return Err(ValidationError::MissingPrice),
            Some(price) if price == 0.0 => return Err(ValidationError::MissingPrice),
            Some(price) if !price.is_finite() || price < 0.0 => {
                return Err(ValidationError::InvalidPrice)
            }
            Some(price) => price,
        };

        Ok(DealInput {
            address: self
                .address
                .map(|address| address.trim().to_string())
                .filter(|address| !address.is_empty()),
            price,
            arv: optional_amount("arv", self.arv)?,
            rent: optional_amount("rent", self.rent)?,
            repairs: optional_amount("repairs", self.repairs)?,
        })
    }
}

fn optional_amount(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(amount) if !amount.is_finite() || amount < 0.0 => {
            Err(ValidationError::InvalidField(field))
        }
        Some(amount) if amount == 0.0 => Ok(None),
        other => Ok(other),
    }
}

/// Response body for a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealAnalysis {
    pub score: u8,
    pub verdict: String,
    pub summary: String,
    pub breakdown: Vec<Metric>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

impl DealAnalysis {
    fn assemble(evaluation: ScoreResult, narrative: NarrativeResult) -> Self {
        Self {
            score: evaluation.score,
            verdict: narrative.verdict,
            summary: narrative.summary,
            breakdown: evaluation.metrics,
            risks: narrative.risks,
            opportunities: narrative.opportunities,
        }
    }
}

/// Runs the metric engine and layers narrative text on top of it.
pub struct DealAnalysisService {
    narrator: Arc<dyn NarrativeProvider>,
    narrative_timeout: Duration,
}

impl Default for DealAnalysisService {
    fn default() -> Self {
        Self::new(Arc::new(FallbackNarrative))
    }
}

impl DealAnalysisService {
    pub fn new(narrator: Arc<dyn NarrativeProvider>) -> Self {
        Self {
            narrator,
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
        }
    }

    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = timeout;
        self
    }

    pub fn narrator(&self) -> &str {
        self.narrator.name()
    }

    /// Validate a wire request and analyze it.
    pub async fn analyze_request(
        &self,
        request: AnalyzeRequest,
    ) -> Result<DealAnalysis, ValidationError> {
        let input = request.into_input()?;
        Ok(self.analyze(&input).await)
    }

    /// Never fails: narrative problems degrade to the static narrative.
    pub async fn analyze(&self, input: &DealInput) -> DealAnalysis {
        let evaluation = evaluate(input);
        let context = NarrativeContext::new(input, &evaluation);

        let outcome = tokio::time::timeout(self.narrative_timeout, self.narrator.generate(&context))
            .await
            .unwrap_or_else(|_| Err(NarrativeUnavailable::TimedOut(self.narrative_timeout)));

        let narrative = match outcome {
            Ok(narrative) => narrative,
            Err(err) => {
                warn!(
                    provider = self.narrator.name(),
                    error = %err,
                    "narrative unavailable, using fallback"
                );
                default_narrative(evaluation.score)
            }
        };

        info!(
            score = evaluation.score,
            metrics = evaluation.metrics.len(),
            verdict = %narrative.verdict,
            "deal analyzed"
        );

        DealAnalysis::assemble(evaluation, narrative)
    }
}
