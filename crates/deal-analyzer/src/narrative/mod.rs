//! Narrative enrichment for scored deals.
//!
//! A [`NarrativeProvider`] turns a scored deal into a verdict, a short summary,
//! and lists of risks and opportunities. Providers may fail for any reason;
//! callers are expected to fall back to [`default_narrative`], which
//! [`FallbackNarrative`] always returns.

mod fallback;
mod mistral;
mod prompt;

pub use fallback::{default_narrative, fallback_verdict, FallbackNarrative};
pub use mistral::MistralNarrativeProvider;
pub use prompt::build_prompt;

use crate::analysis::{DealInput, ScoreResult};
use async_trait::async_trait;

/// Everything a provider may draw on when writing about a deal.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub input: &'a DealInput,
    pub evaluation: &'a ScoreResult,
}

impl<'a> NarrativeContext<'a> {
    pub fn new(input: &'a DealInput, evaluation: &'a ScoreResult) -> Self {
        Self { input, evaluation }
    }

    pub fn score(&self) -> u8 {
        self.evaluation.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeResult {
    pub verdict: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Reasons a provider could not produce a narrative.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeUnavailable {
    #[error("no API key configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        context: &NarrativeContext<'_>,
    ) -> Result<NarrativeResult, NarrativeUnavailable>;
}
