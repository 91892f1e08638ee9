use super::{NarrativeContext, NarrativeProvider, NarrativeResult, NarrativeUnavailable};
use async_trait::async_trait;

const DEFAULT_RISKS: [&str; 3] = [
    "Market conditions may affect projected values",
    "Repair estimates may be understated",
    "Vacancy risk not fully modeled",
];

const DEFAULT_OPPORTUNITIES: [&str; 3] = [
    "Value-add potential through renovations",
    "Rental income provides cash flow stability",
    "Appreciation in growing markets",
];

pub fn fallback_verdict(score: u8) -> &'static str {
    match score {
        75..=u8::MAX => "Strong Buy",
        60..=74 => "Good Deal",
        45..=59 => "Proceed with Caution",
        _ => "Pass",
    }
}

/// Static narrative keyed off the score alone.
pub fn default_narrative(score: u8) -> NarrativeResult {
    NarrativeResult {
        verdict: fallback_verdict(score).to_string(),
        summary: format!("This property scores {score}/100 based on standard investment metrics."),
        risks: DEFAULT_RISKS.iter().map(|risk| risk.to_string()).collect(),
        opportunities: DEFAULT_OPPORTUNITIES
            .iter()
            .map(|opportunity| opportunity.to_string())
            .collect(),
    }
}

/// Provider that never fails; used when no language model is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackNarrative;

#[async_trait]
impl NarrativeProvider for FallbackNarrative {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(
        &self,
        context: &NarrativeContext<'_>,
    ) -> Result<NarrativeResult, NarrativeUnavailable> {
        Ok(default_narrative(context.score()))
    }
}
