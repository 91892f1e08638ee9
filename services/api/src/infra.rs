use deal_analyzer::config::NarrativeConfig;
use deal_analyzer::error::AppError;
use deal_analyzer::narrative::{FallbackNarrative, MistralNarrativeProvider, NarrativeProvider};
use deal_analyzer::DealAnalysisService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Picks the language-model provider when a key is configured, otherwise the
/// static narrative.
pub(crate) fn narrative_provider(
    config: &NarrativeConfig,
) -> Result<Arc<dyn NarrativeProvider>, AppError> {
    if config.api_key.is_none() {
        info!("MISTRAL_API_KEY not set; deal narratives use static text");
        return Ok(Arc::new(FallbackNarrative));
    }

    let provider = MistralNarrativeProvider::new(config)?;
    info!(endpoint = provider.endpoint(), model = %config.model, "mistral narratives enabled");
    Ok(Arc::new(provider))
}

pub(crate) fn analysis_service(config: &NarrativeConfig) -> Result<DealAnalysisService, AppError> {
    let provider = narrative_provider(config)?;
    Ok(DealAnalysisService::new(provider).with_narrative_timeout(config.timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn missing_key_selects_fallback_provider() {
        let provider = narrative_provider(&NarrativeConfig::default()).expect("provider");
        assert_eq!(provider.name(), "fallback");
    }

    #[test]
    fn configured_key_selects_mistral_provider() {
        let config = NarrativeConfig {
            api_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(2),
            ..NarrativeConfig::default()
        };

        let service = analysis_service(&config).expect("service builds");
        assert_eq!(service.narrator(), "mistral");
    }
}
