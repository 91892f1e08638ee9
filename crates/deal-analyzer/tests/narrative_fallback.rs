use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use deal_analyzer::analysis::{evaluate, DealInput};
use deal_analyzer::config::NarrativeConfig;
use deal_analyzer::narrative::{
    default_narrative, MistralNarrativeProvider, NarrativeContext, NarrativeProvider,
    NarrativeResult, NarrativeUnavailable,
};
use deal_analyzer::DealAnalysisService;
use serde_json::{json, Value};

struct FailingNarrator;

#[async_trait]
impl NarrativeProvider for FailingNarrator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(
        &self,
        _context: &NarrativeContext<'_>,
    ) -> Result<NarrativeResult, NarrativeUnavailable> {
        Err(NarrativeUnavailable::Status(503))
    }
}

struct StalledNarrator;

#[async_trait]
impl NarrativeProvider for StalledNarrator {
    fn name(&self) -> &'static str {
        "stalled"
    }

    async fn generate(
        &self,
        _context: &NarrativeContext<'_>,
    ) -> Result<NarrativeResult, NarrativeUnavailable> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(NarrativeUnavailable::Malformed("unreachable".to_string()))
    }
}

fn rental_deal() -> DealInput {
    DealInput::new(200_000.0)
        .with_address("12 Lakeview Dr")
        .with_rent(2_000.0)
}

#[tokio::test]
async fn provider_errors_fall_back_to_static_narrative() {
    let service = DealAnalysisService::new(Arc::new(FailingNarrator));

    let analysis = service.analyze(&rental_deal()).await;

    let expected = default_narrative(60);
    assert_eq!(analysis.score, 60);
    assert_eq!(analysis.verdict, expected.verdict);
    assert_eq!(analysis.summary, expected.summary);
    assert_eq!(analysis.risks, expected.risks);
    assert_eq!(analysis.opportunities, expected.opportunities);
    assert_eq!(analysis.breakdown.len(), 4);
}

#[tokio::test]
async fn slow_providers_are_cut_off() {
    let service = DealAnalysisService::new(Arc::new(StalledNarrator))
        .with_narrative_timeout(Duration::from_millis(50));

    let analysis = tokio::time::timeout(Duration::from_secs(5), service.analyze(&rental_deal()))
        .await
        .expect("service honors its narrative timeout");

    assert_eq!(analysis.verdict, "Good Deal");
}

#[derive(Clone, Default)]
struct Captured {
    request: Arc<Mutex<Option<(Option<String>, Value)>>>,
}

async fn spawn_completion_server(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();
    let state = (captured.clone(), status, reply);

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                |State((captured, status, reply)): State<(Captured, StatusCode, Value)>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    *captured.request.lock().expect("capture mutex") = Some((auth, body));
                    (status, Json(reply))
                },
            ),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake completion server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server runs");
    });

    (format!("http://{addr}/v1/chat/completions"), captured)
}

fn provider_for(endpoint: String) -> MistralNarrativeProvider {
    MistralNarrativeProvider::new(&NarrativeConfig {
        api_key: Some("test-key".to_string()),
        endpoint,
        timeout: Duration::from_secs(5),
        ..NarrativeConfig::default()
    })
    .expect("provider builds")
}

#[tokio::test]
async fn mistral_provider_sends_prompt_and_parses_answer() {
    let answer = json!({
        "verdict": "Good Deal",
        "summary": "Solid rental yield for the price.",
        "risks": ["Insurance costs are rising"],
        "opportunities": ["Raise rent at renewal"]
    });
    let reply = json!({
        "choices": [{ "message": { "role": "assistant", "content": answer.to_string() } }]
    });
    let (endpoint, captured) = spawn_completion_server(StatusCode::OK, reply).await;
    let provider = provider_for(endpoint);
    let input = rental_deal();
    let evaluation = evaluate(&input);

    let narrative = provider
        .generate(&NarrativeContext::new(&input, &evaluation))
        .await
        .expect("narrative generated");

    assert_eq!(narrative.verdict, "Good Deal");
    assert_eq!(narrative.risks, vec!["Insurance costs are rising".to_string()]);

    let (auth, body) = captured
        .request
        .lock()
        .expect("capture mutex")
        .clone()
        .expect("request captured");
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], json!("mistral-large-latest"));
    assert_eq!(body["response_format"], json!({ "type": "json_object" }));
    assert_eq!(body["messages"][0]["role"], json!("user"));
    let prompt = body["messages"][0]["content"].as_str().expect("prompt text");
    assert!(prompt.contains("Property: 12 Lakeview Dr"));
    assert!(prompt.contains("Overall score: 60/100"));
}

#[tokio::test]
async fn mistral_error_status_degrades_to_fallback_in_service() {
    let (endpoint, _captured) = spawn_completion_server(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "message": "rate limited" }),
    )
    .await;
    let provider = provider_for(endpoint);
    let input = rental_deal();
    let evaluation = evaluate(&input);

    let direct = provider
        .generate(&NarrativeContext::new(&input, &evaluation))
        .await;
    assert!(matches!(direct, Err(NarrativeUnavailable::Status(429))));

    let service = DealAnalysisService::new(Arc::new(provider));
    let analysis = service.analyze(&input).await;
    assert_eq!(analysis.summary, default_narrative(60).summary);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let provider = provider_for(format!("http://{addr}/v1/chat/completions"));
    let input = rental_deal();
    let evaluation = evaluate(&input);

    let result = provider
        .generate(&NarrativeContext::new(&input, &evaluation))
        .await;

    assert!(matches!(result, Err(NarrativeUnavailable::Transport(_))));
}
