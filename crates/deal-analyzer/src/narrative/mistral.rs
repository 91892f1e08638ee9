use super::fallback::default_narrative;
use super::prompt::build_prompt;
use super::{NarrativeContext, NarrativeProvider, NarrativeResult, NarrativeUnavailable};
use crate::config::NarrativeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chat-completions client asking a Mistral model for a JSON narrative.
pub struct MistralNarrativeProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Model answer; any field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialNarrative {
    verdict: Option<String>,
    summary: Option<String>,
    risks: Option<Vec<String>>,
    opportunities: Option<Vec<String>>,
}

impl PartialNarrative {
    /// Fills blanks from the static narrative. Empty strings count as blank;
    /// an empty list is kept.
    fn complete(self, score: u8) -> NarrativeResult {
        let fallback = default_narrative(score);
        NarrativeResult {
            verdict: non_blank(self.verdict).unwrap_or(fallback.verdict),
            summary: non_blank(self.summary).unwrap_or(fallback.summary),
            risks: self.risks.unwrap_or(fallback.risks),
            opportunities: self.opportunities.unwrap_or(fallback.opportunities),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl MistralNarrativeProvider {
    pub fn new(config: &NarrativeConfig) -> Result<Self, NarrativeUnavailable> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(NarrativeUnavailable::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NarrativeProvider for MistralNarrativeProvider {
    fn name(&self) -> &'static str {
        "mistral"
    }

    async fn generate(
        &self,
        context: &NarrativeContext<'_>,
    ) -> Result<NarrativeResult, NarrativeUnavailable> {
        let prompt = build_prompt(context);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting deal narrative");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeUnavailable::Status(status.as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| NarrativeUnavailable::Malformed(err.to_string()))?;
        parse_completion(body, context.score())
    }
}

fn parse_completion(
    body: ChatResponse,
    score: u8,
) -> Result<NarrativeResult, NarrativeUnavailable> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| NarrativeUnavailable::Malformed("response has no message content".into()))?;

    let partial: PartialNarrative = serde_json::from_str(&content)
        .map_err(|err| NarrativeUnavailable::Malformed(err.to_string()))?;

    Ok(partial.complete(score))
}
