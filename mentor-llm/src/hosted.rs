use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::GenerationParams;
use crate::error::{GenerationError, non_empty};

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

/// Text-generation model behind a hosted inference HTTP API.
#[derive(Clone, Debug)]
pub(crate) struct HostedBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    token: String,
}

impl HostedBackend {
    pub(crate) fn new(
        base_url: &str,
        model: String,
        token: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build inference HTTP client: {e}"))?;

        Ok(Self {
            http,
            endpoint: inference_endpoint(base_url, &model),
            model,
            token,
        })
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let inputs = format!("{}\n\n{}", crate::prompt::system_prompt(), prompt);
        let body = InferenceRequest {
            inputs: &inputs,
            parameters: InferenceParameters {
                max_new_tokens: params.max_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
                return_full_text: false,
            },
        };

        debug!(endpoint = %self.endpoint, prompt_chars = prompt.len(), "sending hosted generation request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        parse_generated_text(&text)
    }
}

fn inference_endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}",
        base_url.trim().trim_end_matches('/'),
        model.trim().trim_matches('/')
    )
}

/// Extract the generated text from `[{"generated_text": ...}]` or
/// `{"generated_text": ...}`.
pub(crate) fn parse_generated_text(body: &str) -> Result<String, GenerationError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let entry = match &value {
        Value::Array(items) => items.first().ok_or_else(|| {
            GenerationError::MalformedResponse("empty result list".to_owned())
        })?,
        Value::Object(_) => &value,
        _ => {
            return Err(GenerationError::MalformedResponse(
                "expected an object or a list".to_owned(),
            ));
        }
    };

    if let Some(error) = entry.get("error").and_then(Value::as_str) {
        return Err(GenerationError::MalformedResponse(format!(
            "API reported an error: {error}"
        )));
    }

    let text = entry
        .get("generated_text")
        .and_then(Value::as_str)
        .ok_or_else(|| GenerationError::MalformedResponse("missing `generated_text`".to_owned()))?;

    non_empty(text)
}

/// Prefer the API's `error` field; fall back to the raw body, shortened.
fn api_error_message(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_owned));

    let message = from_json.unwrap_or_else(|| body.trim().to_owned());
    if message.is_empty() {
        return "no response body".to_owned();
    }

    if message.chars().count() > MAX_CHARS {
        let shortened: String = message.chars().take(MAX_CHARS).collect();
        format!("{shortened}...")
    } else {
        message
    }
}
