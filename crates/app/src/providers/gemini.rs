use crate::capabilities::AnswerModel;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Gemini generateContent client for the answer-generation capability.
pub struct GeminiAnswerModel {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiAnswerModel {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl AnswerModel for GeminiAnswerModel {
    async fn answer(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ],
        });

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::BackendResponse {
                backend: "gemini".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        answer_from_payload(&payload)
    }
}

fn answer_from_payload(payload: &Value) -> Result<String> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| PipelineError::BackendResponse {
            backend: "gemini".to_string(),
            details: "response has no candidate text".to_string(),
        })
}
