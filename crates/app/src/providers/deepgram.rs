use crate::capabilities::Transcriber;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_DEEPGRAM_URL: &str = "https://api.deepgram.com";

/// Deepgram prerecorded transcription over their REST listen endpoint.
pub struct DeepgramTranscriber {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl DeepgramTranscriber {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    async fn transcribe(&self, audio_wav: &[u8]) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v1/listen", self.endpoint))
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", "audio/wav")
            .body(audio_wav.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::BackendResponse {
                backend: "deepgram".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        transcript_from_payload(&payload)
    }
}

fn transcript_from_payload(payload: &Value) -> Result<String> {
    payload
        .pointer("/results/channels/0/alternatives/0/transcript")
        .and_then(Value::as_str)
        .map(|transcript| transcript.to_string())
        .ok_or_else(|| PipelineError::BackendResponse {
            backend: "deepgram".to_string(),
            details: "response has no transcript field".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::transcript_from_payload;
    use serde_json::json;

    #[test]
    fn transcript_is_read_from_the_first_alternative() {
        let payload = json!({
            "results": {
                "channels": [
                    { "alternatives": [ { "transcript": "what is chapter two about" } ] }
                ]
            }
        });

        let transcript = transcript_from_payload(&payload).unwrap();
        assert_eq!(transcript, "what is chapter two about");
    }

    #[test]
    fn missing_transcript_is_a_backend_error() {
        let payload = json!({ "results": { "channels": [] } });
        assert!(transcript_from_payload(&payload).is_err());
    }
}
