use crate::capabilities::SpeechSynthesizer;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const DEFAULT_CARTESIA_URL: &str = "https://api.cartesia.ai";
pub const DEFAULT_CARTESIA_VOICE: &str = "694f9389-aac1-45b6-b726-9d9369183238";

const CARTESIA_VERSION: &str = "2025-04-16";
const TTS_MODEL: &str = "sonic-2";

/// Cartesia text-to-speech; the response body is a complete WAV file.
pub struct CartesiaSynthesizer {
    endpoint: String,
    api_key: String,
    voice_id: String,
    client: Client,
}

impl CartesiaSynthesizer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        voice_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for CartesiaSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let payload = json!({
            "transcript": text,
            "model_id": TTS_MODEL,
            "voice": {
                "mode": "id",
                "id": self.voice_id,
            },
            "output_format": {
                "container": "wav",
                "encoding": "pcm_s16le",
                "sample_rate": 44100,
            },
        });

        let response = self
            .client
            .post(format!("{}/tts/bytes", self.endpoint))
            .bearer_auth(&self.api_key)
            .header("Cartesia-Version", CARTESIA_VERSION)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::BackendResponse {
                backend: "cartesia".to_string(),
                details: response.status().to_string(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(PipelineError::BackendResponse {
                backend: "cartesia".to_string(),
                details: "response body was empty".to_string(),
            });
        }

        Ok(audio.to_vec())
    }
}
