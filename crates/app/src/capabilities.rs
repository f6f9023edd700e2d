use crate::error::Result;
use async_trait::async_trait;

/// Speech-to-text: one WAV recording in, one transcript out.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_wav: &[u8]) -> Result<String>;
}

/// Answer generation: one fully assembled prompt in, one answer out.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    async fn answer(&self, prompt: &str) -> Result<String>;
}

/// Text-to-speech: text in, WAV bytes out.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
