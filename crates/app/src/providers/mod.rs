pub mod cartesia;
pub mod deepgram;
pub mod gemini;
pub mod openai_embed;

pub use cartesia::CartesiaSynthesizer;
pub use deepgram::DeepgramTranscriber;
pub use gemini::GeminiAnswerModel;
pub use openai_embed::OpenAiCompatibleEmbedder;
