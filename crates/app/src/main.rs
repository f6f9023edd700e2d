mod capabilities;
mod error;
mod extract;
mod prompt;
mod providers;

use capabilities::{AnswerModel, SpeechSynthesizer, Transcriber};
use clap::{Parser, Subcommand};
use error::PipelineError;
use extract::extract_document;
use prompt::build_prompt;
use providers::cartesia::{DEFAULT_CARTESIA_URL, DEFAULT_CARTESIA_VOICE};
use providers::deepgram::DEFAULT_DEEPGRAM_URL;
use providers::gemini::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};
use providers::{CartesiaSynthesizer, DeepgramTranscriber, GeminiAnswerModel, OpenAiCompatibleEmbedder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use voicedoc_core::{
    DocumentSession, Embedder, HashingEmbedder, DEFAULT_CHUNK_SIZE, DEFAULT_EMBEDDING_DIMENSIONS,
};

#[derive(Parser)]
#[command(name = "voicedoc", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Chunk size in characters.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Pack whole sentences into chunks instead of the fixed-size split.
    #[arg(long, default_value_t = false)]
    sentence_chunks: bool,

    /// OpenAI-compatible embeddings base URL (e.g. http://localhost:11434/v1).
    /// The built-in hashing embedder is used when unset.
    #[arg(long, env = "EMBEDDING_ENDPOINT")]
    embedding_endpoint: Option<String>,

    /// API key for the embeddings endpoint, if it needs one.
    #[arg(long, env = "EMBEDDING_API_KEY", hide_env_values = true)]
    embedding_api_key: Option<String>,

    /// Embedding model name on the remote endpoint.
    #[arg(long, default_value = "text-embedding-3-small")]
    embedding_model: String,

    /// Embedding dimensionality.
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIMENSIONS)]
    embedding_dimensions: usize,

    /// Deepgram base URL.
    #[arg(long, default_value = DEFAULT_DEEPGRAM_URL)]
    deepgram_url: String,

    /// Deepgram API key, needed only with --audio.
    #[arg(long, env = "DEEPGRAM_API_KEY", hide_env_values = true)]
    deepgram_api_key: Option<String>,

    /// Gemini base URL.
    #[arg(long, default_value = DEFAULT_GEMINI_URL)]
    gemini_url: String,

    /// Gemini model used for answer generation.
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Gemini API key, needed by the ask command.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Cartesia base URL.
    #[arg(long, default_value = DEFAULT_CARTESIA_URL)]
    cartesia_url: String,

    /// Cartesia API key, needed only with --speak-to.
    #[arg(long, env = "CARTESIA_API_KEY", hide_env_values = true)]
    cartesia_api_key: Option<String>,

    /// Cartesia voice id for the spoken answer.
    #[arg(long, default_value = DEFAULT_CARTESIA_VOICE)]
    cartesia_voice: String,
}

#[derive(Subcommand)]
enum Command {
    /// Ask one question about a PDF and print (and optionally speak) the answer.
    Ask {
        /// PDF document to load.
        #[arg(long)]
        pdf: PathBuf,
        /// Typed question text.
        #[arg(long, conflicts_with = "audio")]
        query: Option<String>,
        /// WAV recording of the question, transcribed before retrieval.
        #[arg(long)]
        audio: Option<PathBuf>,
        /// Number of chunks retrieved into the prompt context.
        #[arg(long, default_value = "3")]
        top_k: usize,
        /// Write the spoken answer as WAV to this path.
        #[arg(long)]
        speak_to: Option<PathBuf>,
        /// Print the retrieved chunks and scores before the answer.
        #[arg(long, default_value_t = false)]
        show_context: bool,
    },
    /// Extract and chunk a PDF, then print the top-k chunks for a query
    /// without calling the answer model.
    Chunks {
        /// PDF document to load.
        #[arg(long)]
        pdf: PathBuf,
        /// Query to rank chunks against.
        #[arg(long)]
        query: String,
        /// Number of chunks to print.
        #[arg(long, default_value = "3")]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let embedder: Arc<dyn Embedder> = match &cli.embedding_endpoint {
        Some(endpoint) => Arc::new(OpenAiCompatibleEmbedder::new(
            endpoint,
            cli.embedding_api_key.clone(),
            &cli.embedding_model,
            cli.embedding_dimensions,
        )),
        None => Arc::new(HashingEmbedder {
            dimensions: cli.embedding_dimensions,
        }),
    };

    info!(
        model = embedder.model_name(),
        dimensions = embedder.dimensions(),
        "embedding capability ready"
    );

    let mut session = DocumentSession::new(Arc::clone(&embedder), cli.chunk_size)?;
    if cli.sentence_chunks {
        session = session.with_sentence_chunking();
    }

    match &cli.command {
        Command::Ask {
            pdf,
            query,
            audio,
            top_k,
            speak_to,
            show_context,
        } => {
            load_pdf(&session, pdf).await?;

            let query_text = match (query, audio) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => transcribe_recording(&cli, path).await?,
                (None, None) => anyhow::bail!("provide a question with --query or --audio"),
            };

            if query_text.trim().is_empty() {
                anyhow::bail!("no question detected in the input");
            }

            let (context, result) = session.retrieve_context(&query_text, *top_k).await?;
            info!(hits = result.len(), "context retrieved");

            if *show_context {
                for hit in &result.hits {
                    println!(
                        "[chunk {} @ {}] score={:.4}\n{}",
                        hit.chunk.index, hit.chunk.start, hit.score, hit.chunk.text
                    );
                }
            }

            let gemini_key = require_key(&cli.gemini_api_key, "GEMINI_API_KEY")?;
            let model = GeminiAnswerModel::new(&cli.gemini_url, gemini_key, &cli.gemini_model);
            let answer = model
                .answer(&build_prompt(&context, &query_text))
                .await?;

            println!("{answer}");

            if let Some(out_path) = speak_to {
                let cartesia_key = require_key(&cli.cartesia_api_key, "CARTESIA_API_KEY")?;
                let synthesizer =
                    CartesiaSynthesizer::new(&cli.cartesia_url, cartesia_key, &cli.cartesia_voice);
                let wav = synthesizer.synthesize(&answer).await?;
                tokio::fs::write(out_path, &wav).await?;
                info!(path = %out_path.display(), bytes = wav.len(), "spoken answer written");
            }
        }
        Command::Chunks { pdf, query, top_k } => {
            let chunk_count = load_pdf(&session, pdf).await?;
            println!("{chunk_count} chunks indexed");

            let result = session.retrieve(query, *top_k).await?;
            for hit in &result.hits {
                println!(
                    "[chunk {} @ {}] score={:.4}\n{}",
                    hit.chunk.index, hit.chunk.start, hit.score, hit.chunk.text
                );
            }
        }
    }

    Ok(())
}

async fn load_pdf(
    session: &DocumentSession,
    pdf: &std::path::Path,
) -> Result<usize, PipelineError> {
    let extracted = extract_document(pdf)?;
    info!(
        title = %extracted.fingerprint.title,
        checksum = %extracted.fingerprint.checksum,
        chars = extracted.text.len(),
        "document extracted"
    );

    let chunk_count = session.load_document(&extracted.text).await?;
    info!(chunk_count, "index built");
    Ok(chunk_count)
}

async fn transcribe_recording(cli: &Cli, path: &std::path::Path) -> anyhow::Result<String> {
    let deepgram_key = require_key(&cli.deepgram_api_key, "DEEPGRAM_API_KEY")?;
    let audio = tokio::fs::read(path).await?;
    let transcriber = DeepgramTranscriber::new(&cli.deepgram_url, deepgram_key);
    let transcript = transcriber.transcribe(&audio).await?;
    info!(transcript = %transcript, "recording transcribed");
    Ok(transcript)
}

fn require_key<'a>(key: &'a Option<String>, name: &str) -> Result<&'a str, PipelineError> {
    key.as_deref()
        .ok_or_else(|| PipelineError::MissingCredential(name.to_string()))
}
