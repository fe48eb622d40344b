//! Summarizer server binary
//!
//! Run with: cargo run -p notes-summarizer --bin notes-summarizer-server

use clap::Parser;
use std::path::PathBuf;

use notes_summarizer::{config::SummarizerConfig, server::SummarizerServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "notes-summarizer-server", version, about = "AI notes summarizer")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_summarizer=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                    AI Notes Summarizer                    ║
║       Upload PDFs or paste notes, get clean summaries     ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let mut config = SummarizerConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Backend: {:?}", config.model.backend);
    tracing::info!("  - Model: {}", config.model.model);
    tracing::info!("  - Endpoint: {}", config.model.base_url);
    tracing::info!("  - Minimum input: {} characters", config.input.min_chars);

    let server = SummarizerServer::new(config)?;

    // Check the backend
    tracing::info!("Checking summarization backend...");
    if server.state().is_ready().await {
        tracing::info!("Backend is reachable");
    } else {
        tracing::warn!("Backend not reachable; summaries will fail until it is");
        tracing::warn!("  - Hugging Face: set HF_TOKEN and check network access");
        tracing::warn!("  - Ollama: run `ollama serve` and `ollama pull <model>`");
    }

    println!("\nServer starting...");
    println!("  Page: http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/extract        - Extract text from a PDF");
    println!("  POST /api/summarize      - Summarize text");
    println!("  POST /api/export/:format - Download as txt or pdf");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
