//! Generative-AI API probes and image-generation backend
//!
//! `genai-probe probe` sends one request each to the Gemini text endpoint and
//! the Hugging Face image endpoint and reports what came back.
//! `genai-probe serve` runs a small HTTP backend that turns prompts into
//! images through the Hugging Face inference API.

mod api;
mod core;
mod models;
mod probes;

use crate::api::endpoints::{AppState, create_router};
use crate::core::client::ReqwestTransport;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::model_manager::ModelManager;
use crate::core::provider::{HttpTransport, ProviderType};
use crate::core::providers::HuggingFaceProvider;
use crate::probes::run_probe;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Probe(Vec<ProviderType>),
    Serve,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(Command::Help);
    }

    let all = vec![ProviderType::Gemini, ProviderType::HuggingFace];
    match args.first().map(String::as_str) {
        None => Ok(Command::Probe(all)),
        Some("serve") => Ok(Command::Serve),
        Some("probe") => match args.get(1).map(String::as_str) {
            None | Some("all") => Ok(Command::Probe(all)),
            Some(target) => ProviderType::from_str(target)
                .map(|p| Command::Probe(vec![p]))
                .ok_or_else(|| format!("Unknown probe target: {}", target)),
        },
        Some(other) => Err(format!("Unknown command: {}", other)),
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with --help for usage.");
            std::process::exit(1);
        }
    };

    if command == Command::Help {
        print_help();
        return;
    }

    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.server.log_level);

    match command {
        Command::Probe(targets) => run_probes(&config, &targets).await,
        Command::Serve => serve(config).await,
        Command::Help => {}
    }
}

/// Run the requested probes concurrently and print their reports in order
async fn run_probes(config: &Config, targets: &[ProviderType]) {
    let transport: Arc<dyn HttpTransport> = match ReqwestTransport::new(config.request.timeout) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let reports = join_all(
        targets
            .iter()
            .map(|target| run_probe(*target, config, transport.clone())),
    )
    .await;

    for (i, lines) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in lines {
            line.emit();
        }
    }
}

/// Start the image-generation backend
async fn serve(config: Arc<Config>) {
    print_startup_banner(&config);

    let provider = match &config.huggingface_token {
        Some(token) => match ReqwestTransport::new(Some(config.server.generation_timeout)) {
            Ok(transport) => Some(Arc::new(HuggingFaceProvider::new(
                Arc::new(transport),
                &config.huggingface.inference_url,
                &config.huggingface.router_url,
                token.clone(),
            ))),
            Err(e) => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        },
        None => {
            warn!("No Hugging Face token configured; image generation requests will fail");
            None
        }
    };

    let app_state = AppState {
        model_manager: Arc::new(ModelManager::new()),
        provider,
    };
    let app = create_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 CodeBloom AI Hub Backend");
    println!("   Router URL: {}", config.huggingface.router_url);
    println!("   Inference URL: {}", config.huggingface.inference_url);
    println!("   Generation Timeout: {}s", config.server.generation_timeout);
    println!("   Server: {}:{}", config.server.host, config.server.port);
    println!(
        "   Hugging Face Token: {}",
        if config.huggingface_token.is_some() {
            "Configured"
        } else {
            "Missing"
        }
    );
    println!();
}

/// Print help message
fn print_help() {
    println!("genai-probe v0.1.0");
    println!();
    println!("Usage:");
    println!("  genai-probe [probe [text|image|all]]   Run one-shot API probes (default: all)");
    println!("  genai-probe serve                      Start the image-generation backend");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables (a .env file is honored):");
    println!("  GEMINI_API_KEY - Google Gemini API key (text probe)");
    println!("  HUGGING_FACE_TOKEN / HF_TOKEN - Hugging Face token (image probe, backend)");
    println!("  CONFIG_PATH - Path to the TOML configuration (default: config.toml)");
    println!("  RUST_LOG - Log filter, overrides server.log_level");
}
