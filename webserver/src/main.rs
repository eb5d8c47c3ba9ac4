//! WebServer entry point
//!
//! Serves the lunch recommendation API. Without a Gemini key every request is
//! answered by the rule-based fallback.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use recommender::{GeminiProvider, Recommender, core::HistoryTracker};
use shared::{GenerationSettings, ProcessId, logging, process_info, process_warn};
use webserver::{WebServer, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP API for cafeteria-aware lunch recommendations")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Gemini model name
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.8)]
    temperature: f32,

    /// Provider request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| webserver::WebServerError::config(format!("Invalid bind address: {e}")))?;

    logging::log_startup(ProcessId::current(), &format!("webserver on {addr}"));

    let settings = GenerationSettings {
        model: args.model,
        temperature: args.temperature,
        timeout_ms: args.timeout_ms,
    };

    let history = Arc::new(HistoryTracker::new());
    let recommender = match GeminiProvider::from_env(settings)? {
        Some(provider) => {
            process_info!(ProcessId::current(), model = %provider.settings().model, "Gemini provider enabled");
            Recommender::new(provider, history)
        }
        None => {
            process_warn!(ProcessId::current(), "GEMINI_API_KEY not set, serving rule-based recommendations only");
            Recommender::<GeminiProvider>::rule_based(history)
        }
    };

    let webserver = WebServer::new(recommender);

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
            Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
        }
    };

    webserver.run(addr, shutdown).await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
