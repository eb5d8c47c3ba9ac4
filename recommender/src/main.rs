//! Recommender binary entry point
//!
//! Runs a single recommendation cycle for the given cafeteria menu and weather
//! and prints the response as JSON.

use std::sync::Arc;

use clap::Parser;

use recommender::{
    GeminiProvider, Recommender, RecommenderResult, RecommendationRequest,
    core::HistoryTracker,
};
use shared::{GenerationSettings, ProcessId, SessionKey, WeatherSnapshot, logging, process_info, process_warn};

#[derive(Parser, Debug)]
#[command(name = "recommender")]
#[command(about = "Lunch recommendations that steer away from the cafeteria menu")]
struct Args {
    /// Today's cafeteria menu
    #[arg(long)]
    menu: String,

    /// Current temperature in Celsius
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    temperature_c: f64,

    /// Sky condition (e.g. 맑음, 흐림)
    #[arg(long, default_value = "맑음")]
    sky: String,

    /// Precipitation (e.g. 없음, 비, 눈)
    #[arg(long, default_value = "없음")]
    precipitation: String,

    /// Location label passed to the model
    #[arg(long, default_value = "서울")]
    location: String,

    /// Session to scope history to
    #[arg(long)]
    session: Option<String>,

    /// Gemini model name
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.8)]
    temperature: f32,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> RecommenderResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_recommender();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "recommender");

    let settings = GenerationSettings {
        model: args.model,
        temperature: args.temperature,
        timeout_ms: args.timeout_ms,
    };

    let history = Arc::new(HistoryTracker::new());
    let recommender = match GeminiProvider::from_env(settings)? {
        Some(provider) => {
            process_info!(ProcessId::current(), model = %provider.settings().model, "Using Gemini provider");
            Recommender::new(provider, history)
        }
        None => {
            process_warn!(ProcessId::current(), "GEMINI_API_KEY not set, running rule-based only");
            Recommender::<GeminiProvider>::rule_based(history)
        }
    };

    let weather = WeatherSnapshot {
        location: args.location,
        temperature_c: args.temperature_c,
        sky_condition: args.sky,
        precipitation: args.precipitation,
    };
    let request = RecommendationRequest::new(args.menu, weather)
        .with_session(SessionKey::from_optional(args.session.as_deref()));

    logging::log_progress(ProcessId::current(), "Recommending", &request.cafeteria_menu);
    let response = recommender.recommend(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    logging::log_success(ProcessId::current(), "Recommendation cycle complete");
    Ok(())
}
