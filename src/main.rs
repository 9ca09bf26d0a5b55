//! Command-line entry point.
//!
//! Reads a JSON bundle of recommendation lists, interactions, users,
//! matches and revenue records, runs both engines once and prints both
//! reports as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! match-analytics [--markdown] <BUNDLE>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use match_analytics::adapters::InMemoryNotificationChannel;
use match_analytics::application::{BusinessEngine, EffectivenessEngine};
use match_analytics::config::{AppConfig, LogFormat, LoggingConfig};
use match_analytics::domain::records::{
    Interaction, MatchRecord, RecommendationList, RevenueRecord, UserRecord,
};
use match_analytics::domain::reporting::{BusinessReport, EffectivenessReport};

/// Command-line arguments for match-analytics
#[derive(Parser, Debug)]
#[command(name = "match-analytics")]
#[command(about = "Scores recommendation effectiveness and business impact")]
#[command(version)]
struct Args {
    /// JSON input bundle
    bundle: PathBuf,

    /// Print markdown reports instead of JSON
    #[arg(long)]
    markdown: bool,
}

/// Input bundle; every section may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputBundle {
    #[serde(default)]
    recommendations: Vec<RecommendationList>,
    #[serde(default)]
    interactions: Vec<Interaction>,
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    matches: Vec<MatchRecord>,
    #[serde(default)]
    revenue: Vec<RevenueRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    effectiveness: EffectivenessReport,
    business: BusinessReport,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = logging
        .env_filter()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let path = args.bundle;
    let bundle: InputBundle = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    info!(
        path = %path.display(),
        lists = bundle.recommendations.len(),
        interactions = bundle.interactions.len(),
        users = bundle.users.len(),
        matches = bundle.matches.len(),
        revenue_records = bundle.revenue.len(),
        "Loaded input bundle"
    );

    let trends = config.engine.trend_analyzer()?;
    let channel = Arc::new(InMemoryNotificationChannel::new());

    let mut effectiveness = EffectivenessEngine::new(
        Arc::new(config.benchmarks.effectiveness()?),
        channel.clone(),
    )
    .with_time_window(config.engine.time_window_days)
    .with_trend_analyzer(trends)
    .with_coverage_policy(config.engine.coverage_policy)
    .with_novelty_weight(config.engine.apply_novelty_weight);

    let mut business = BusinessEngine::new(Arc::new(config.benchmarks.business()?), channel.clone())
        .with_time_window(config.engine.time_window_days)
        .with_trend_analyzer(trends);

    effectiveness.calculate(&bundle.recommendations, &bundle.interactions);
    business.calculate(&bundle.users, &bundle.matches, &bundle.revenue);

    let output = Output {
        effectiveness: effectiveness.generate_report()?,
        business: business.generate_report()?,
    };
    info!(
        effectiveness_score = output.effectiveness.summary.overall_score,
        business_score = output.business.summary.overall_score,
        events = channel.event_count(),
        "Reports generated"
    );

    if args.markdown {
        println!("{}", output.effectiveness.to_markdown());
        println!("{}", output.business.to_markdown());
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            warn!(error = %e, "match-analytics failed");
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
