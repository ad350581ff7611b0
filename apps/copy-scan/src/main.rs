//! copy-scan
//!
//! Reads marketing copy from a file or stdin, runs the compliance pipeline and
//! prints the analysis as JSON on stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use compliance_engine::{ComplianceEngine, EngineConfig, Industry};
use model_client::AnthropicClient;
use shared_types::{AnalysisResult, RiskLevel, Severity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "copy-scan")]
#[command(version, about = "Check marketing copy for compliance issues")]
struct Args {
    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Industry vertical: real_estate, finance, healthcare or general
    #[arg(short, long, default_value = "general")]
    industry: String,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the model even when an API key is configured
    #[arg(long)]
    pattern_only: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Exit with status 2 when the result is in the danger tier
    #[arg(long)]
    fail_on_danger: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let content = read_input(args.input.as_ref())?;
    let engine = build_engine(config, args.pattern_only);

    if Industry::parse_known(&args.industry).is_none() {
        tracing::warn!(industry = %args.industry, "Unknown industry, using general rules");
    }

    let result = tokio::select! {
        result = engine.analyze(&content, &args.industry) => result.context("Analysis failed")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, analysis cancelled");
            std::process::exit(130);
        }
    };

    tracing::info!("{}", summary(&result));

    let json = if args.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("Failed to serialize analysis")?;
    println!("{}", json);

    if args.fail_on_danger && result.risk_level == RiskLevel::Danger {
        std::process::exit(2);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// One-line digest of a result for the log.
fn summary(result: &AnalysisResult) -> String {
    format!(
        "score={} risk={} high={} medium={} low={}{}",
        result.safety_score,
        result.risk_level,
        result.count(Severity::High),
        result.count(Severity::Medium),
        result.count(Severity::Low),
        if result.mode.is_pattern_only() {
            " (pattern analysis only)"
        } else {
            ""
        }
    )
}

/// Attach the Anthropic client when credentials are available.
fn build_engine(config: EngineConfig, pattern_only: bool) -> ComplianceEngine {
    if pattern_only {
        return ComplianceEngine::new(config);
    }
    match AnthropicClient::from_env() {
        Ok(client) => {
            tracing::info!(model = %client.model(), "Using Anthropic model service");
            ComplianceEngine::with_model(config, Arc::new(client))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Model service unavailable, running pattern analysis only");
            ComplianceEngine::new(config)
        }
    }
}
