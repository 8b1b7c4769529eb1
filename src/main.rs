use anyhow::Context;
use bioquery::{Engine, RankingConfig, TfidfConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const NO_QUERY: &str = r#"{"error": "No query provided"}"#;

/// Rank space biology experiments against a free-text query
#[derive(Parser, Debug)]
#[command(name = "bioquery")]
#[command(about = "Rank space biology experiments against a free-text query", long_about = None)]
struct Args {
    /// Free-text query, e.g. "mouse liver microgravity"
    query: Option<String>,

    /// Path to the experiment CSV
    #[arg(
        short,
        long,
        env = "BIOQUERY_DATA",
        default_value = "public/data/nasa_papers_meta_cleaned.csv"
    )]
    data: PathBuf,

    /// Number of matches to return
    #[arg(long, default_value_t = bioquery_similarity::DEFAULT_TOP_K)]
    top_k: usize,

    /// Vocabulary size cap for the TF-IDF index
    #[arg(long, default_value_t = bioquery_similarity::DEFAULT_MAX_FEATURES)]
    max_features: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let Some(query) = args.query.as_deref() else {
        println!("{}", NO_QUERY);
        return ExitCode::FAILURE;
    };

    match run(&args, query) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, query: &str) -> anyhow::Result<String> {
    info!("Starting bioquery v{}", env!("CARGO_PKG_VERSION"));
    info!("Query received: {}", query.to_lowercase());

    let tfidf = TfidfConfig {
        max_features: args.max_features,
    };
    let ranking = RankingConfig {
        top_k: args.top_k,
        ..RankingConfig::default()
    };

    let engine = Engine::load(&args.data, &tfidf)
        .with_context(|| format!("failed to prepare dataset {:?}", args.data))?;
    let result = engine.query(query, ranking).context("prediction failed")?;

    Ok(serde_json::to_string(&result)?)
}
