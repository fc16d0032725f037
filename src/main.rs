use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use hermes::cache::{RecordCache, DEFAULT_CACHE_PATH};
use hermes::fetch::{HarvestError, Harvester};
use hermes::github::{ApiFailure, OctocrabSource, PullRequestSource};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_RATE_LIMIT: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_CACHE: i32 = 5;

#[derive(Parser, Debug)]
#[command(name = "hermes")]
#[command(about = "CSV of when closed pull requests were opened, first commented on, and closed", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Cache location. Delete it to re-fetch every pull request
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "hermes=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn api_exit_code(err: &anyhow::Error) -> i32 {
    match hermes::github::classify_error(err) {
        ApiFailure::RateLimited => EXIT_RATE_LIMIT,
        ApiFailure::Unauthorized => EXIT_AUTH,
        ApiFailure::Other => EXIT_NETWORK,
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    let settings = match hermes::config::load_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    log::debug!("Loaded settings: {:?}", settings);

    let client = match hermes::github::create_client(&settings.gh_username, &settings.gh_token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {:#}", e);
            std::process::exit(EXIT_AUTH);
        }
    };
    let source = OctocrabSource::new(client, settings.repo_ref());

    let prs = match source.list_closed_pull_requests().await {
        Ok(prs) => prs,
        Err(e) => {
            eprintln!("GitHub API error: {:#}", e);
            std::process::exit(api_exit_code(&e));
        }
    };
    log::info!("Found {} closed pull requests in {}", prs.len(), source.repo());

    let mut cache = match RecordCache::open(&cli.cache) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cache error: {:#}", e);
            std::process::exit(EXIT_CACHE);
        }
    };
    log::debug!("Cache at {} holds {} records", cache.path().display(), cache.len());

    let harvested = Harvester::new(&source, &mut cache).harvest(&prs).await;

    let records = match harvested {
        Ok(records) => records,
        Err(HarvestError::Source(e)) => {
            eprintln!("GitHub API error: {:#}", e);
            std::process::exit(api_exit_code(&e));
        }
        Err(HarvestError::Cache(e)) => {
            eprintln!("Cache error: {:#}", e);
            std::process::exit(EXIT_CACHE);
        }
    };

    if let Err(e) = cache.close() {
        eprintln!("Cache error: {:#}", e);
        std::process::exit(EXIT_CACHE);
    }

    println!("{}", hermes::output::format_csv(&records));

    log::info!("Reported {} pull requests in {:?}", records.len(), start_time.elapsed());

    std::process::exit(EXIT_SUCCESS);
}
