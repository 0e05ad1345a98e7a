use clap::Parser as _;
use dash_ml::analyzer::AnalyzerImpl;
use dash_ml::config::{load_or_default, AppConfig};
use dash_ml::parser::MarketplaceParser;
use dash_ml::pipeline::{run_query, QueryView};
use dash_ml::report::{self, ReportOptions};
use dash_ml::scraper::{RetryingScraper, ScraperImpl};
use futures::future::join_all;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Marketplace price and seller dashboard.
#[derive(Debug, clap::Parser)]
#[command(name = "dash-ml", version, about)]
struct Cli {
    /// Product names to search for. Each one is rendered as its own dashboard.
    #[arg(value_name = "QUERY")]
    queries: Vec<String>,

    /// Path to the JSON config file.
    #[arg(long, default_value = "config.json")]
    config: String,

    /// Also write an HTML dashboard per query into this directory.
    #[arg(long, value_name = "DIR")]
    html: Option<PathBuf>,

    /// Marketplace site id (overrides the config file).
    #[arg(long)]
    site: Option<String>,

    /// Print each result as JSON instead of the text dashboard.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let cli = Cli::parse();

    let mut config: AppConfig = match load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(site) = cli.site.clone() {
        config.site_id = site;
    }
    let config = Arc::new(config);

    let base = match ScraperImpl::new(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let scraper = RetryingScraper::new(
        base,
        config.max_retries,
        Duration::from_millis(config.retry_base_delay_ms),
    );
    let parser = MarketplaceParser::new();
    let analyzer = AnalyzerImpl::new();

    let queries = if cli.queries.is_empty() { vec![String::new()] } else { cli.queries };
    info!("Queries to process: {}", queries.len());

    let tasks: Vec<_> = queries
        .iter()
        .map(|q| run_query(q, &config.site_id, &scraper, &parser, &analyzer))
        .collect();
    let views: Vec<QueryView> = join_all(tasks).await;

    let opts = ReportOptions::new(&config.currency_symbol);
    let mut status = ExitCode::SUCCESS;
    for (i, view) in views.iter().enumerate() {
        if cli.json {
            match serde_json::to_string_pretty(view) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize result: {}", e);
                    status = ExitCode::FAILURE;
                }
            }
        } else {
            print!("{}", report::terminal::render(view, &opts));
            println!();
        }

        if let Some(dir) = &cli.html {
            if let Err(e) = report::write_html_report(dir, i, view, &opts) {
                error!("Failed to write HTML dashboard: {}", e);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
