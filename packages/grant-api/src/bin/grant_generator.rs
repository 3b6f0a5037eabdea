//! One-shot pipeline run for a single foundation.
//!
//! Collects grants and organization data, writes the consolidated
//! description and metadata, and saves the results next to each other.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use grant_api::{output::write_report, Config};
use grant_pipeline::{
    ConsolidatedReport, GrantPipeline, HttpFetcher, OpenAI, PipelineRequest, ValidatedFetcher,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grant-generator")]
#[command(about = "Run the full grant pipeline for one foundation website")]
struct Cli {
    /// Foundation root URL
    foundation_url: String,

    /// Directory for the output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Stop after this many grants (0 for no limit)
    #[arg(long, default_value_t = 10)]
    max_grants: usize,

    /// Skip organization data collection
    #[arg(long)]
    skip_org: bool,

    /// Repeat link discovery on every candidate page
    #[arg(long)]
    go_deeper: bool,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,grant_api=debug,grant_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let crawl_config = config.crawl_config().with_go_deeper(cli.go_deeper || config.crawl_go_deeper);
    let http = HttpFetcher::with_config(&crawl_config).context("Failed to build HTTP client")?;

    let model = OpenAI::from_credentials(&config.credentials_for(cli.openai_api_key.clone()));

    let pipeline = GrantPipeline::new(Arc::new(ValidatedFetcher::new(http)), Arc::new(model))
        .with_crawl_config(crawl_config);

    let mut request = PipelineRequest::new(cli.foundation_url.clone()).with_max_grants(Some(cli.max_grants));
    if cli.skip_org {
        request = request.without_org_data();
    }

    tracing::info!(url = %cli.foundation_url, "Running grant pipeline");
    let outcome = pipeline
        .run(&request)
        .await
        .with_context(|| format!("Pipeline failed for {}", cli.foundation_url))?;

    tracing::info!(
        grants = outcome.consolidated.grant_count,
        programs = %outcome.consolidated.grant_names.join(", "),
        organization = outcome.organization_data.as_ref().map(|o| o.org_name.as_str()).unwrap_or("Unknown"),
        "Pipeline completed"
    );

    let report = ConsolidatedReport::from_outcome(&cli.foundation_url, &outcome, chrono::Utc::now());
    let paths = write_report(&cli.output_dir, &report).await?;

    for path in paths {
        println!("{}", path.display());
    }

    Ok(())
}
