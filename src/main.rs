use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use prstats::analysis::parse_timestamp;
use prstats::export::{self, ExportFormat};
use prstats::models::{PullRequestSummary, RepoSlug};
use prstats::config::log_filter;
use prstats::{Config, Cutoff, ExportPipeline, GitHubClient, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "prstats")]
#[command(version)]
#[command(about = "Export GitHub pull requests and monthly contributor statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every pull request last updated at or before a cutoff to JSON
    Backfill(BackfillArgs),
    /// Write monthly merged pull request and contributor counts to CSV
    MonthlyStats(MonthlyStatsArgs),
}

#[derive(Args, Debug)]
struct RepoArgs {
    /// Target GitHub repository (e.g. "org-name/repo-name")
    #[arg(long, value_parser = parse_repo)]
    repo: RepoSlug,

    /// GitHub API token (defaults to GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Target branch of the repository
    #[arg(long, default_value = "master")]
    branch: String,

    /// Directory the output files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Args, Debug)]
struct BackfillArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Only export pull requests updated at or before this time (UTC)
    #[arg(long, value_parser = parse_time, default_value = prstats::analysis::cutoff::DEFAULT_CUTOFF)]
    cutoff: DateTime<Utc>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Raw)]
    format: ExportFormat,
}

#[derive(Args, Debug)]
struct MonthlyStatsArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Only count pull requests merged at or before this time (UTC)
    #[arg(long, value_parser = parse_time)]
    until: Option<DateTime<Utc>>,

    /// Skip printing new contributors per month
    #[arg(short, long)]
    quiet: bool,
}

fn parse_repo(s: &str) -> Result<RepoSlug, String> {
    s.parse().map_err(|e: prstats::Error| e.to_string())
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let begin = Instant::now();

    match cli.command {
        Command::Backfill(args) => run_backfill(&config, args).await?,
        Command::MonthlyStats(args) => run_monthly_stats(&config, args).await?,
    }

    tracing::info!("Done in {:?}", begin.elapsed());
    Ok(())
}

fn pipeline_for(config: &Config, repo_args: &RepoArgs) -> anyhow::Result<ExportPipeline> {
    let token = config.resolve_token(repo_args.token.clone())?;
    let github = GitHubClient::from_config(&token, config)?;
    Ok(ExportPipeline::new(github, PipelineConfig::from(config)))
}

async fn run_backfill(config: &Config, args: BackfillArgs) -> anyhow::Result<()> {
    let pipeline = pipeline_for(config, &args.repo)?;
    let repo = &args.repo.repo;
    std::fs::create_dir_all(&args.repo.output_dir)?;
    let format = args.format;

    tracing::info!(
        "Backfill of {} (all branches, --branch {} ignored)",
        repo,
        args.repo.branch
    );
    let report = pipeline.backfill(repo, &Cutoff::new(args.cutoff)).await?;
    tracing::info!(
        "Kept {} of {} pull requests over {} pages",
        report.kept.len(),
        report.scanned,
        report.pages
    );

    let path = export::output_path(
        &args.repo.output_dir,
        &export::backfill_file_name(repo, format),
    )?;
    match format {
        ExportFormat::Raw => export::write_json(&path, &report.kept)?,
        ExportFormat::Summary => {
            let summaries: Vec<PullRequestSummary> =
                report.kept.iter().map(|pr| pr.summarize()).collect();
            export::write_json(&path, &summaries)?
        }
    }

    tracing::info!("Output written to: {}", path.display());
    println!("Created file:\n\t{}", path.display());
    Ok(())
}

async fn run_monthly_stats(config: &Config, args: MonthlyStatsArgs) -> anyhow::Result<()> {
    let pipeline = pipeline_for(config, &args.repo)?;
    let repo = &args.repo.repo;
    std::fs::create_dir_all(&args.repo.output_dir)?;

    let report = pipeline
        .monthly_stats(repo, &args.repo.branch, args.until)
        .await?;

    if !args.quiet {
        print!("{}", export::format_contributor_report(&report));
    }

    let (monthly_name, author_name) = export::stats_file_names(repo, &Local::now());

    let monthly_path = export::output_path(&args.repo.output_dir, &monthly_name)?;
    export::write_monthly_stats(&monthly_path, &report.months)?;
    tracing::info!("Output written to: {}", monthly_path.display());
    println!("\nCreated file:\n\t{}", monthly_path.display());

    let author_path = export::output_path(&args.repo.output_dir, &author_name)?;
    export::write_author_stats(&author_path, &report.authors)?;
    tracing::info!("Output written to: {}", author_path.display());
    println!("\nCreated file:\n\t{}", author_path.display());

    Ok(())
}
