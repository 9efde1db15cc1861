mod browser;
mod config;
mod output;
mod reports;
mod run;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use browser::{BrowserConfig, BrowserKind};
use config::ScrapeConfig;
use output::{OutputDocument, write_document};
use run::{BrowserRun, run_browser, run_fixtures};
use usports_stats::{Assembly, DatasetKind, DatasetReport, FixtureSet};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// Drive a real browser against the live stat pages
    Browser,
    /// Replay recorded views from a fixture document
    Fixture,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "usports-scraper", version = "0.1.0")]
#[command(about = "Harvest U SPORTS basketball team and player statistics into one JSON document")]
struct Args {
    /// Where stat views come from
    #[arg(long, value_enum, default_value_t = DataSource::Browser)]
    source: DataSource,

    /// Fixture document to replay (fixture source only)
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Datasets to harvest (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    datasets: String,

    /// List all available datasets and exit
    #[arg(long)]
    list_datasets: bool,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Season segment of the listing URLs, e.g. 2023-24
    #[arg(long)]
    season: Option<String>,

    /// Base URL of the stats site
    #[arg(long)]
    base_url: Option<String>,

    /// Navigation timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Navigation attempts per view before a dataset is abandoned
    #[arg(long)]
    retries: Option<u32>,

    /// Path of the assembled JSON document
    #[arg(long, default_value = "usports_data.json")]
    output: PathBuf,

    /// Run summary format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Browser to drive (browser source only)
    #[arg(long, value_enum, default_value_t = BrowserKind::Chrome)]
    browser: BrowserKind,

    /// Connect to a Selenium Grid hub instead of a local driver
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,

    /// Artifacts directory for screenshots and page sources of failed datasets
    #[arg(long, default_value = "target/scrape-artifacts")]
    artifacts_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_datasets(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = resolve_config(&args)?;
    let datasets = expand_datasets(&args.datasets)?;
    let plans = datasets
        .iter()
        .map(|kind| config.plan(*kind))
        .collect::<Result<Vec<_>>>()?;
    let options = config.pipeline_options();

    let outcomes = match args.source {
        DataSource::Fixture => {
            let path = args
                .fixture
                .as_ref()
                .context("--fixture is required with --source fixture")?;
            println!("{}", "📼 Replaying fixture views".bright_yellow().bold());
            run_fixtures(load_fixtures(path)?, plans, options).await?
        }
        DataSource::Browser => {
            println!("{}", "🌐 Driving browser sessions".bright_blue().bold());
            run_browser(&build_browser_run(&args, &config), plans, options).await?
        }
    };

    let mut assembly = Assembly::new();
    for outcome in outcomes {
        assembly.absorb(outcome);
    }
    let data = assembly.finish();

    write_document(&args.output, &OutputDocument::new(&data, &config.season))?;
    println!("💾 Wrote {}", args.output.display().to_string().green());

    write_report(&args, &data.completeness, start_time.elapsed())?;

    if !data.is_complete() {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_datasets(args: &Args) -> Result<bool> {
    if !args.list_datasets {
        return Ok(false);
    }
    let mut out = BufWriter::new(stdout());
    writeln!(out, "Available datasets:")?;
    for kind in DatasetKind::ALL {
        writeln!(out, "  {:15} - {}", kind.key(), kind.description())?;
    }
    out.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏀 U SPORTS Stat Scraper".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn resolve_config(args: &Args) -> Result<ScrapeConfig> {
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::load(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(season) = &args.season {
        config.season.clone_from(season);
    }
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if let Some(retries) = args.retries {
        config.retry.max_attempts = retries.max(1);
    }
    Ok(config)
}

fn expand_datasets(datasets_arg: &str) -> Result<Vec<DatasetKind>> {
    let mut selected: Vec<DatasetKind> = Vec::new();
    for token in split_csv(datasets_arg) {
        let kinds = if token.eq_ignore_ascii_case("all") {
            DatasetKind::ALL.to_vec()
        } else {
            match token.parse::<DatasetKind>() {
                Ok(kind) => vec![kind],
                Err(err) => {
                    eprintln!("⚠️  {}", err.yellow());
                    continue;
                }
            }
        };
        for kind in kinds {
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }
    }
    if selected.is_empty() {
        bail!("no known datasets selected from {datasets_arg:?}");
    }
    Ok(selected)
}

fn load_fixtures(path: &Path) -> Result<FixtureSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    FixtureSet::from_json(&raw)
        .with_context(|| format!("failed to parse fixture {}", path.display()))
}

fn build_browser_run(args: &Args, config: &ScrapeConfig) -> BrowserRun {
    BrowserRun {
        kind: args.browser,
        config: BrowserConfig {
            headless: args.headless.is_headless(),
            page_load_timeout: config.navigation_timeout(),
            remote_hub: args.hub.clone(),
            identity: None,
        },
        artifacts_dir: args.artifacts_dir.clone(),
    }
}

fn write_report(args: &Args, reports: &[DatasetReport], duration: Duration) -> Result<()> {
    let mut out = BufWriter::new(stdout());
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut out, reports)?,
        _ => {
            reports::generate_console_report(&mut out, reports, duration)?;
            writeln!(out, "🏁 Total time: {duration:?}")?;
        }
    }
    out.flush()?;
    Ok(())
}
