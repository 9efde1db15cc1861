//! Runs the selected datasets concurrently, one task and one provider
//! session per dataset.

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::task::JoinSet;
use usports_stats::{
    DatasetOutcome, DatasetPlan, FixtureSet, MemoryProvider, PipelineOptions, ProviderError,
    run_dataset,
};

use crate::browser::{BrowserConfig, BrowserKind, Identity, WebDriverProvider, new_session};
use crate::util::{artifacts_dir, capture_artifacts};

/// Browser settings shared by every dataset session.
#[derive(Debug, Clone)]
pub struct BrowserRun {
    pub kind: BrowserKind,
    pub config: BrowserConfig,
    pub artifacts_dir: String,
}

pub fn browser_label(kind: BrowserKind) -> String {
    format!("{kind:?}").to_lowercase()
}

/// Replay recorded views. Each dataset gets its own provider over the shared
/// fixture set.
pub async fn run_fixtures(
    fixtures: FixtureSet,
    plans: Vec<DatasetPlan>,
    options: PipelineOptions,
) -> Result<Vec<DatasetOutcome>> {
    let provider = MemoryProvider::from_fixtures(fixtures);
    let mut tasks = JoinSet::new();
    for plan in plans {
        let mut provider = provider.clone();
        tasks.spawn(async move { run_dataset(&mut provider, &plan, options).await });
    }
    collect(tasks).await
}

pub async fn run_browser(
    run: &BrowserRun,
    plans: Vec<DatasetPlan>,
    options: PipelineOptions,
) -> Result<Vec<DatasetOutcome>> {
    let mut tasks = JoinSet::new();
    for plan in plans {
        let mut config = run.config.clone();
        config.identity = Some(Identity::random(&mut rand::thread_rng()));
        let kind = run.kind;
        let artifacts = run.artifacts_dir.clone();
        tasks.spawn(async move { browse_dataset(kind, config, plan, options, artifacts).await });
    }
    collect(tasks).await
}

async fn browse_dataset(
    kind: BrowserKind,
    config: BrowserConfig,
    plan: DatasetPlan,
    options: PipelineOptions,
    artifacts: String,
) -> DatasetOutcome {
    let driver = match new_session(kind, &config).await {
        Ok(driver) => driver,
        Err(err) => {
            eprintln!("❌ Could not start {kind:?} for {}: {err}", plan.kind());
            let error = ProviderError::Session(err.to_string());
            return DatasetOutcome::not_started(&plan, error.into());
        }
    };

    let mut provider = WebDriverProvider::new(driver);
    let outcome = run_dataset(&mut provider, &plan, options).await;

    if let Some(err) = &outcome.error {
        let dir = artifacts_dir(&artifacts, &browser_label(kind), plan.kind().key());
        let chain = anyhow::Error::new(err.clone())
            .context(format!("{} stopped while {}", plan.kind(), outcome.state));
        match capture_artifacts(provider.driver(), &dir, &chain).await {
            Ok(()) => eprintln!("   artifacts saved to {}", dir.yellow()),
            Err(capture) => {
                log::warn!("could not save artifacts for {}: {capture:#}", plan.kind());
            }
        }
    }

    if let Err(err) = provider.quit().await {
        log::warn!("{}: closing the browser session failed: {err}", plan.kind());
    }
    outcome
}

async fn collect(mut tasks: JoinSet<DatasetOutcome>) -> Result<Vec<DatasetOutcome>> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.context("dataset task did not finish")?;
        let status = if outcome.is_complete() { "✅" } else { "❌" };
        println!(
            "{status} {} - {} entities",
            outcome.kind.to_string().bold(),
            outcome.entities.len()
        );
        outcomes.push(outcome);
    }
    outcomes.sort_by_key(|outcome| outcome.kind);
    Ok(outcomes)
}
