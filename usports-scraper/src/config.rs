//! Run configuration: where the stat views live and how patiently to load them.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use usports_stats::{
    Batch, DatasetKind, DatasetPlan, League, MissingColumnPolicy, PLAYER_SORT_CATEGORIES,
    PipelineOptions, RetryPolicy, Subject,
};

pub const DEFAULT_BASE_URL: &str = "https://universitysport.prestosports.com";
pub const DEFAULT_SEASON: &str = "2023-24";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "ScrapeConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ScrapeConfig::default_season")]
    pub season: String,
    #[serde(default = "ScrapeConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub missing_columns: MissingColumnPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            season: Self::default_season(),
            timeout_secs: Self::default_timeout_secs(),
            retry: RetryPolicy::default(),
            missing_columns: MissingColumnPolicy::default(),
        }
    }
}

impl ScrapeConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn default_season() -> String {
        DEFAULT_SEASON.to_string()
    }

    const fn default_timeout_secs() -> u64 {
        120
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            navigation_timeout: self.navigation_timeout(),
            retry: self.retry,
            missing_columns: self.missing_columns,
        }
    }

    fn sport_root(&self, league: League) -> String {
        format!(
            "{}/sports/{}bkb/{}",
            self.base_url.trim_end_matches('/'),
            league.code(),
            self.season
        )
    }

    pub fn team_stats_url(&self, league: League) -> String {
        format!("{}/teams?sort=&r=0&pos=off", self.sport_root(league))
    }

    pub fn standings_url(&self, league: League) -> String {
        format!("{}/standings-conf", self.sport_root(league))
    }

    pub fn player_stats_url(&self, league: League, sort: &str) -> String {
        format!(
            "{}/players?sort={sort}&view=&pos=sh&r=0",
            self.sport_root(league)
        )
    }

    /// Navigation batches and standings view for `kind`.
    pub fn plan(&self, kind: DatasetKind) -> Result<DatasetPlan> {
        let plan = match kind.subject {
            Subject::Team => DatasetPlan::new(
                kind,
                vec![Batch::new("teams", self.team_stats_url(kind.league))],
            )?
            .with_standings(self.standings_url(kind.league)),
            Subject::Player => DatasetPlan::new(
                kind,
                PLAYER_SORT_CATEGORIES
                    .iter()
                    .map(|sort| Batch::new(*sort, self.player_stats_url(kind.league, sort)))
                    .collect(),
            )?,
        };
        Ok(plan)
    }
}
