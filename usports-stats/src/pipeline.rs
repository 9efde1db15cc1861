//! Batch coordinator.
//!
//! Drives one dataset from its first navigation to its standings pass. Batches
//! and groups run strictly in order against a single provider session; the
//! field cursor is a value handed from one group to the next and reset at the
//! start of every batch.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::augment::StandingsPass;
use crate::catalog::DatasetKind;
use crate::conference::ConferenceTable;
use crate::error::{ExtractError, LayoutError};
use crate::extract::extract_group;
use crate::layout::{DatasetLayout, MissingColumnPolicy, StandingsLayout};
use crate::provider::RenderingProvider;
use crate::reader::{HeaderCells, TableSegment, read_segment};
use crate::record::EntityMap;
use crate::report::DatasetReport;
use crate::retry::{RetryPolicy, navigate_with_retry};
use crate::schema::FieldCursor;

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_millis(120_000);

/// One navigation: a view whose segments hold every stat group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub label: String,
    pub locator: String,
}

impl Batch {
    pub fn new(label: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            locator: locator.into(),
        }
    }
}

/// Everything needed to run one dataset, checked once up front.
#[derive(Debug, Clone)]
pub struct DatasetPlan {
    kind: DatasetKind,
    layout: &'static DatasetLayout,
    batches: Vec<Batch>,
    standings_locator: Option<String>,
    conferences: ConferenceTable,
}

impl DatasetPlan {
    /// Build a plan for `kind`, validating its layout against its schema.
    ///
    /// # Errors
    ///
    /// Returns the layout's [`LayoutError`] if it does not fit its schema.
    pub fn new(kind: DatasetKind, batches: Vec<Batch>) -> Result<Self, LayoutError> {
        let layout = kind.layout();
        layout.validate()?;
        Ok(Self {
            kind,
            layout,
            batches,
            standings_locator: None,
            conferences: ConferenceTable::usports(),
        })
    }

    /// Locator of the conference standings view. Ignored for layouts without
    /// a standings pass.
    #[must_use]
    pub fn with_standings(mut self, locator: impl Into<String>) -> Self {
        self.standings_locator = Some(locator.into());
        self
    }

    #[must_use]
    pub fn with_conferences(mut self, conferences: ConferenceTable) -> Self {
        self.conferences = conferences;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> DatasetKind {
        self.kind
    }

    #[must_use]
    pub const fn layout(&self) -> &'static DatasetLayout {
        self.layout
    }

    #[must_use]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    #[must_use]
    pub fn standings_locator(&self) -> Option<&str> {
        self.standings_locator.as_deref()
    }

    fn standings(&self) -> Option<(StandingsLayout, &str)> {
        self.layout.standings.zip(self.standings_locator.as_deref())
    }
}

/// Knobs shared by every dataset in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub navigation_timeout: Duration,
    pub retry: RetryPolicy,
    pub missing_columns: MissingColumnPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            retry: RetryPolicy::default(),
            missing_columns: MissingColumnPolicy::default(),
        }
    }
}

/// Where a dataset run currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Navigating { batch: usize },
    ExtractingGroup { batch: usize, group: &'static str },
    Augmenting,
    Done,
    Failed,
}

impl PipelineState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Navigating { batch } => write!(f, "navigating batch {batch}"),
            Self::ExtractingGroup { batch, group } => {
                write!(f, "extracting {group} (batch {batch})")
            }
            Self::Augmenting => f.write_str("augmenting"),
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Final product of one dataset run. `entities` holds whatever was gathered,
/// even when the run failed part way.
#[derive(Debug, Clone)]
pub struct DatasetOutcome {
    pub kind: DatasetKind,
    pub entities: EntityMap,
    pub report: DatasetReport,
    pub state: PipelineState,
    pub error: Option<ExtractError>,
}

impl DatasetOutcome {
    /// Outcome for a dataset that failed before its first navigation.
    #[must_use]
    pub fn not_started(plan: &DatasetPlan, error: ExtractError) -> Self {
        let mut report = DatasetReport::new(plan.kind, plan.batches.len());
        report.failure = Some(error.to_string());
        Self {
            kind: plan.kind,
            entities: EntityMap::new(),
            report,
            state: PipelineState::Failed,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs one [`DatasetPlan`] against one provider session.
pub struct BatchCoordinator<'a, P: RenderingProvider + ?Sized> {
    provider: &'a mut P,
    plan: &'a DatasetPlan,
    options: PipelineOptions,
    state: PipelineState,
    entities: EntityMap,
    report: DatasetReport,
}

impl<'a, P> BatchCoordinator<'a, P>
where
    P: RenderingProvider + ?Sized,
{
    pub fn new(provider: &'a mut P, plan: &'a DatasetPlan, options: PipelineOptions) -> Self {
        Self {
            provider,
            plan,
            options,
            state: PipelineState::Idle,
            entities: EntityMap::new(),
            report: DatasetReport::new(plan.kind, plan.batches.len()),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Run every batch, then the standings pass, and hand back the result.
    pub async fn run(mut self) -> DatasetOutcome {
        let kind = self.plan.kind;
        log::info!(
            "{kind}: starting {} batch(es) over {} groups",
            self.plan.batches.len(),
            self.plan.layout.catalog.len()
        );

        let error = self.drive().await.err();
        match &error {
            None => self.transition(PipelineState::Done),
            Some(err) => {
                log::error!("{kind}: aborted while {}: {err}", self.state);
                self.report.failure = Some(err.to_string());
                self.transition(PipelineState::Failed);
            }
        }

        self.report.entities = self.entities.len();
        self.report.complete = error.is_none();
        DatasetOutcome {
            kind,
            entities: self.entities,
            report: self.report,
            state: self.state,
            error,
        }
    }

    async fn drive(&mut self) -> Result<(), ExtractError> {
        let plan = self.plan;
        let mut ending_cursor = plan.layout.ending_cursor();

        for (index, batch) in plan.batches.iter().enumerate() {
            ending_cursor = self.run_batch(index, batch).await?;
            self.report.batches_completed += 1;
        }

        if let Some((standings, locator)) = plan.standings() {
            self.augment(standings, locator, ending_cursor).await?;
        } else if plan.layout.standings.is_some() {
            log::warn!("{}: no standings view configured, skipping", plan.kind);
        }
        Ok(())
    }

    async fn run_batch(&mut self, index: usize, batch: &Batch) -> Result<FieldCursor, ExtractError> {
        let layout = self.plan.layout;
        self.navigate(PipelineState::Navigating { batch: index }, &batch.locator)
            .await?;
        log::debug!("{}: batch {index} ({}) loaded", self.plan.kind, batch.label);

        let mut cursor = layout.cursor_start;
        for group in layout.catalog.groups() {
            self.transition(PipelineState::ExtractingGroup {
                batch: index,
                group: group.name,
            });
            let segment = read_segment(&*self.provider, group.segment_index, HeaderCells::Skip).await?;
            let extraction = extract_group(
                &segment,
                group,
                layout,
                cursor,
                self.options.missing_columns,
                &mut self.entities,
            );
            self.report.tally.absorb(extraction.tally);
            self.report.groups_extracted += 1;
            cursor = extraction.next_cursor;
        }

        if cursor != layout.ending_cursor() {
            log::warn!(
                "{}: batch {index} ended at field {} instead of {}",
                self.plan.kind,
                cursor.index(),
                layout.ending_cursor().index()
            );
        }
        Ok(cursor)
    }

    async fn augment(
        &mut self,
        standings: StandingsLayout,
        locator: &str,
        ending_cursor: FieldCursor,
    ) -> Result<(), ExtractError> {
        self.navigate(PipelineState::Augmenting, locator).await?;

        let mut segments: Vec<TableSegment> = Vec::with_capacity(standings.conference_segments);
        for index in 0..standings.conference_segments {
            segments.push(read_segment(&*self.provider, index, HeaderCells::Read).await?);
        }

        let pass = StandingsPass {
            layout: standings,
            schema: self.plan.layout.schema,
            ending_cursor,
            conferences: &self.plan.conferences,
            policy: self.options.missing_columns,
        };
        let tally = pass.apply(&segments, &mut self.entities)?;
        self.report.standings_segments = segments.len();
        self.report.tally.absorb(tally);
        Ok(())
    }

    async fn navigate(&mut self, next: PipelineState, locator: &str) -> Result<(), ExtractError> {
        self.transition(next);
        let attempts = navigate_with_retry(
            &mut *self.provider,
            locator,
            self.options.navigation_timeout,
            &self.options.retry,
        )
        .await?;
        if attempts > 1 {
            log::info!("{}: {locator} loaded after {attempts} attempts", self.plan.kind);
        }
        Ok(())
    }

    fn transition(&mut self, next: PipelineState) {
        log::trace!("{}: {} -> {next}", self.plan.kind, self.state);
        self.state = next;
    }
}

/// Run `plan` to completion against `provider`.
pub async fn run_dataset<P>(provider: &mut P, plan: &DatasetPlan, options: PipelineOptions) -> DatasetOutcome
where
    P: RenderingProvider + ?Sized,
{
    BatchCoordinator::new(provider, plan, options).run().await
}
