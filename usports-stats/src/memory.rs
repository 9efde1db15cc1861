//! In-memory rendering provider backed by recorded table views.
//!
//! Views are keyed by locator, so a fixture captured from the live site can be
//! replayed through exactly the same pipeline as a browser session.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::RenderingProvider;

/// A recorded table row. Plain arrays are accepted as header-less rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureRow {
    Cells(Vec<String>),
    Full {
        #[serde(default)]
        header: Option<String>,
        #[serde(default)]
        cells: Vec<String>,
    },
}

impl FixtureRow {
    pub fn cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Cells(cells.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn with_header(self, header: impl Into<String>) -> Self {
        Self::Full {
            header: Some(header.into()),
            cells: self.cell_texts().to_vec(),
        }
    }

    #[must_use]
    pub fn header(&self) -> Option<&str> {
        match self {
            Self::Cells(_) => None,
            Self::Full { header, .. } => header.as_deref(),
        }
    }

    #[must_use]
    pub fn cell_texts(&self) -> &[String] {
        match self {
            Self::Cells(cells) | Self::Full { cells, .. } => cells,
        }
    }
}

/// One rendered view: its table segments in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureView {
    #[serde(default)]
    pub segments: Vec<Vec<FixtureRow>>,
}

impl FixtureView {
    #[must_use]
    pub const fn new(segments: Vec<Vec<FixtureRow>>) -> Self {
        Self { segments }
    }
}

/// A set of recorded views, as stored in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    pub views: BTreeMap<String, FixtureView>,
}

impl FixtureSet {
    /// Parse a fixture document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a fixture set.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Replays [`FixtureView`]s. Clones share the recorded views but keep their
/// own navigation state, so one set can back several concurrent pipelines.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    views: Arc<BTreeMap<String, FixtureView>>,
    current: Option<String>,
    history: Vec<String>,
    failing_navigations: usize,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_fixtures(fixtures: FixtureSet) -> Self {
        Self {
            views: Arc::new(fixtures.views),
            ..Self::default()
        }
    }

    pub fn insert_view(&mut self, locator: impl Into<String>, view: FixtureView) {
        Arc::make_mut(&mut self.views).insert(locator.into(), view);
    }

    /// Make the next `count` navigations time out.
    pub fn fail_next_navigations(&mut self, count: usize) {
        self.failing_navigations = count;
    }

    /// Every locator navigated to, including attempts that failed.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn current_view(&self) -> Result<&FixtureView, ProviderError> {
        let locator = self.current.as_deref().unwrap_or_default();
        self.views
            .get(locator)
            .ok_or_else(|| ProviderError::UnknownView {
                locator: locator.to_string(),
            })
    }
}

#[async_trait]
impl RenderingProvider for MemoryProvider {
    type Segment = Vec<FixtureRow>;
    type Row = FixtureRow;
    type Cell = String;

    async fn navigate(&mut self, locator: &str, timeout: Duration) -> Result<(), ProviderError> {
        self.history.push(locator.to_string());
        if self.failing_navigations > 0 {
            self.failing_navigations -= 1;
            self.current = None;
            return Err(ProviderError::NavigationTimeout {
                locator: locator.to_string(),
                timeout,
            });
        }
        if !self.views.contains_key(locator) {
            self.current = None;
            return Err(ProviderError::UnknownView {
                locator: locator.to_string(),
            });
        }
        self.current = Some(locator.to_string());
        Ok(())
    }

    async fn list_segments(&self) -> Result<Vec<Self::Segment>, ProviderError> {
        Ok(self.current_view()?.segments.clone())
    }

    async fn list_rows(&self, segment: &Self::Segment) -> Result<Vec<Self::Row>, ProviderError> {
        Ok(segment.clone())
    }

    async fn list_cells(&self, row: &Self::Row) -> Result<Vec<Self::Cell>, ProviderError> {
        Ok(row.cell_texts().to_vec())
    }

    async fn header_cell(&self, row: &Self::Row) -> Result<Option<Self::Cell>, ProviderError> {
        Ok(row.header().map(str::to_string))
    }

    async fn read_text(&self, cell: &Self::Cell) -> Result<String, ProviderError> {
        Ok(cell.clone())
    }
}
