use serde::{Deserialize, Serialize};

use crate::catalog::DatasetKind;
use crate::reader::RowSkip;

/// Row and cell bookkeeping for one extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionTally {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub missing_cells: usize,
    pub entities_created: usize,
    pub entities_updated: usize,
}

impl ExtractionTally {
    pub fn skip(&mut self, reason: RowSkip) {
        log::trace!("row skipped: {reason:?}");
        self.rows_skipped += 1;
    }

    pub fn absorb(&mut self, other: Self) {
        self.rows_read += other.rows_read;
        self.rows_skipped += other.rows_skipped;
        self.missing_cells += other.missing_cells;
        self.entities_created += other.entities_created;
        self.entities_updated += other.entities_updated;
    }
}

/// Completeness of one dataset, persisted next to its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub dataset: DatasetKind,
    pub batches_planned: usize,
    pub batches_completed: usize,
    pub groups_extracted: usize,
    pub standings_segments: usize,
    pub entities: usize,
    #[serde(flatten)]
    pub tally: ExtractionTally,
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl DatasetReport {
    #[must_use]
    pub const fn new(dataset: DatasetKind, batches_planned: usize) -> Self {
        Self {
            dataset,
            batches_planned,
            batches_completed: 0,
            groups_extracted: 0,
            standings_segments: 0,
            entities: 0,
            tally: ExtractionTally {
                rows_read: 0,
                rows_skipped: 0,
                missing_cells: 0,
                entities_created: 0,
                entities_updated: 0,
            },
            complete: false,
            failure: None,
        }
    }
}
