//! Conference standings pass.
//!
//! Runs after every stat batch, against a view with one segment per
//! conference. Rows name their program in a header cell rather than a body
//! cell, and only programs already built from the stat views are touched.

use crate::conference::ConferenceTable;
use crate::error::ExtractError;
use crate::extract::write_columns;
use crate::layout::{MissingColumnPolicy, StandingsLayout};
use crate::reader::{RowSkip, TableRow, TableSegment};
use crate::record::{EntityMap, normalize_name};
use crate::report::ExtractionTally;
use crate::schema::{FieldCursor, FieldSchema};

/// Inputs that stay fixed across every conference segment.
#[derive(Debug, Clone, Copy)]
pub struct StandingsPass<'a> {
    pub layout: StandingsLayout,
    pub schema: FieldSchema,
    /// Cursor value at which stat extraction ended.
    pub ending_cursor: FieldCursor,
    pub conferences: &'a ConferenceTable,
    pub policy: MissingColumnPolicy,
}

impl StandingsPass<'_> {
    /// Attach standings and conference fields to existing entities.
    ///
    /// Every named row is checked before anything is written, so a failed
    /// pass leaves `entities` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnknownEntity`] for the first standings row
    /// naming a program absent from `entities`.
    pub fn apply(
        &self,
        segments: &[TableSegment],
        entities: &mut EntityMap,
    ) -> Result<ExtractionTally, ExtractError> {
        let mut tally = ExtractionTally::default();
        let mut named_rows: Vec<(String, &TableRow)> = Vec::new();

        for row in segments.iter().flat_map(|segment| segment.rows.iter()) {
            tally.rows_read += 1;
            if let Err(skip) = row.check_data_row() {
                tally.skip(skip);
                continue;
            }
            let Some(name) = row
                .header
                .as_deref()
                .map(normalize_name)
                .filter(|name| !name.is_empty())
            else {
                tally.skip(RowSkip::MissingName);
                continue;
            };
            if !entities.contains(&name) {
                log::error!("standings row names unknown program {name:?}");
                return Err(ExtractError::UnknownEntity { name });
            }
            named_rows.push((name, row));
        }

        let conference_field = self
            .schema
            .field(self.ending_cursor.index() + self.layout.conference_offset);

        for (name, row) in named_rows {
            let Some(record) = entities.get_mut(&name) else {
                continue;
            };
            tally.entities_updated += 1;
            tally.missing_cells += write_columns(
                record,
                row,
                self.schema,
                self.layout.column_skip,
                self.layout.standings_fields,
                self.ending_cursor,
                self.policy,
            );
            if let Some(field) = conference_field {
                record.set(field, self.conferences.label(&name));
            }
        }

        Ok(tally)
    }
}
