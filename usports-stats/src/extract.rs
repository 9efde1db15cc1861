//! Group extractor: maps one stat group's segment onto its schema slice.

use crate::layout::{DatasetLayout, MissingColumnPolicy};
use crate::reader::{RowSkip, TableRow, TableSegment};
use crate::record::{EntityMap, EntityRecord, normalize_name};
use crate::report::ExtractionTally;
use crate::schema::{FieldCursor, FieldSchema, StatGroup};

/// Result of extracting one group: where the next group starts, plus counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupExtraction {
    pub next_cursor: FieldCursor,
    pub tally: ExtractionTally,
}

/// Merge `segment` into `entities` as the columns of `group`, starting at `cursor`.
///
/// Entities are created on first sighting, and only then receive their
/// leading fields. The returned cursor always advances by the group's declared
/// field count, whatever individual rows were missing.
pub fn extract_group(
    segment: &TableSegment,
    group: &StatGroup,
    layout: &DatasetLayout,
    cursor: FieldCursor,
    policy: MissingColumnPolicy,
    entities: &mut EntityMap,
) -> GroupExtraction {
    let mut tally = ExtractionTally::default();

    for row in &segment.rows {
        tally.rows_read += 1;
        if let Err(skip) = row.check_data_row() {
            tally.skip(skip);
            continue;
        }
        let Some(name) = entity_name(row, layout.name_column) else {
            tally.skip(RowSkip::MissingName);
            continue;
        };

        let (record, created) = entities.get_or_create(&name);
        if created {
            tally.entities_created += 1;
            tally.missing_cells += write_leading_fields(record, row, layout);
        } else {
            tally.entities_updated += 1;
        }

        tally.missing_cells += write_columns(
            record,
            row,
            layout.schema,
            layout.group_column_offset,
            group.field_count,
            cursor,
            policy,
        );
    }

    log::debug!(
        "{} group {:?}: {} rows, {} skipped, {} new entities",
        layout.name,
        group.name,
        tally.rows_read,
        tally.rows_skipped,
        tally.entities_created
    );

    GroupExtraction {
        next_cursor: cursor.advance(group.field_count),
        tally,
    }
}

fn entity_name(row: &TableRow, column: usize) -> Option<String> {
    let name = normalize_name(row.cell(column)?);
    (!name.is_empty()).then_some(name)
}

fn write_leading_fields(record: &mut EntityRecord, row: &TableRow, layout: &DatasetLayout) -> usize {
    let mut missing = 0;
    for leading in layout.leading_fields {
        match (row.cell(leading.column), layout.schema.field(leading.field_index)) {
            (Some(text), Some(field)) => {
                record.set(field, text.trim());
            }
            _ => missing += 1,
        }
    }
    missing
}

/// Copy `count` consecutive columns starting at `first_column` into schema
/// fields starting at `cursor`. Returns how many columns were absent.
pub(crate) fn write_columns(
    record: &mut EntityRecord,
    row: &TableRow,
    schema: FieldSchema,
    first_column: usize,
    count: usize,
    cursor: FieldCursor,
    policy: MissingColumnPolicy,
) -> usize {
    let mut missing = 0;
    let mut field_index = cursor.index();
    for offset in 0..count {
        match row.cell(first_column + offset) {
            Some(text) => {
                if let Some(field) = schema.field(field_index) {
                    record.set(field, text.trim());
                }
                field_index += 1;
            }
            None => {
                missing += 1;
                if policy == MissingColumnPolicy::Advance {
                    field_index += 1;
                }
            }
        }
    }
    missing
}
