//! Per-dataset column layouts.
//!
//! Each dataset shape (team stats, player stats) reads its entity name,
//! leading fields and group columns from fixed table positions. Those
//! positions live here in one record, checked against the schema before any
//! extraction runs.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::schema::{FieldCursor, FieldSchema, StatGroupCatalog};

/// A field filled once, when an entity is first sighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadingField {
    /// Body cell the value is read from.
    pub column: usize,
    /// Schema index the value is written to.
    pub field_index: usize,
}

impl LeadingField {
    #[must_use]
    pub const fn new(column: usize, field_index: usize) -> Self {
        Self {
            column,
            field_index,
        }
    }
}

/// What happens to the schema index when a row is missing a group column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingColumnPolicy {
    /// Skip the field and keep column/field alignment for the rest of the row.
    #[default]
    Advance,
    /// Do not advance; later columns shift down into earlier fields.
    Compact,
}

/// Geometry of the conference standings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandingsLayout {
    /// One segment per conference.
    pub conference_segments: usize,
    /// Consecutive standings fields written from the ending cursor.
    pub standings_fields: usize,
    /// Body columns skipped before the first standings value.
    pub column_skip: usize,
    /// Schema offset from the ending cursor to the conference field.
    pub conference_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetLayout {
    pub name: &'static str,
    pub schema: FieldSchema,
    pub catalog: StatGroupCatalog,
    pub name_column: usize,
    pub leading_fields: &'static [LeadingField],
    pub group_column_offset: usize,
    pub cursor_start: FieldCursor,
    pub trailing_reserved: usize,
    pub standings: Option<StandingsLayout>,
}

impl DatasetLayout {
    /// Cursor value once every group of a batch has been extracted.
    #[must_use]
    pub fn ending_cursor(&self) -> FieldCursor {
        self.cursor_start.advance(self.catalog.total_fields())
    }

    /// Check every index this layout will ever write against the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let schema_len = self.schema.len();

        if let Some(group) = self.catalog.groups().iter().find(|g| g.field_count == 0) {
            return Err(LayoutError::EmptyGroup {
                dataset: self.name,
                group: group.name,
            });
        }

        let group_fields = self.catalog.total_fields();
        let cursor_start = self.cursor_start.index();
        if cursor_start + group_fields + self.trailing_reserved != schema_len {
            return Err(LayoutError::FieldCountMismatch {
                dataset: self.name,
                cursor_start,
                group_fields,
                trailing: self.trailing_reserved,
                schema_len,
            });
        }

        let group_slice = cursor_start..cursor_start + group_fields;
        for leading in self.leading_fields {
            let Some(field) = self.schema.field(leading.field_index) else {
                return Err(LayoutError::LeadingFieldOutOfRange {
                    dataset: self.name,
                    index: leading.field_index,
                    schema_len,
                });
            };
            if group_slice.contains(&leading.field_index) {
                return Err(LayoutError::LeadingFieldOverlapsGroups {
                    dataset: self.name,
                    field,
                    start: group_slice.start,
                    end: group_slice.end,
                });
            }
        }

        if let Some(standings) = self.standings {
            let end = group_slice.end;
            let last_standing = end + standings.standings_fields.saturating_sub(1);
            let conference = end + standings.conference_offset;
            for index in [last_standing, conference] {
                if index >= schema_len {
                    return Err(LayoutError::StandingsOutOfRange {
                        dataset: self.name,
                        index,
                        schema_len,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StatGroup;

    const FIELDS: &[&str] = &["gp", "a1", "a2", "b1", "b2", "b3", "c1"];
    const GROUPS: &[StatGroup] = &[
        StatGroup::new("A", 2, 0),
        StatGroup::new("B", 3, 1),
        StatGroup::new("C", 1, 2),
    ];
    const LEADING: &[LeadingField] = &[LeadingField::new(1, 0)];

    fn layout() -> DatasetLayout {
        DatasetLayout {
            name: "sample",
            schema: FieldSchema::new(FIELDS),
            catalog: StatGroupCatalog::new(GROUPS),
            name_column: 0,
            leading_fields: LEADING,
            group_column_offset: 2,
            cursor_start: FieldCursor::new(1),
            trailing_reserved: 0,
            standings: None,
        }
    }

    #[test]
    fn sample_layout_validates() {
        let layout = layout();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(layout.ending_cursor().index(), 7);
    }

    #[test]
    fn mismatched_field_counts_are_rejected() {
        let layout = DatasetLayout {
            trailing_reserved: 2,
            ..layout()
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::FieldCountMismatch { schema_len: 7, .. })
        ));
    }

    #[test]
    fn leading_field_inside_group_slice_is_rejected() {
        const OVERLAP: &[LeadingField] = &[LeadingField::new(1, 2)];
        let layout = DatasetLayout {
            leading_fields: OVERLAP,
            ..layout()
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::LeadingFieldOverlapsGroups { field: "a2", .. })
        ));
    }

    #[test]
    fn leading_field_out_of_range_is_rejected() {
        const FAR: &[LeadingField] = &[LeadingField::new(1, 40)];
        let layout = DatasetLayout {
            leading_fields: FAR,
            ..layout()
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::LeadingFieldOutOfRange { index: 40, .. })
        ));
    }

    #[test]
    fn standings_must_fit_in_schema() {
        let layout = DatasetLayout {
            standings: Some(StandingsLayout {
                conference_segments: 1,
                standings_fields: 1,
                column_skip: 1,
                conference_offset: 0,
            }),
            ..layout()
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::StandingsOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn empty_groups_are_rejected() {
        const EMPTY: &[StatGroup] = &[StatGroup::new("Nothing", 0, 0)];
        let layout = DatasetLayout {
            catalog: StatGroupCatalog::new(EMPTY),
            ..layout()
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::EmptyGroup {
                dataset: "sample",
                group: "Nothing"
            })
        );
    }

    #[test]
    fn missing_column_policy_defaults_to_advance() {
        assert_eq!(MissingColumnPolicy::default(), MissingColumnPolicy::Advance);
        let parsed: MissingColumnPolicy = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(parsed, MissingColumnPolicy::Compact);
    }
}
