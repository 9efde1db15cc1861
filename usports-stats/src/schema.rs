//! Field schemas, stat groups and the field cursor that walks them.
//!
//! A schema is the flat, globally indexed list of fields one entity record can
//! carry. Stat groups claim contiguous slices of it in catalog order, so the
//! slice a group fills is fully determined by the groups declared before it.

use serde::Serialize;

/// Ordered, immutable list of statistic field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: &'static [&'static str],
}

impl FieldSchema {
    #[must_use]
    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field name at `index`, if the schema is that long.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&'static str> {
        self.fields.get(index).copied()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| *field == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }
}

/// A named cluster of statistics rendered as one table segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatGroup {
    pub name: &'static str,
    /// Number of consecutive schema fields this group supplies.
    pub field_count: usize,
    /// Which rendered segment (0-based) holds this group's columns.
    pub segment_index: usize,
}

impl StatGroup {
    #[must_use]
    pub const fn new(name: &'static str, field_count: usize, segment_index: usize) -> Self {
        Self {
            name,
            field_count,
            segment_index,
        }
    }
}

/// Stat groups in the fixed order they are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatGroupCatalog {
    groups: &'static [StatGroup],
}

impl StatGroupCatalog {
    #[must_use]
    pub const fn new(groups: &'static [StatGroup]) -> Self {
        Self { groups }
    }

    #[must_use]
    pub const fn groups(&self) -> &'static [StatGroup] {
        self.groups
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of every group's field count.
    #[must_use]
    pub fn total_fields(&self) -> usize {
        self.groups.iter().map(|group| group.field_count).sum()
    }

    /// Cursor positions each group starts at when extraction begins at `start`.
    ///
    /// The final element is the cursor after the last group.
    #[must_use]
    pub fn cursor_plan(&self, start: FieldCursor) -> Vec<FieldCursor> {
        self.groups
            .iter()
            .scan(start, |cursor, group| {
                let current = *cursor;
                *cursor = cursor.advance(group.field_count);
                Some(current)
            })
            .chain(std::iter::once(start.advance(self.total_fields())))
            .collect()
    }
}

/// Offset into a [`FieldSchema`], threaded by value between group extractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FieldCursor(usize);

impl FieldCursor {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn advance(self, by: usize) -> Self {
        Self(self.0 + by)
    }
}
