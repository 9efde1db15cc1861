use std::time::Duration;

use thiserror::Error;

/// Failures reported by a rendering provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("navigation to {locator} timed out after {timeout:?}")]
    NavigationTimeout { locator: String, timeout: Duration },
    #[error("navigation to {locator} failed: {message}")]
    Navigation { locator: String, message: String },
    #[error("no view loaded for {locator}")]
    UnknownView { locator: String },
    #[error("element lookup failed: {0}")]
    Element(String),
    #[error("could not open a rendering session: {0}")]
    Session(String),
}

impl ProviderError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::NavigationTimeout { .. })
    }
}

/// Errors raised while turning rendered segments into entity records.
///
/// Row- and cell-level problems (short rows, absent columns) never surface
/// here; they are counted in the dataset tally instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("segment {index} not found ({available} segments on the current view)")]
    SegmentNotFound { index: usize, available: usize },
    #[error("standings row names {name:?}, which was never seen on the stats view")]
    UnknownEntity { name: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors raised when a dataset layout disagrees with its schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "{dataset}: cursor start {cursor_start} + group fields {group_fields} + trailing {trailing} != schema length {schema_len}"
    )]
    FieldCountMismatch {
        dataset: &'static str,
        cursor_start: usize,
        group_fields: usize,
        trailing: usize,
        schema_len: usize,
    },
    #[error("{dataset}: leading field index {index} is outside the schema (length {schema_len})")]
    LeadingFieldOutOfRange {
        dataset: &'static str,
        index: usize,
        schema_len: usize,
    },
    #[error("{dataset}: leading field {field} overlaps the group slice {start}..{end}")]
    LeadingFieldOverlapsGroups {
        dataset: &'static str,
        field: &'static str,
        start: usize,
        end: usize,
    },
    #[error("{dataset}: standings write at index {index} exceeds schema length {schema_len}")]
    StandingsOutOfRange {
        dataset: &'static str,
        index: usize,
        schema_len: usize,
    },
    #[error("{dataset}: stat group {group} declares zero fields")]
    EmptyGroup {
        dataset: &'static str,
        group: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert_into_extract_errors() {
        let err: ExtractError = ProviderError::Element("stale".into()).into();
        assert!(matches!(err, ExtractError::Provider(ProviderError::Element(_))));
        assert_eq!(err.to_string(), "element lookup failed: stale");
    }

    #[test]
    fn timeout_is_detected() {
        let err = ProviderError::NavigationTimeout {
            locator: "teams".into(),
            timeout: Duration::from_secs(2),
        };
        assert!(err.is_timeout());
        assert!(
            !ProviderError::UnknownView {
                locator: "x".into()
            }
            .is_timeout()
        );
    }
}
