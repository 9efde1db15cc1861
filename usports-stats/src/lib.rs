//! U SPORTS Stats Engine
//!
//! Platform-agnostic extraction of basketball team and player statistics from
//! rendered stat tables. The engine reads table segments through an injected
//! [`RenderingProvider`], maps each stat group onto a slice of a fixed field
//! schema, attaches conference standings, and assembles the per-league entity
//! maps into one nested result. No browser dependency lives here.

pub mod assembly;
pub mod augment;
pub mod catalog;
pub mod conference;
pub mod error;
pub mod extract;
pub mod layout;
pub mod memory;
pub mod pipeline;
pub mod provider;
pub mod reader;
pub mod record;
pub mod report;
pub mod retry;
pub mod schema;

// Re-export commonly used types
pub use assembly::{Assembly, Divisions, UsportsData, merge};
pub use augment::StandingsPass;
pub use catalog::{
    DatasetKind, League, PLAYER_LAYOUT, PLAYER_SORT_CATEGORIES, Subject, TEAM_LAYOUT,
};
pub use conference::{ConferenceTable, UNKNOWN_CONFERENCE};
pub use error::{ExtractError, LayoutError, ProviderError};
pub use extract::{GroupExtraction, extract_group};
pub use layout::{DatasetLayout, LeadingField, MissingColumnPolicy, StandingsLayout};
pub use memory::{FixtureRow, FixtureSet, FixtureView, MemoryProvider};
pub use pipeline::{
    Batch, BatchCoordinator, DEFAULT_NAVIGATION_TIMEOUT, DatasetOutcome, DatasetPlan,
    PipelineOptions, PipelineState, run_dataset,
};
pub use provider::RenderingProvider;
pub use reader::{HeaderCells, RowSkip, TableRow, TableSegment, read_segment};
pub use record::{EntityMap, EntityRecord, normalize_name};
pub use report::{DatasetReport, ExtractionTally};
pub use retry::{RetryPolicy, navigate_with_retry};
pub use schema::{FieldCursor, FieldSchema, StatGroup, StatGroupCatalog};
