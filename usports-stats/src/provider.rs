use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;

/// The capability set the engine needs from whatever renders the stat views.
///
/// Navigation takes `&mut self`: a view is shared mutable state, and reads
/// against it must not interleave with loading the next one.
#[async_trait]
pub trait RenderingProvider: Send + Sync {
    type Segment: Send + Sync;
    type Row: Send + Sync;
    type Cell: Send + Sync;

    /// Load the view behind `locator`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NavigationTimeout`] when the view does not load
    /// in time, or another [`ProviderError`] if it cannot be loaded at all.
    async fn navigate(&mut self, locator: &str, timeout: Duration) -> Result<(), ProviderError>;

    /// Every table segment on the current view, in document order.
    async fn list_segments(&self) -> Result<Vec<Self::Segment>, ProviderError>;

    async fn list_rows(&self, segment: &Self::Segment) -> Result<Vec<Self::Row>, ProviderError>;

    /// Body cells of `row`, in column order.
    async fn list_cells(&self, row: &Self::Row) -> Result<Vec<Self::Cell>, ProviderError>;

    /// The row's name header cell, if it has one.
    async fn header_cell(&self, row: &Self::Row) -> Result<Option<Self::Cell>, ProviderError>;

    async fn read_text(&self, cell: &Self::Cell) -> Result<String, ProviderError>;
}
