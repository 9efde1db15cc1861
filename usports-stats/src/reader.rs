//! Table segment reader.
//!
//! The only part of the engine that talks to a [`RenderingProvider`]. A
//! segment is resolved into plain text up front so that extraction itself
//! stays synchronous.

use serde::Serialize;

use crate::error::ExtractError;
use crate::provider::RenderingProvider;

/// Whether a read should also resolve each row's name header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCells {
    Skip,
    Read,
}

/// Why a row was not attributed to any entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// One cell or none: a header or separator row.
    TooShort { cells: usize },
    /// The name cell was absent, unreadable or blank.
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableRow {
    pub header: Option<String>,
    /// One slot per rendered cell; `None` when the text could not be read.
    pub cells: Vec<Option<String>>,
}

impl TableRow {
    /// Row whose cells all read successfully.
    #[must_use]
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: None,
            cells: cells.into_iter().map(|c| Some(c.into())).collect(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Text of body cell `column`, if the cell exists and was readable.
    #[must_use]
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }

    /// More than one cell is what separates data rows from header rows.
    ///
    /// # Errors
    ///
    /// Returns [`RowSkip::TooShort`] for rows with zero or one cell.
    pub fn check_data_row(&self) -> Result<(), RowSkip> {
        if self.cells.len() > 1 {
            Ok(())
        } else {
            Err(RowSkip::TooShort {
                cells: self.cells.len(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableSegment {
    pub index: usize,
    pub rows: Vec<TableRow>,
}

impl TableSegment {
    #[must_use]
    pub const fn new(index: usize, rows: Vec<TableRow>) -> Self {
        Self { index, rows }
    }
}

/// Read segment `index` of the provider's current view.
///
/// Rows with one cell or fewer are returned with their cell count but no text,
/// since nothing will be taken from them. Cell and row level read failures are
/// logged and leave empty slots rather than failing the read.
///
/// # Errors
///
/// Returns [`ExtractError::SegmentNotFound`] when the view has no segments or
/// fewer than `index + 1`, and [`ExtractError::Provider`] when the segment or
/// its row list cannot be enumerated.
pub async fn read_segment<P>(
    provider: &P,
    index: usize,
    headers: HeaderCells,
) -> Result<TableSegment, ExtractError>
where
    P: RenderingProvider + ?Sized,
{
    let segments = provider.list_segments().await?;
    let available = segments.len();
    let Some(segment) = segments.get(index) else {
        log::error!("segment {index} requested but the view has {available} segments");
        return Err(ExtractError::SegmentNotFound { index, available });
    };

    let row_handles = provider.list_rows(segment).await?;
    log::debug!("segment {index}: {} rows", row_handles.len());

    let mut rows = Vec::with_capacity(row_handles.len());
    for (position, handle) in row_handles.iter().enumerate() {
        let cells = match provider.list_cells(handle).await {
            Ok(cells) => cells,
            Err(err) => {
                log::warn!("segment {index} row {position}: could not list cells: {err}");
                rows.push(TableRow::default());
                continue;
            }
        };

        if cells.len() <= 1 {
            rows.push(TableRow {
                header: None,
                cells: vec![None; cells.len()],
            });
            continue;
        }

        let mut texts = Vec::with_capacity(cells.len());
        for (column, cell) in cells.iter().enumerate() {
            match provider.read_text(cell).await {
                Ok(text) => texts.push(Some(text)),
                Err(err) => {
                    log::debug!("segment {index} row {position} column {column}: {err}");
                    texts.push(None);
                }
            }
        }

        let header = match headers {
            HeaderCells::Skip => None,
            HeaderCells::Read => read_header(provider, handle).await,
        };

        rows.push(TableRow {
            header,
            cells: texts,
        });
    }

    Ok(TableSegment::new(index, rows))
}

async fn read_header<P>(provider: &P, row: &P::Row) -> Option<String>
where
    P: RenderingProvider + ?Sized,
{
    match provider.header_cell(row).await {
        Ok(Some(cell)) => match provider.read_text(&cell).await {
            Ok(text) => Some(text),
            Err(err) => {
                log::debug!("header cell unreadable: {err}");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::debug!("header cell lookup failed: {err}");
            None
        }
    }
}
