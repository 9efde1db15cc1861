//! WebDriver-backed rendering provider.
//!
//! Segments are `tbody` elements, rows their `tr` children, body cells `td`
//! and the standings name header `th.team-name`.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use usports_stats::{ProviderError, RenderingProvider};

const SEGMENT_TAG: &str = "tbody";
const ROW_TAG: &str = "tr";
const CELL_TAG: &str = "td";
const HEADER_SELECTOR: &str = "th.team-name";

pub struct WebDriverProvider {
    driver: WebDriver,
}

impl WebDriverProvider {
    pub const fn new(driver: WebDriver) -> Self {
        Self { driver }
    }

    pub const fn driver(&self) -> &WebDriver {
        &self.driver
    }

    pub async fn quit(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }
}

fn element_error(err: &WebDriverError) -> ProviderError {
    ProviderError::Element(err.to_string())
}

#[async_trait]
impl RenderingProvider for WebDriverProvider {
    type Segment = WebElement;
    type Row = WebElement;
    type Cell = WebElement;

    async fn navigate(&mut self, locator: &str, timeout: Duration) -> Result<(), ProviderError> {
        log::debug!("navigating to {locator}");
        match tokio::time::timeout(timeout, self.driver.goto(locator)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(ProviderError::Navigation {
                locator: locator.to_string(),
                message: err.to_string(),
            }),
            Err(_) => Err(ProviderError::NavigationTimeout {
                locator: locator.to_string(),
                timeout,
            }),
        }
    }

    async fn list_segments(&self) -> Result<Vec<Self::Segment>, ProviderError> {
        self.driver
            .find_all(By::Tag(SEGMENT_TAG))
            .await
            .map_err(|err| element_error(&err))
    }

    async fn list_rows(&self, segment: &Self::Segment) -> Result<Vec<Self::Row>, ProviderError> {
        segment
            .find_all(By::Tag(ROW_TAG))
            .await
            .map_err(|err| element_error(&err))
    }

    async fn list_cells(&self, row: &Self::Row) -> Result<Vec<Self::Cell>, ProviderError> {
        row.find_all(By::Tag(CELL_TAG))
            .await
            .map_err(|err| element_error(&err))
    }

    async fn header_cell(&self, row: &Self::Row) -> Result<Option<Self::Cell>, ProviderError> {
        let headers = row
            .find_all(By::Css(HEADER_SELECTOR))
            .await
            .map_err(|err| element_error(&err))?;
        Ok(headers.into_iter().next())
    }

    async fn read_text(&self, cell: &Self::Cell) -> Result<String, ProviderError> {
        cell.text().await.map_err(|err| element_error(&err))
    }
}
