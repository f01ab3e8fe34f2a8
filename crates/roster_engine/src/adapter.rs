use async_trait::async_trait;
use thirtyfour::prelude::WebDriverError;
use thiserror::Error;

use crate::{JobDetail, MarkupError, RowSummary, RunConfig};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("browser: {0}")]
    WebDriver(#[from] WebDriverError),
    #[error("markup: {0}")]
    Markup(#[from] MarkupError),
    #[error("title link {index} not found ({available} on page)")]
    MissingRow { index: usize, available: usize },
    #[error("browser session is closed")]
    Closed,
}

/// Narrow view of the listing site used by the run controller.
///
/// Implementations own the browser session and hide every selector; the
/// controller only sees rows, details and page transitions.
#[async_trait]
pub trait ListingPage: Send {
    /// Rows of the listing page currently shown.
    async fn list_rows(&mut self) -> Result<Vec<RowSummary>, AdapterError>;

    /// Opens the row's detail view, reads it, and returns to the listing.
    async fn fetch_detail(&mut self, row: &RowSummary) -> Result<JobDetail, AdapterError>;

    /// Recovers the listing after a failed [`ListingPage::fetch_detail`].
    async fn return_to_listing(&mut self) -> Result<(), AdapterError>;

    /// Follows the "next page" control. `Ok(false)` when there is none.
    async fn advance_page(&mut self) -> Result<bool, AdapterError>;

    async fn close(&mut self) -> Result<(), AdapterError>;
}

/// Opens a browser session positioned on the listing page.
#[async_trait]
pub trait ListingLauncher: Send + Sync {
    async fn launch(&self, config: &RunConfig) -> Result<Box<dyn ListingPage>, AdapterError>;
}
