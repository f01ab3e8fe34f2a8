use std::time::Duration;

use async_trait::async_trait;
use engine_logging::{engine_debug, engine_info, engine_warn};
use thirtyfour::prelude::*;

use crate::markup::{parse_detail, parse_listing_rows, NEXT_PAGE_SELECTOR, PAGE_TITLE_LINK_SELECTOR};
use crate::{AdapterError, JobDetail, ListingLauncher, ListingPage, RowSummary, RunConfig};

/// Fixed pauses letting the page settle after navigation.
const DETAIL_SETTLE: Duration = Duration::from_secs(2);
const BACK_SETTLE: Duration = Duration::from_secs(1);
const PAGE_SETTLE: Duration = Duration::from_secs(2);

/// Launches Chrome through a WebDriver server (chromedriver, selenium).
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDriverLauncher;

#[async_trait]
impl ListingLauncher for WebDriverLauncher {
    async fn launch(&self, config: &RunConfig) -> Result<Box<dyn ListingPage>, AdapterError> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }

        engine_info!(
            "Connecting to WebDriver at {} (headless={})",
            config.webdriver_url,
            config.headless
        );
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;
        let mut page = WebDriverListing {
            driver: Some(driver.clone()),
            on_detail: false,
        };

        if let Err(err) = driver.goto(config.listing_url.as_str()).await {
            if let Err(close_err) = page.close().await {
                engine_warn!("Failed to close browser after navigation error: {}", close_err);
            }
            return Err(err.into());
        }
        tokio::time::sleep(PAGE_SETTLE).await;
        Ok(Box::new(page))
    }
}

/// [`ListingPage`] backed by a live WebDriver session.
pub struct WebDriverListing {
    driver: Option<WebDriver>,
    on_detail: bool,
}

impl WebDriverListing {
    fn driver(&self) -> Result<WebDriver, AdapterError> {
        self.driver.clone().ok_or(AdapterError::Closed)
    }
}

#[async_trait]
impl ListingPage for WebDriverListing {
    async fn list_rows(&mut self) -> Result<Vec<RowSummary>, AdapterError> {
        let html = self.driver()?.source().await?;
        Ok(parse_listing_rows(&html)?)
    }

    async fn fetch_detail(&mut self, row: &RowSummary) -> Result<JobDetail, AdapterError> {
        let driver = self.driver()?;
        // Links go stale after every navigation, so look them up again.
        let links = driver.find_all(By::Css(PAGE_TITLE_LINK_SELECTOR)).await?;
        let link = links.get(row.index).ok_or(AdapterError::MissingRow {
            index: row.index,
            available: links.len(),
        })?;

        link.click().await?;
        self.on_detail = true;
        tokio::time::sleep(DETAIL_SETTLE).await;

        let html = driver.source().await?;
        self.return_to_listing().await?;
        Ok(parse_detail(&html)?)
    }

    async fn return_to_listing(&mut self) -> Result<(), AdapterError> {
        if !self.on_detail {
            return Ok(());
        }
        self.driver()?.back().await?;
        self.on_detail = false;
        tokio::time::sleep(BACK_SETTLE).await;
        Ok(())
    }

    async fn advance_page(&mut self) -> Result<bool, AdapterError> {
        let driver = self.driver()?;
        let controls = driver.find_all(By::Css(NEXT_PAGE_SELECTOR)).await?;
        let Some(next) = controls.first() else {
            return Ok(false);
        };
        next.click().await?;
        tokio::time::sleep(PAGE_SETTLE).await;
        Ok(true)
    }

    async fn close(&mut self) -> Result<(), AdapterError> {
        if let Some(driver) = self.driver.take() {
            engine_debug!("Closing browser session");
            driver.quit().await?;
        }
        Ok(())
    }
}
