//! Storage-listing provider
//!
//! The catalog consumes the object-storage listing as an external contract:
//! a JSON array of `{ name, size?, lastModified? }` records. Fetching is the
//! only I/O in a rebuild cycle; retry policy belongs to the caller.

use crate::types::RawObject;
use async_trait::async_trait;
use spd_common::Result;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("spd-catalog/", env!("CARGO_PKG_VERSION"));

/// Source of the raw storage listing.
///
/// Implemented over HTTP in production; tests substitute fixtures.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Fetch the complete listing. A failure here fails the whole rebuild;
    /// the previous index stays in service.
    async fn fetch(&self) -> Result<Vec<RawObject>>;
}

/// HTTP listing provider for the storage-listing endpoint
pub struct HttpListingProvider {
    http_client: reqwest::Client,
    listing_url: String,
}

impl HttpListingProvider {
    pub fn new(listing_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            listing_url: listing_url.into(),
        })
    }
}

#[async_trait]
impl ListingProvider for HttpListingProvider {
    async fn fetch(&self) -> Result<Vec<RawObject>> {
        let response = self
            .http_client
            .get(&self.listing_url)
            .send()
            .await?
            .error_for_status()?;

        let objects: Vec<RawObject> = response.json().await?;
        debug!(count = objects.len(), "Fetched storage listing");
        Ok(objects)
    }
}
