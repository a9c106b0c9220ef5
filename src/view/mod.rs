//! Client-side view layer
//!
//! Holds the in-memory cache of bean records and the presentation pipeline
//! that derives the visible table slice from it. The cache is replaced
//! wholesale after every successful list fetch; mutations go through the
//! API and then trigger a full reload.

pub mod chart;
pub mod export;
pub mod format;
pub mod pipeline;
pub mod stats;

pub use chart::{class_distribution, share_percent, ClassCount};
pub use format::{format_number, format_optional};
pub use pipeline::{run_pipeline, PageView, SortDirection, SortKey, ViewState, PAGE_SIZE};
pub use stats::{cache_stats, CacheStats};

use tracing::debug;

use crate::client::BeanClient;
use crate::error::BeanError;
use crate::store::beans::{BeanInput, BeanRecord};

/// One page session: API client, the cached dataset, and the pipeline state
pub struct ViewSession {
    client: BeanClient,
    cache: Vec<BeanRecord>,
    pub state: ViewState,
}

impl ViewSession {
    pub fn new(client: BeanClient) -> Self {
        Self {
            client,
            cache: Vec::new(),
            state: ViewState::default(),
        }
    }

    /// The last-known snapshot of the store
    pub fn cache(&self) -> &[BeanRecord] {
        &self.cache
    }

    /// Fetch the full list and replace the cache. A failed fetch leaves the
    /// previous cache untouched.
    pub async fn reload(&mut self) -> Result<usize, BeanError> {
        let beans = self.client.list().await?;
        debug!(count = beans.len(), "Cache reloaded");
        self.cache = beans;
        Ok(self.cache.len())
    }

    /// Fetch one bean for the detail view
    pub async fn fetch(&self, id: i64) -> Result<BeanRecord, BeanError> {
        self.client.get(id).await
    }

    /// Create a bean, then reload. On failure the cache is untouched and the
    /// caller can retry with the same input.
    pub async fn create(&mut self, input: &BeanInput) -> Result<BeanRecord, BeanError> {
        let bean = self.client.create(input).await?;
        self.reload().await?;
        Ok(bean)
    }

    /// Replace a bean's fields, then reload
    pub async fn update(&mut self, id: i64, input: &BeanInput) -> Result<BeanRecord, BeanError> {
        let bean = self.client.update(id, input).await?;
        self.reload().await?;
        Ok(bean)
    }

    /// Delete a bean, then reload. The current page is deliberately not
    /// clamped afterwards; a trailing page may come back empty.
    pub async fn delete(&mut self, id: i64) -> Result<(), BeanError> {
        self.client.delete(id).await?;
        self.reload().await?;
        Ok(())
    }

    /// Run the pipeline for the current state
    pub fn page(&self) -> PageView {
        run_pipeline(&self.cache, &self.state)
    }

    /// Aggregates over the unfiltered cache
    pub fn stats(&self) -> CacheStats {
        cache_stats(&self.cache)
    }

    /// Class distribution over the unfiltered cache
    pub fn class_distribution(&self) -> Vec<ClassCount> {
        class_distribution(&self.cache)
    }

    /// Export the cache as CSV
    pub fn export_csv(&self) -> Result<String, BeanError> {
        export::export_csv(&self.cache)
    }
}
