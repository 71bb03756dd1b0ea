//! Query layer: translates a date range + filter into a record set.
//!
//! Handlers depend on the `NewsStore` trait, never on a concrete backend;
//! integration tests swap in an in-memory mock.

use crate::errors::Result;

pub mod backends;
pub mod models;

pub use models::{DateRange, NewsRecord, ProvinceRow, RegionRow, RegionStat};

/// Record-set filter. `Ids` is the drill-down carve-out: it bypasses the
/// date range entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewsFilter {
    All,
    Category(String),
    Outlet(String),
    Province(String),
    Ids(Vec<i32>),
}

#[async_trait::async_trait]
pub trait NewsStore: Send + Sync {
    /// Fetch news records restricted to `range` and `filter`. No aggregation
    /// happens here; the core engine does that in memory.
    async fn fetch_news(
        &self,
        range: Option<&DateRange>,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsRecord>>;

    /// Active regions, sort order ascending.
    async fn regions(&self) -> Result<Vec<RegionRow>>;

    /// Provinces, name ascending, optionally restricted to one region.
    async fn provinces(&self, region_id: Option<i32>) -> Result<Vec<ProvinceRow>>;

    /// Active-province counts per active region.
    async fn region_statistics(&self) -> Result<Vec<RegionStat>>;
}
