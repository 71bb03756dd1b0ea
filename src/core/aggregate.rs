//! Dimension-agnostic aggregation of news records into ranked buckets.

use std::collections::HashMap;

use crate::repository::models::NewsRecord;

/// One aggregation key: its count, share of the attributed total and the
/// ids of the contributing records in attribution order.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregationBucket {
    pub key: String,
    pub count: u64,
    pub percentage: f64,
    pub ids: Vec<i32>,
}

#[derive(Clone, Debug, Default)]
pub struct Aggregation {
    /// Buckets sorted descending by count; ties keep discovery order.
    pub buckets: Vec<AggregationBucket>,
    /// Sum of all bucket counts. A record attributed to N keys contributes
    /// N here (multi-label, not a partition).
    pub total_attributed: u64,
}

/// Canonical outlet name: the prefix of the raw source field before its
/// first underscore.
pub fn outlet_key(site_name: &str) -> &str {
    site_name.split('_').next().unwrap_or(site_name)
}

/// Two-decimal share of `count` in `total`, `0.00` for an empty total.
pub fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// Aggregate `records` along one dimension.
///
/// `dimension` returns the (already duplicate-free) key set of a record;
/// category and outlet dimensions yield a singleton, the province dimension
/// delegates to the resolver. Pure and synchronous; calling it twice on the
/// same input yields identical output.
pub fn aggregate<F>(records: &[NewsRecord], mut dimension: F) -> Aggregation
where
    F: FnMut(&NewsRecord) -> Vec<String>,
{
    let mut buckets: Vec<AggregationBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        for key in dimension(record) {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                buckets.push(AggregationBucket {
                    key,
                    count: 0,
                    percentage: 0.0,
                    ids: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].count += 1;
            buckets[slot].ids.push(record.id);
        }
    }

    let total_attributed: u64 = buckets.iter().map(|b| b.count).sum();
    for bucket in &mut buckets {
        bucket.percentage = percentage_of(bucket.count, total_attributed);
    }

    // Vec::sort_by is stable, so equal counts keep first-encounter order.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));

    Aggregation {
        buckets,
        total_attributed,
    }
}
