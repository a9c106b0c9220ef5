//! Summary statistics over the unfiltered cache

use std::collections::HashSet;

use serde::Serialize;

use crate::store::beans::BeanRecord;

/// Aggregates shown in the dashboard header cards. Computed over the whole
/// cache, independent of the current filter.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_beans: usize,
    pub distinct_classes: usize,
    /// None when the cache is empty; rendered as "N/A"
    pub avg_area: Option<f64>,
    pub avg_perimeter: Option<f64>,
}

pub fn cache_stats(cache: &[BeanRecord]) -> CacheStats {
    let distinct_classes = cache
        .iter()
        .map(|b| b.bean_class.as_str())
        .collect::<HashSet<_>>()
        .len();

    CacheStats {
        total_beans: cache.len(),
        distinct_classes,
        avg_area: mean(cache, |b| b.area),
        avg_perimeter: mean(cache, |b| b.perimeter),
    }
}

fn mean(cache: &[BeanRecord], field: impl Fn(&BeanRecord) -> f64) -> Option<f64> {
    if cache.is_empty() {
        return None;
    }
    Some(cache.iter().map(field).sum::<f64>() / cache.len() as f64)
}
