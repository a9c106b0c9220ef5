//! Class-distribution aggregation for the bar chart

use serde::Serialize;

use crate::store::beans::BeanRecord;

/// One bar of the class-distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// Group the unfiltered cache by class and count occurrences. Labels keep
/// first-seen order. Recomputed on demand, never maintained incrementally.
pub fn class_distribution(cache: &[BeanRecord]) -> Vec<ClassCount> {
    let mut counts: Vec<ClassCount> = Vec::new();

    for bean in cache {
        match counts.iter_mut().find(|c| c.label == bean.bean_class) {
            Some(entry) => entry.count += 1,
            None => counts.push(ClassCount {
                label: bean.bean_class.clone(),
                count: 1,
            }),
        }
    }

    counts
}

/// Share of the total for the chart tooltip, in percent
pub fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
