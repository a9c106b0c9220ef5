//! The data-presentation pipeline: filter, sort, paginate
//!
//! Pure and synchronous. The pipeline never touches the network or the
//! store; it derives the visible slice from the full in-memory cache and an
//! explicit `ViewState`, so the transform is testable without a live
//! session behind it.

use std::cmp::Ordering;
use std::str::FromStr;

use serde_json::Value;

use crate::store::beans::BeanRecord;

/// Fixed page size of the table view
pub const PAGE_SIZE: usize = 10;

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    BeanClass,
    Area,
    Perimeter,
    MajorAxisLength,
    MinorAxisLength,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "class" | "bean_class" => Ok(SortKey::BeanClass),
            "area" => Ok(SortKey::Area),
            "perimeter" => Ok(SortKey::Perimeter),
            "major_axis" | "major_axis_length" => Ok(SortKey::MajorAxisLength),
            "minor_axis" | "minor_axis_length" => Ok(SortKey::MinorAxisLength),
            other => Err(format!(
                "unknown sort column '{}' (expected id, class, area, perimeter, major_axis, minor_axis)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Pipeline parameters. These persist across re-renders within a session
/// and reset to defaults only when a fresh session starts.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub search: String,
    pub sort_key: SortKey,
    pub sort_dir: SortDirection,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: SortKey::Id,
            sort_dir: SortDirection::Ascending,
            page: 1,
        }
    }
}

impl ViewState {
    /// Replace the search term. The current page is left alone.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Re-selecting the current key flips direction; a new key sorts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_dir = self.sort_dir.flip();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDirection::Ascending;
        }
    }

    /// Select a page. Pages are 1-based; the upper bound is deliberately not
    /// re-validated here, so a page past the end yields an empty view.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// Output of the pipeline: visible rows plus pagination metadata
#[derive(Debug, Clone)]
pub struct PageView {
    pub rows: Vec<BeanRecord>,
    pub total_rows: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl PageView {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Run the full filter -> sort -> paginate transform
pub fn run_pipeline(cache: &[BeanRecord], state: &ViewState) -> PageView {
    let mut rows = filter(cache, &state.search);
    sort(&mut rows, state.sort_key, state.sort_dir);
    paginate(rows, state.page)
}

/// Case-insensitive full-text substring scan over every field of every
/// record. An empty term passes everything.
pub fn filter(cache: &[BeanRecord], term: &str) -> Vec<BeanRecord> {
    if term.is_empty() {
        return cache.to_vec();
    }

    let needle = term.to_lowercase();
    cache
        .iter()
        .filter(|bean| matches_term(bean, &needle))
        .cloned()
        .collect()
}

fn matches_term(bean: &BeanRecord, needle: &str) -> bool {
    let value = match serde_json::to_value(bean) {
        Ok(v) => v,
        Err(_) => return false,
    };

    let Value::Object(fields) = value else {
        return false;
    };

    fields
        .values()
        .filter_map(field_string)
        .any(|s| s.to_lowercase().contains(needle))
}

/// String form of a field value. Absent fields have none and never match.
fn field_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Sort the filtered set in place with per-field typed comparison: integer
/// for id, lexicographic for the class, numeric for the descriptors.
pub fn sort(rows: &mut [BeanRecord], key: SortKey, dir: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match dir {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare(a: &BeanRecord, b: &BeanRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::BeanClass => a.bean_class.cmp(&b.bean_class),
        SortKey::Area => a.area.total_cmp(&b.area),
        SortKey::Perimeter => a.perimeter.total_cmp(&b.perimeter),
        SortKey::MajorAxisLength => a.major_axis_length.total_cmp(&b.major_axis_length),
        SortKey::MinorAxisLength => a.minor_axis_length.total_cmp(&b.minor_axis_length),
    }
}

/// Slice out the requested 1-based page. A page past the end produces an
/// empty row set with the metadata intact.
pub fn paginate(rows: Vec<BeanRecord>, page: usize) -> PageView {
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(PAGE_SIZE);

    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(total_rows);
    let end = start.saturating_add(PAGE_SIZE).min(total_rows);

    let rows = rows[start..end].to_vec();

    PageView {
        rows,
        total_rows,
        page,
        total_pages,
    }
}
