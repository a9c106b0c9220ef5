//! Presentation pipeline integration tests
//!
//! Covers the filter/sort/paginate properties the table view depends on.

use beanboard::store::beans::BeanRecord;
use beanboard::view::{
    cache_stats, format_optional, pipeline, run_pipeline, SortDirection, SortKey, ViewState,
    PAGE_SIZE,
};

fn bean(id: i64, class: &str, area: f64) -> BeanRecord {
    BeanRecord {
        id,
        bean_class: class.to_string(),
        area,
        perimeter: area / 10.0,
        major_axis_length: area / 20.0,
        minor_axis_length: area / 40.0,
        aspect_ratio: None,
        eccentricity: None,
        convex_area: None,
        equiv_diameter: None,
        extent: None,
        solidity: None,
        roundness: None,
        compactness: None,
        shape_factor1: None,
        shape_factor2: None,
        shape_factor3: None,
        shape_factor4: None,
        image_url: None,
        created_at: "2026-01-01 00:00:00.000".to_string(),
        updated_at: "2026-01-01 00:00:00.000".to_string(),
    }
}

fn sample_cache() -> Vec<BeanRecord> {
    vec![
        bean(1, "SEKER", 100.0),
        bean(2, "BOMBAY", 200.0),
        bean(3, "HOROZ", 150.0),
        bean(4, "SEKER", 300.0),
        bean(5, "DERMASON", 250.0),
    ]
}

#[test]
fn filter_output_is_a_subset_of_its_input() {
    let cache = sample_cache();
    for term in ["seker", "0", "bo", "zzz", "1"] {
        let filtered = pipeline::filter(&cache, term);
        assert!(filtered.len() <= cache.len());
        for bean in &filtered {
            assert!(cache.contains(bean), "filter invented a record");
        }
    }
}

#[test]
fn filtering_by_a_records_class_includes_it() {
    let cache = sample_cache();
    for record in &cache {
        let filtered = pipeline::filter(&cache, &record.bean_class);
        assert!(
            filtered.contains(record),
            "record {} missing from its own class filter",
            record.id
        );
    }
}

#[test]
fn filter_is_case_insensitive() {
    let cache = vec![bean(1, "SEKER", 100.0), bean(2, "BOMBAY", 200.0)];
    let filtered = pipeline::filter(&cache, "bombay");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 2);
}

#[test]
fn empty_search_term_passes_all_records() {
    let cache = sample_cache();
    assert_eq!(pipeline::filter(&cache, "").len(), cache.len());
}

#[test]
fn sort_by_area_ascending() {
    let mut rows = vec![bean(1, "SEKER", 200.0), bean(2, "SEKER", 100.0)];
    pipeline::sort(&mut rows, SortKey::Area, SortDirection::Ascending);
    assert_eq!(rows[0].area, 100.0);
    assert_eq!(rows[1].area, 200.0);
}

#[test]
fn reversing_direction_reverses_distinct_values() {
    let mut asc = sample_cache();
    pipeline::sort(&mut asc, SortKey::Area, SortDirection::Ascending);

    let mut desc = sample_cache();
    pipeline::sort(&mut desc, SortKey::Area, SortDirection::Descending);

    let asc_ids: Vec<_> = asc.iter().map(|b| b.id).collect();
    let mut desc_ids: Vec<_> = desc.iter().map(|b| b.id).collect();
    desc_ids.reverse();
    assert_eq!(asc_ids, desc_ids);
}

#[test]
fn class_sort_is_lexicographic() {
    let mut rows = sample_cache();
    pipeline::sort(&mut rows, SortKey::BeanClass, SortDirection::Ascending);
    let classes: Vec<_> = rows.iter().map(|b| b.bean_class.as_str()).collect();
    assert_eq!(classes, ["BOMBAY", "DERMASON", "HOROZ", "SEKER", "SEKER"]);
}

#[test]
fn pages_partition_the_sorted_sequence_exactly() {
    let cache: Vec<_> = (1..=37).map(|i| bean(i, "SEKER", i as f64)).collect();
    let mut state = ViewState::default();

    let first = run_pipeline(&cache, &state);
    assert_eq!(first.total_pages, 4);

    let mut reassembled = Vec::new();
    for page in 1..=first.total_pages {
        state.set_page(page);
        let view = run_pipeline(&cache, &state);
        reassembled.extend(view.rows);
    }

    assert_eq!(reassembled.len(), cache.len());
    let ids: Vec<_> = reassembled.iter().map(|b| b.id).collect();
    let expected: Vec<_> = (1..=37).collect();
    assert_eq!(ids, expected, "pages must not overlap or skip records");
}

#[test]
fn twenty_five_records_make_three_pages() {
    let cache: Vec<_> = (1..=25).map(|i| bean(i, "SEKER", i as f64)).collect();
    let mut state = ViewState::default();

    let page1 = run_pipeline(&cache, &state);
    assert_eq!(page1.rows.len(), PAGE_SIZE);
    assert_eq!(page1.total_pages, 3);
    assert!(!page1.has_prev());
    assert!(page1.has_next());

    state.set_page(3);
    let page3 = run_pipeline(&cache, &state);
    assert_eq!(page3.rows.len(), 5);
    assert!(page3.has_prev());
    assert!(!page3.has_next());
}

#[test]
fn page_one_is_never_empty_for_nonempty_input() {
    let cache = vec![bean(1, "SEKER", 100.0)];
    let view = run_pipeline(&cache, &ViewState::default());
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.total_pages, 1);
}

#[test]
fn stats_over_empty_cache_display_na() {
    let stats = cache_stats(&[]);
    assert_eq!(stats.total_beans, 0);
    assert_eq!(format_optional(stats.avg_area), "N/A");
    assert_eq!(format_optional(stats.avg_perimeter), "N/A");
}

#[test]
fn cache_shrink_leaves_stale_page_empty() {
    // 21 records: page 3 holds exactly one row
    let cache: Vec<_> = (1..=21).map(|i| bean(i, "SEKER", i as f64)).collect();
    let mut state = ViewState::default();
    state.set_page(3);

    let before = run_pipeline(&cache, &state);
    assert_eq!(before.rows.len(), 1);

    // Delete the only record on the last page; the page index is not
    // re-validated, so the view comes back empty rather than snapping back
    let shrunk: Vec<_> = cache.into_iter().filter(|b| b.id != 21).collect();
    let after = run_pipeline(&shrunk, &state);
    assert_eq!(after.page, 3);
    assert_eq!(after.total_pages, 2);
    assert!(after.rows.is_empty());
}

#[test]
fn search_and_sort_compose() {
    let cache = sample_cache();
    let mut state = ViewState::default();
    state.set_search("SEKER");
    state.toggle_sort(SortKey::Area);
    state.toggle_sort(SortKey::Area); // second click: descending

    let view = run_pipeline(&cache, &state);
    assert_eq!(view.total_rows, 2);
    let areas: Vec<_> = view.rows.iter().map(|b| b.area).collect();
    assert_eq!(areas, [300.0, 100.0]);
}
