use crate::commands::datasets::{ITEMS_PER_PAGE, filter_datasets, page_slice};
use crate::commands::{flag_value, positionals};

use client_core::api::DatasetRef;

fn datasets(count: usize) -> Vec<DatasetRef> {
    (1..=count as u64)
        .map(|id| DatasetRef {
            id,
            filename: format!("dataset_{id}.csv"),
        })
        .collect()
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// **VALUE**: Verifies the filename filter is case-insensitive substring
/// matching, the behavior of the original dashboard's search box.
#[test]
fn given_mixed_case_query_when_filtering_then_matches_case_insensitively() {
    let datasets = vec![
        DatasetRef {
            id: 1,
            filename: "Sales_Q1.csv".to_string(),
        },
        DatasetRef {
            id: 2,
            filename: "churn.csv".to_string(),
        },
    ];

    let matched = filter_datasets(&datasets, "SALES");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, 1);

    assert!(filter_datasets(&datasets, "parquet").is_empty());
}

/// **VALUE**: Verifies page arithmetic: fixed page size, 1-based numbering, a
/// short final page, and out-of-range pages yielding empty instead of
/// panicking.
#[test]
fn given_twelve_datasets_when_paging_then_pages_are_stable() {
    let all = datasets(12);

    let first = page_slice(&all, 1);
    assert_eq!(first.len(), ITEMS_PER_PAGE);
    assert_eq!(first[0].id, 1);

    let third = page_slice(&all, 3);
    assert_eq!(third.len(), 2);
    assert_eq!(third[0].id, 11);

    assert!(page_slice(&all, 4).is_empty());

    // Page 0 clamps to the first page
    assert_eq!(page_slice(&all, 0).len(), ITEMS_PER_PAGE);
}

/// **VALUE**: Verifies flag parsing pulls the value following a flag and
/// leaves positionals untouched.
///
/// **BUG THIS CATCHES**: Would catch a flag's value being counted as a
/// positional argument, which would break `detect 42 --out /tmp`.
#[test]
fn given_flags_and_positionals_when_parsing_then_separated() {
    let rest = args(&["42", "--out", "/tmp/reports"]);

    assert_eq!(flag_value(&rest, "--out"), Some("/tmp/reports".to_string()));
    assert_eq!(flag_value(&rest, "--filter"), None);
    assert_eq!(positionals(&rest), vec!["42"]);
}

/// **VALUE**: Verifies a trailing flag with no value parses as absent rather
/// than panicking on a missing index.
#[test]
fn given_trailing_flag_when_parsing_then_none() {
    let rest = args(&["--filter"]);
    assert_eq!(flag_value(&rest, "--filter"), None);
    assert!(positionals(&rest).is_empty());
}
