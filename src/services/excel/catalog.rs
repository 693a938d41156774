use calamine::Reader;
use std::collections::HashSet;

use super::accessor::WorkbookHandle;
use super::types::{MONTH_NAMES, MONTH_YEAR_SPAN};

/// Sheet names in the order they appear in the workbook.
pub fn sheet_names(workbook: &WorkbookHandle) -> Vec<String> {
    workbook.sheet_names().to_vec()
}

/// Every month sheet name the convention allows, calendar order within a year,
/// years ascending.
pub fn month_sheet_candidates(base_year: i32) -> impl Iterator<Item = String> {
    (base_year..base_year + MONTH_YEAR_SPAN).flat_map(|year| {
        MONTH_NAMES
            .iter()
            .map(move |month| format!("{} {}", month, year))
    })
}

/// Candidates that exist in `available`, kept in candidate order.
pub fn month_sheets(available: &[String], base_year: i32) -> Vec<String> {
    let present: HashSet<&str> = available.iter().map(String::as_str).collect();
    month_sheet_candidates(base_year)
        .filter(|candidate| present.contains(candidate.as_str()))
        .collect()
}
