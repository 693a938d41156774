use super::store::WorkbookStore;
use crate::error::StoreError;
use crate::models::Summary;

/// Aggregates the well-known sheet counts and the month sheet list.
///
/// Fails as a whole if any of the underlying reads fails.
pub fn build_summary(store: &WorkbookStore) -> Result<Summary, StoreError> {
    let config = store.config();
    let month_sheets = store.list_month_sheets()?;

    Ok(Summary {
        products_count: store.row_count(&config.products_sheet)?,
        analysis_count: store.row_count(&config.analysis_sheet)?,
        month_count: month_sheets.len(),
        month_sheets,
    })
}
