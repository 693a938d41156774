use calamine::Reader;
use std::path::Path;

use super::accessor::WorkbookHandle;
use crate::error::StoreError;
use crate::models::{CellValue, SheetWindow};

fn ensure_sheet(workbook: &WorkbookHandle, sheet: &str) -> Result<(), StoreError> {
    if workbook.sheet_names().iter().any(|name| name == sheet) {
        Ok(())
    } else {
        Err(StoreError::sheet_not_found(sheet))
    }
}

fn place(row: &mut Vec<CellValue>, col: usize, value: CellValue) {
    if row.len() <= col {
        row.resize(col + 1, CellValue::Empty);
    }
    row[col] = value;
}

/// Reads the first row as the header plus at most `row_limit` rows after it.
///
/// Cells are streamed in sheet order and reading stops at the first cell past
/// the window, so only the requested rows are ever decoded. Blank rows inside
/// the window, including those between the last read row and the limit, are
/// returned as rows of empty cells.
pub fn read_window(
    workbook: &mut WorkbookHandle,
    path: &Path,
    sheet: &str,
    row_limit: usize,
) -> Result<SheetWindow, StoreError> {
    ensure_sheet(workbook, sheet)?;

    let mut cells = workbook
        .worksheet_cells_reader(sheet)
        .map_err(|e| StoreError::corrupt(path, e))?;
    let declared_width = cells.dimensions().end.1 as usize + 1;

    let mut header: Vec<CellValue> = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut any_cell = false;

    while let Some(cell) = cells.next_cell().map_err(|e| StoreError::corrupt(path, e))? {
        any_cell = true;
        let (row, col) = cell.get_position();
        let (row, col) = (row as usize, col as usize);
        if row > row_limit {
            // a later cell exists, so every row up to the limit is part of the sheet
            if rows.len() < row_limit {
                rows.resize_with(row_limit, Vec::new);
            }
            break;
        }

        let value = CellValue::from(cell.get_value());
        if row == 0 {
            place(&mut header, col, value);
        } else {
            if rows.len() < row {
                rows.resize_with(row, Vec::new);
            }
            place(&mut rows[row - 1], col, value);
        }
    }

    if !any_cell {
        return Ok(SheetWindow::default());
    }

    let window = finish_window(header, rows, declared_width);
    tracing::debug!(
        "Read window of {} rows x {} columns from sheet {}",
        window.rows.len(),
        window.header.len(),
        sheet
    );
    Ok(window)
}

/// Pads the header to the declared width and every row to the header width.
///
/// The width comes from the first row and the sheet dimension only, so the
/// header is the same whatever the row limit. Cells past it stay in the raw
/// rows and are dropped at projection.
fn finish_window(
    mut header: Vec<CellValue>,
    mut rows: Vec<Vec<CellValue>>,
    declared_width: usize,
) -> SheetWindow {
    let width = header.len().max(declared_width);
    header.resize(width, CellValue::Empty);
    for row in rows.iter_mut() {
        if row.len() < width {
            row.resize(width, CellValue::Empty);
        }
    }

    SheetWindow {
        header: header.iter().map(CellValue::to_string).collect(),
        rows,
    }
}

/// Data rows declared by the sheet's dimension, excluding the header.
///
/// Taken from the `<dimension>` metadata without scanning rows, so trailing
/// rows that hold only formatting are counted even though `read_window` may
/// never return them.
pub fn structural_row_count(
    workbook: &mut WorkbookHandle,
    path: &Path,
    sheet: &str,
) -> Result<usize, StoreError> {
    ensure_sheet(workbook, sheet)?;

    let cells = workbook
        .worksheet_cells_reader(sheet)
        .map_err(|e| StoreError::corrupt(path, e))?;
    let last_row = cells.dimensions().end.0 as usize + 1;
    Ok(last_row.saturating_sub(1))
}
