use calamine::{open_workbook, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::StoreError;

pub type WorkbookHandle = Xlsx<BufReader<File>>;

/// Opens the workbook read-only and lends it to `op` for a single operation.
///
/// The handle is dropped before this returns, whatever `op` produced.
pub fn with_workbook<T, F>(path: &Path, op: F) -> Result<T, StoreError>
where
    F: FnOnce(&mut WorkbookHandle) -> Result<T, StoreError>,
{
    if !path.is_file() {
        tracing::warn!("Workbook not found at {}", path.display());
        return Err(StoreError::unavailable(path));
    }

    let open_start = std::time::Instant::now();
    let mut workbook: WorkbookHandle = open_workbook(path).map_err(|e| open_error(path, e))?;
    tracing::debug!("Opened {} in {:?}", path.display(), open_start.elapsed());

    let result = op(&mut workbook);
    drop(workbook);
    result
}

fn open_error(path: &Path, err: XlsxError) -> StoreError {
    match err {
        XlsxError::Io(e) => {
            tracing::warn!("Failed to read workbook {}: {}", path.display(), e);
            StoreError::unavailable(path)
        }
        other => {
            tracing::error!("Failed to parse workbook {}: {}", path.display(), other);
            StoreError::corrupt(path, other)
        }
    }
}
