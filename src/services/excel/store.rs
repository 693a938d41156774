use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::accessor::with_workbook;
use super::cache::BoundedCache;
use super::types::StoreConfig;
use super::{catalog, projector, reader, summary};
use crate::error::StoreError;
use crate::models::{Record, SheetWindow, Summary};

/// Memoized reads, kept apart from the store's configuration.
///
/// Nothing here is ever invalidated. If the workbook is replaced on disk while
/// the process runs, already cached values stay stale until restart.
struct StoreCaches {
    sheet_names: OnceCell<Arc<Vec<String>>>,
    row_counts: BoundedCache<String, usize>,
    windows: BoundedCache<(String, usize), Arc<SheetWindow>>,
}

impl StoreCaches {
    fn new(config: &StoreConfig) -> Self {
        Self {
            sheet_names: OnceCell::new(),
            row_counts: BoundedCache::new(config.row_count_cache_size),
            windows: BoundedCache::new(config.window_cache_size),
        }
    }
}

/// Read-only query surface over a single workbook file.
///
/// The file is reopened for every uncached read and never held between calls.
/// Safe to share across threads.
pub struct WorkbookStore {
    config: StoreConfig,
    available: bool,
    caches: StoreCaches,
}

impl WorkbookStore {
    pub fn new(config: StoreConfig) -> Self {
        let available = config.path.is_file();
        if available {
            tracing::info!("Serving workbook {}", config.path.display());
        } else {
            tracing::warn!(
                "Workbook {} is not a readable file; all queries will fail",
                config.path.display()
            );
        }

        let caches = StoreCaches::new(&config);
        Self {
            config,
            available,
            caches,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::unavailable(&self.config.path))
        }
    }

    fn ensure_sheet(&self, sheet: &str) -> Result<(), StoreError> {
        if self.list_sheets()?.iter().any(|name| name == sheet) {
            Ok(())
        } else {
            Err(StoreError::sheet_not_found(sheet))
        }
    }

    pub fn list_sheets(&self) -> Result<Arc<Vec<String>>, StoreError> {
        self.ensure_available()?;
        if let Some(names) = self.caches.sheet_names.get() {
            return Ok(Arc::clone(names));
        }

        let names = Arc::new(with_workbook(&self.config.path, |workbook| {
            Ok(catalog::sheet_names(workbook))
        })?);
        tracing::debug!("Workbook has {} sheets", names.len());

        // a concurrent reader may have filled the slot first; either value is the same list
        let _ = self.caches.sheet_names.set(Arc::clone(&names));
        Ok(names)
    }

    pub fn list_month_sheets(&self) -> Result<Vec<String>, StoreError> {
        let sheets = self.list_sheets()?;
        Ok(catalog::month_sheets(&sheets, self.config.base_year))
    }

    /// Header plus at most `row_limit` rows from `sheet`.
    pub fn read_window(&self, sheet: &str, row_limit: usize) -> Result<Arc<SheetWindow>, StoreError> {
        self.ensure_available()?;
        self.ensure_sheet(sheet)?;

        let path = &self.config.path;
        self.caches
            .windows
            .get_or_try_insert_with((sheet.to_string(), row_limit), || {
                let window = with_workbook(path, |workbook| {
                    reader::read_window(workbook, path, sheet, row_limit)
                })?;
                Ok(Arc::new(window))
            })
    }

    /// Column labels of `sheet`, read through the same path as [`records`](Self::records).
    pub fn columns(&self, sheet: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.read_window(sheet, 1)?.header.clone())
    }

    pub fn records(&self, sheet: &str, row_limit: usize) -> Result<Vec<Record>, StoreError> {
        let window = self.read_window(sheet, row_limit)?;
        Ok(projector::project_records(&window.header, &window.rows))
    }

    /// Data rows of `sheet` according to its dimension metadata.
    ///
    /// Can be larger than the number of rows an unbounded window returns when
    /// the sheet declares trailing rows with no values.
    pub fn row_count(&self, sheet: &str) -> Result<usize, StoreError> {
        self.ensure_available()?;
        self.ensure_sheet(sheet)?;

        let path = &self.config.path;
        self.caches
            .row_counts
            .get_or_try_insert_with(sheet.to_string(), || {
                with_workbook(path, |workbook| {
                    reader::structural_row_count(workbook, path, sheet)
                })
            })
    }

    pub fn summary(&self) -> Result<Summary, StoreError> {
        summary::build_summary(self)
    }
}
