use std::path::PathBuf;

/// Calendar month labels used in month sheet names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Січень",
    "Лютий",
    "Березень",
    "Квітень",
    "Травень",
    "Червень",
    "Липень",
    "Серпень",
    "Вересень",
    "Жовтень",
    "Листопад",
    "Грудень",
];

/// Number of consecutive years, starting at the base year, that month sheets may carry.
pub const MONTH_YEAR_SPAN: i32 = 3;

pub const DEFAULT_BASE_YEAR: i32 = 2024;
pub const DEFAULT_ROW_LIMIT: usize = 200;
pub const PRODUCTS_SHEET: &str = "Номенклатура";
pub const ANALYSIS_SHEET: &str = "Аналіз ABC-XYZ";

pub const DEFAULT_ROW_COUNT_CACHE_SIZE: usize = 64;
pub const DEFAULT_WINDOW_CACHE_SIZE: usize = 32;

/// Static settings for a [`WorkbookStore`](super::WorkbookStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub base_year: i32,
    pub products_sheet: String,
    pub analysis_sheet: String,
    pub row_count_cache_size: usize,
    pub window_cache_size: usize,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_year: DEFAULT_BASE_YEAR,
            products_sheet: PRODUCTS_SHEET.to_string(),
            analysis_sheet: ANALYSIS_SHEET.to_string(),
            row_count_cache_size: DEFAULT_ROW_COUNT_CACHE_SIZE,
            window_cache_size: DEFAULT_WINDOW_CACHE_SIZE,
        }
    }
}
