use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::services::excel::types::{
    ANALYSIS_SHEET, DEFAULT_BASE_YEAR, DEFAULT_ROW_COUNT_CACHE_SIZE, DEFAULT_ROW_LIMIT,
    DEFAULT_WINDOW_CACHE_SIZE, PRODUCTS_SHEET,
};
use crate::services::excel::StoreConfig;

/// Workbook looked up in the working directory when `EXCEL_PATH` does not point at a file.
pub const DEFAULT_WORKBOOK_FILE: &str = "Анализ NEW NOT FINAL (6).xlsx";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub default_limit: usize,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = resolve_workbook_path(lookup("EXCEL_PATH"), lookup("HOME"));

        let store = StoreConfig {
            path,
            base_year: parse_var(&lookup, "MONTH_BASE_YEAR", DEFAULT_BASE_YEAR)?,
            products_sheet: lookup("PRODUCTS_SHEET").unwrap_or_else(|| PRODUCTS_SHEET.to_string()),
            analysis_sheet: lookup("ANALYSIS_SHEET").unwrap_or_else(|| ANALYSIS_SHEET.to_string()),
            row_count_cache_size: parse_var(
                &lookup,
                "ROW_COUNT_CACHE_SIZE",
                DEFAULT_ROW_COUNT_CACHE_SIZE,
            )?,
            window_cache_size: parse_var(&lookup, "WINDOW_CACHE_SIZE", DEFAULT_WINDOW_CACHE_SIZE)?,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {}", bind_addr))?;

        Ok(Config {
            bind_addr,
            default_limit: DEFAULT_ROW_LIMIT,
            store,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

/// `EXCEL_PATH` with `~` expanded, or the bundled default when that is not a file.
fn resolve_workbook_path(raw: Option<String>, home: Option<String>) -> PathBuf {
    let candidate = raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| expand_home(value.trim(), home.as_deref()));

    match candidate {
        Some(path) if path.is_file() => path,
        Some(path) => {
            tracing::warn!(
                "EXCEL_PATH {} is not a file, falling back to {}",
                path.display(),
                DEFAULT_WORKBOOK_FILE
            );
            PathBuf::from(DEFAULT_WORKBOOK_FILE)
        }
        None => PathBuf::from(DEFAULT_WORKBOOK_FILE),
    }
}

fn expand_home(value: &str, home: Option<&str>) -> PathBuf {
    match (value.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            PathBuf::from(format!("{}{}", home, rest))
        }
        _ => PathBuf::from(value),
    }
}
