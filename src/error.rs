use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use std::path::PathBuf;

/// Failures raised by the workbook store.
///
/// All of these are expected, local conditions. The store never retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("workbook unavailable: {}", path.display())]
    WorkbookUnavailable { path: PathBuf },

    #[error("sheet not found: {sheet}")]
    SheetNotFound { sheet: String },

    #[error("corrupt workbook {}: {reason}", path.display())]
    CorruptWorkbook { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn unavailable(path: impl Into<PathBuf>) -> Self {
        StoreError::WorkbookUnavailable { path: path.into() }
    }

    pub fn sheet_not_found(sheet: impl Into<String>) -> Self {
        StoreError::SheetNotFound { sheet: sheet.into() }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StoreError::CorruptWorkbook {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::WorkbookUnavailable { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::SheetNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::CorruptWorkbook { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Store(StoreError::WorkbookUnavailable { .. }) => {
                "Excel file not found. Set EXCEL_PATH or place the workbook next to the app."
                    .to_string()
            }
            AppError::Store(err) => err.to_string(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (AppError::from(StoreError::unavailable("/nope.xlsx")), StatusCode::NOT_FOUND),
            (AppError::from(StoreError::sheet_not_found("Звіт")), StatusCode::NOT_FOUND),
            (
                AppError::from(StoreError::corrupt("/bad.xlsx", "invalid zip header")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::InvalidInput("sheet is required".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn sheet_not_found_names_the_sheet() {
        let err = StoreError::sheet_not_found("NoSuchSheet");
        assert_eq!(err.to_string(), "sheet not found: NoSuchSheet");
        assert_eq!(AppError::from(err).public_message(), "sheet not found: NoSuchSheet");
    }
}
