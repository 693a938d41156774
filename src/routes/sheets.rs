use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
    Json,
    http::Method,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::{AppError, StoreError},
    models::{Record, Summary},
    services::excel::WorkbookStore,
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/api/summary", get(summary))
        .route("/api/sheets", get(sheets))
        .route("/api/products", get(products))
        .route("/api/analysis", get(analysis))
        .route("/api/monthly", get(monthly))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    sheet: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SheetListResponse {
    sheets: Vec<String>,
    month_sheets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    columns: Vec<String>,
    rows: Vec<Record>,
}

/// Negative limits are clamped to zero rows.
fn resolve_limit(requested: Option<i64>, default: usize) -> usize {
    match requested {
        Some(limit) => usize::try_from(limit).unwrap_or(0),
        None => default,
    }
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidInput(format!("invalid query: {}", rejection.body_text())))
}

/// Runs a blocking store query off the async runtime.
async fn query_store<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&WorkbookStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::Internal(format!("workbook query task failed: {}", e)))?
        .map_err(AppError::from)
}

async fn table(state: &AppState, sheet: String, limit: usize) -> Result<Json<TableResponse>, AppError> {
    let start = std::time::Instant::now();
    let response = query_store(state, move |store| {
        let rows = store.records(&sheet, limit)?;
        let columns = store.columns(&sheet)?;
        Ok(TableResponse { columns, rows })
    })
    .await?;
    tracing::debug!("Served {} rows in {:?}", response.rows.len(), start.elapsed());
    Ok(Json(response))
}

async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<Summary>, AppError> {
    let summary = query_store(&state, |store| store.summary()).await?;
    Ok(Json(summary))
}

async fn sheets(State(state): State<Arc<AppState>>) -> Result<Json<SheetListResponse>, AppError> {
    let response = query_store(&state, |store| {
        Ok(SheetListResponse {
            sheets: store.list_sheets()?.to_vec(),
            month_sheets: store.list_month_sheets()?,
        })
    })
    .await?;
    Ok(Json(response))
}

async fn products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<TableResponse>, AppError> {
    let query = query_params(query)?;
    let limit = resolve_limit(query.limit, state.default_limit);
    let sheet = state.store.config().products_sheet.clone();
    table(&state, sheet, limit).await
}

async fn analysis(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<TableResponse>, AppError> {
    let query = query_params(query)?;
    let limit = resolve_limit(query.limit, state.default_limit);
    let sheet = state.store.config().analysis_sheet.clone();
    table(&state, sheet, limit).await
}

async fn monthly(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MonthlyQuery>, QueryRejection>,
) -> Result<Json<TableResponse>, AppError> {
    let query = query_params(query)?;
    let sheet = query
        .sheet
        .filter(|sheet| !sheet.is_empty())
        .ok_or_else(|| AppError::InvalidInput("sheet is required".to_string()))?;
    let limit = resolve_limit(query.limit, state.default_limit);

    let requested = sheet.clone();
    let is_month_sheet = query_store(&state, move |store| {
        Ok(store.list_month_sheets()?.contains(&requested))
    })
    .await?;
    if !is_month_sheet {
        return Err(StoreError::sheet_not_found(sheet).into());
    }

    table(&state, sheet, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 200), 200);
        assert_eq!(resolve_limit(Some(5), 200), 5);
        assert_eq!(resolve_limit(Some(0), 200), 0);
        assert_eq!(resolve_limit(Some(-3), 200), 0);
    }
}
