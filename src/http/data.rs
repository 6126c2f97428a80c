use crate::datamodel::{
    EntryCreated, MessageResponse, NewPm25Entry, NormalizedPm25Record, Pm25Record,
    Pm25Statistics, Region,
};
use crate::dataset::TOP_POLLUTED_LIMIT;
use crate::exporters::{CsvConverter, ExportFormat, JsonlConverter};
use crate::http::app_error::AppError;
use crate::http::state::HttpServerState;
use anyhow::anyhow;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use utoipa::IntoParams;

const ENTRY_NOT_FOUND: &str = "Data entry not found";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DataQuery {
    /// Output format: json, csv or jsonl (default: json)
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Latitude to filter by
    pub lat: Option<f64>,
    /// Longitude to filter by
    pub lon: Option<f64>,
}

fn unprocessable(body_text: String) -> AppError {
    AppError::unprocessable_entity(anyhow!(body_text))
}

/// Body rejections keep 413 when the body limit is exceeded.
fn invalid_body(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(anyhow!(rejection.body_text()))
    } else {
        unprocessable(rejection.body_text())
    }
}

fn entry_not_found() -> AppError {
    AppError::not_found(anyhow!(ENTRY_NOT_FOUND))
}

/// Retrieve all available data.
#[utoipa::path(
    get,
    path = "/data",
    tag = "PM2.5",
    params(DataQuery),
    responses(
        (status = 200, description = "Every record in the requested format", body = Vec<Pm25Record>),
        (status = 400, description = "Unsupported format", body = AppError)
    )
)]
pub async fn get_all_data(
    State(state): State<HttpServerState>,
    Query(query): Query<DataQuery>,
) -> Result<Response, AppError> {
    let format = match query.format.as_deref() {
        Some(format_str) => ExportFormat::from_extension(format_str).ok_or_else(|| {
            AppError::bad_request(anyhow!(
                "Unsupported export format '{}'. Supported formats: json, csv, jsonl",
                format_str
            ))
        })?,
        None => ExportFormat::Json,
    };

    let store = state.store.read().await;
    let records = store.all();

    let response = match format {
        ExportFormat::Json => Json(records).into_response(),
        ExportFormat::Csv => (
            [("content-type", format.content_type())],
            CsvConverter::to_csv(records),
        )
            .into_response(),
        ExportFormat::Jsonl => {
            let jsonl_content =
                JsonlConverter::to_jsonl(records).map_err(AppError::internal_server_error)?;
            ([("content-type", format.content_type())], jsonl_content).into_response()
        }
    };
    Ok(response)
}

/// Add a new data entry.
#[utoipa::path(
    post,
    path = "/data",
    tag = "PM2.5",
    request_body = NewPm25Entry,
    responses(
        (status = 200, description = "Entry created", body = EntryCreated),
        (status = 413, description = "Body larger than the configured limit", body = AppError),
        (status = 422, description = "Invalid entry", body = AppError)
    )
)]
pub async fn add_data(
    State(state): State<HttpServerState>,
    payload: Result<Json<NewPm25Entry>, JsonRejection>,
) -> Result<Json<EntryCreated>, AppError> {
    let Json(entry) = payload.map_err(invalid_body)?;
    let id = state.store.write().await.add(entry);
    Ok(Json(EntryCreated {
        message: "Data added successfully".to_string(),
        id,
    }))
}

/// Provide basic statistics across the dataset.
#[utoipa::path(
    get,
    path = "/data/stats",
    tag = "PM2.5",
    responses(
        (status = 200, description = "Count, average, minimum and maximum PM2.5", body = Pm25Statistics)
    )
)]
pub async fn statistics(State(state): State<HttpServerState>) -> Json<Pm25Statistics> {
    Json(state.store.read().await.statistics())
}

/// Filter the dataset based on latitude and longitude.
#[utoipa::path(
    get,
    path = "/data/filter",
    tag = "PM2.5",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching records", body = Vec<Pm25Record>),
        (status = 400, description = "Neither lat nor lon provided", body = AppError),
        (status = 404, description = "No matching records", body = AppError)
    )
)]
pub async fn filter_data(
    State(state): State<HttpServerState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<Json<Vec<Pm25Record>>, AppError> {
    let Query(query) = query.map_err(|r| unprocessable(r.body_text()))?;
    if query.lat.is_none() && query.lon.is_none() {
        return Err(AppError::bad_request(anyhow!(
            "At least one of 'lat' or 'lon' must be provided"
        )));
    }

    let filtered = state.store.read().await.filter(query.lat, query.lon);
    if filtered.is_empty() {
        return Err(AppError::not_found(anyhow!(
            "No data found for the provided filters"
        )));
    }
    Ok(Json(filtered))
}

/// Retrieve data within a bounding box.
#[utoipa::path(
    get,
    path = "/data/region",
    tag = "PM2.5",
    params(Region),
    responses(
        (status = 200, description = "Records inside the box, boundaries included", body = Vec<Pm25Record>),
        (status = 404, description = "No records in the box", body = AppError),
        (status = 422, description = "Missing or invalid bounds", body = AppError)
    )
)]
pub async fn data_in_region(
    State(state): State<HttpServerState>,
    query: Result<Query<Region>, QueryRejection>,
) -> Result<Json<Vec<Pm25Record>>, AppError> {
    let Query(region) = query.map_err(|r| unprocessable(r.body_text()))?;

    let region_data = state.store.read().await.in_region(&region);
    if region_data.is_empty() {
        return Err(AppError::not_found(anyhow!(
            "No data found within the specified region"
        )));
    }
    Ok(Json(region_data))
}

/// Get data with normalized PM2.5 levels.
#[utoipa::path(
    get,
    path = "/data/normalized",
    tag = "PM2.5",
    responses(
        (status = 200, description = "Records with PM2.5 scaled to [0, 1]", body = Vec<NormalizedPm25Record>),
        (status = 400, description = "All PM2.5 values are equal", body = AppError)
    )
)]
pub async fn normalized(
    State(state): State<HttpServerState>,
) -> Result<Json<Vec<NormalizedPm25Record>>, AppError> {
    let normalized = state
        .store
        .read()
        .await
        .normalized()
        .map_err(AppError::from_dataset)?;
    Ok(Json(normalized))
}

/// Get the 10 most polluted locations in the dataset.
#[utoipa::path(
    get,
    path = "/data/top10",
    tag = "PM2.5",
    responses(
        (status = 200, description = "Highest PM2.5 first", body = Vec<Pm25Record>),
        (status = 404, description = "The dataset is empty", body = AppError)
    )
)]
pub async fn top10(
    State(state): State<HttpServerState>,
) -> Result<Json<Vec<Pm25Record>>, AppError> {
    let top = state.store.read().await.top_polluted(TOP_POLLUTED_LIMIT);
    if top.is_empty() {
        return Err(AppError::not_found(anyhow!(
            "No data available to determine top polluted locations"
        )));
    }
    Ok(Json(top))
}

/// Fetch a specific data entry by ID.
#[utoipa::path(
    get,
    path = "/data/{id}",
    tag = "PM2.5",
    params(
        ("id" = i64, Path, description = "Entry identifier")
    ),
    responses(
        (status = 200, description = "The entry", body = Pm25Record),
        (status = 404, description = "Unknown id", body = AppError),
        (status = 422, description = "Non-integer id", body = AppError)
    )
)]
pub async fn get_data_by_id(
    State(state): State<HttpServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Pm25Record>, AppError> {
    let Path(id) = id.map_err(|r| unprocessable(r.body_text()))?;
    state
        .store
        .read()
        .await
        .get(id)
        .map(Json)
        .ok_or_else(entry_not_found)
}

/// Update an existing data entry.
#[utoipa::path(
    put,
    path = "/data/{id}",
    tag = "PM2.5",
    params(
        ("id" = i64, Path, description = "Entry identifier")
    ),
    request_body = NewPm25Entry,
    responses(
        (status = 200, description = "Entry updated", body = MessageResponse),
        (status = 404, description = "Unknown id", body = AppError),
        (status = 413, description = "Body larger than the configured limit", body = AppError),
        (status = 422, description = "Invalid id or entry", body = AppError)
    )
)]
pub async fn update_data(
    State(state): State<HttpServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewPm25Entry>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id.map_err(|r| unprocessable(r.body_text()))?;
    let Json(entry) = payload.map_err(invalid_body)?;

    if state.store.write().await.update(id, entry) {
        Ok(Json(MessageResponse::new("Data updated successfully")))
    } else {
        Err(entry_not_found())
    }
}

/// Delete a data entry.
#[utoipa::path(
    delete,
    path = "/data/{id}",
    tag = "PM2.5",
    params(
        ("id" = i64, Path, description = "Entry identifier")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 404, description = "Unknown id", body = AppError),
        (status = 422, description = "Non-integer id", body = AppError)
    )
)]
pub async fn delete_data(
    State(state): State<HttpServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id.map_err(|r| unprocessable(r.body_text()))?;

    if state.store.write().await.delete(id) {
        Ok(Json(MessageResponse::new("Data deleted successfully")))
    } else {
        Err(entry_not_found())
    }
}
