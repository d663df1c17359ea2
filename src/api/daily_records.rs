use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use validator::Validate;

use super::{record_action, DateRange};
use crate::error::AppError;
use crate::services::daily_records::{self, DailyRecordInput};

pub async fn list_daily_records(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(range): Query<DateRange>,
) -> Result<Response, AppError> {
    let records = match range.bounds()? {
        Some((start, end)) => daily_records::list_by_date_range(&db, user_id, start, end).await?,
        None => daily_records::list_for_user(&db, user_id).await?,
    };
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub async fn list_garden_daily_records(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let records = daily_records::list_by_garden(&db, garden_id, user_id).await?;
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub async fn create_daily_record(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<DailyRecordInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let record = daily_records::create(&db, user_id, payload).await?;

    record_action("daily_records", "create_daily_record", user_id);
    tracing::Span::current()
        .record("garden_id", record.garden_id)
        .record("business_event", "Daily conditions logged");
    crate::metrics::increment_records_created("daily_records");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Daily record created successfully.", "record": record})),
    )
        .into_response())
}

pub async fn get_daily_record(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(record_id): Path<i32>,
) -> Result<Response, AppError> {
    let record = daily_records::require_owned(&db, record_id, user_id).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn update_daily_record(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(record_id): Path<i32>,
    Json(payload): Json<DailyRecordInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let record = daily_records::update(&db, record_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Daily record"))?;

    record_action("daily_records", "update_daily_record", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Daily record updated successfully.", "record": record})),
    )
        .into_response())
}

pub async fn delete_daily_record(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(record_id): Path<i32>,
) -> Result<Response, AppError> {
    if !daily_records::delete(&db, record_id, user_id).await? {
        return Err(AppError::NotFound("Daily record"));
    }

    record_action("daily_records", "delete_daily_record", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Daily record deleted successfully."})),
    )
        .into_response())
}
