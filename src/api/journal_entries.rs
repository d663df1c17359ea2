use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Multipart, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::{record_action, with_image, with_images};
use crate::error::AppError;
use crate::services::journal_entries::{self, JournalEntryInput};
use crate::services::images;

const DEFAULT_RECENT_DAYS: i64 = 30;

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    garden_id: Option<i32>,
    days: Option<i64>,
}

pub async fn list_journal_entries(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Response, AppError> {
    let entries = journal_entries::list_for_user(&db, user_id).await?;
    Ok((StatusCode::OK, Json(with_images(entries))).into_response())
}

pub async fn list_garden_journal_entries(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let entries = journal_entries::list_by_garden(&db, garden_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_images(entries))).into_response())
}

/// Entries from the last `days` days (30 by default), newest first.
pub async fn journal_dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(query): Query<RecentQuery>,
) -> Result<Response, AppError> {
    let days = query.days.unwrap_or(DEFAULT_RECENT_DAYS);
    let entries = journal_entries::recent(&db, user_id, query.garden_id, days).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "days": days.max(1),
            "garden_id": query.garden_id,
            "total_entries": entries.len(),
            "entries": with_images(entries),
        })),
    )
        .into_response())
}

pub async fn create_journal_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<JournalEntryInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let entry = journal_entries::create(&db, user_id, payload).await?;

    record_action("journal_entries", "create_journal_entry", user_id);
    tracing::Span::current().record("garden_id", entry.garden_id);
    crate::metrics::increment_records_created("journal_entries");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Journal entry created successfully.", "entry": with_image(entry)})),
    )
        .into_response())
}

pub async fn get_journal_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(entry_id): Path<i32>,
) -> Result<Response, AppError> {
    let entry = journal_entries::require_owned(&db, entry_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(entry))).into_response())
}

pub async fn update_journal_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(entry_id): Path<i32>,
    Json(payload): Json<JournalEntryInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let entry = journal_entries::update(&db, entry_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Journal entry"))?;

    record_action("journal_entries", "update_journal_entry", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Journal entry updated successfully.", "entry": with_image(entry)})),
    )
        .into_response())
}

pub async fn upload_journal_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(entry_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let entry = journal_entries::set_image(&db, entry_id, user_id, image).await?;

    record_action("journal_entries", "upload_journal_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "entry": with_image(entry)})),
    )
        .into_response())
}

pub async fn delete_journal_entry(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(entry_id): Path<i32>,
) -> Result<Response, AppError> {
    if !journal_entries::delete(&db, entry_id, user_id).await? {
        return Err(AppError::NotFound("Journal entry"));
    }

    record_action("journal_entries", "delete_journal_entry", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Journal entry deleted successfully."})),
    )
        .into_response())
}
