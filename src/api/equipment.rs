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
use crate::entities::enums::MaintenanceStatus;
use crate::error::AppError;
use crate::services::equipment::{self, EquipmentInput};
use crate::services::images;

#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    status: Option<MaintenanceStatus>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MaintenanceNotes {
    #[validate(length(max = 1000))]
    notes: Option<String>,
}

fn notes_of(body: Option<Json<MaintenanceNotes>>) -> Result<Option<String>, AppError> {
    let Some(Json(body)) = body else {
        return Ok(None);
    };
    body.validate()?;
    Ok(body.notes.filter(|n| !n.trim().is_empty()))
}

pub async fn list_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(filter): Query<StatusFilter>,
) -> Result<Response, AppError> {
    let items = match filter.status {
        Some(status) => equipment::list_by_status(&db, user_id, status).await?,
        None => equipment::list_for_user(&db, user_id).await?,
    };
    Ok((StatusCode::OK, Json(with_images(items))).into_response())
}

pub async fn list_garden_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
    Query(filter): Query<StatusFilter>,
) -> Result<Response, AppError> {
    let items = match filter.status {
        Some(status) => {
            equipment::list_by_garden_and_status(&db, garden_id, user_id, status).await?
        }
        None => equipment::list_by_garden(&db, garden_id, user_id).await?,
    };
    Ok((StatusCode::OK, Json(with_images(items))).into_response())
}

pub async fn create_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<EquipmentInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let item = equipment::create(&db, user_id, payload).await?;

    record_action("equipment", "create_equipment", user_id);
    tracing::Span::current()
        .record("garden_id", item.garden_id)
        .record("business_event", "Equipment added");
    crate::metrics::adjust_total("equipment", 1.0);
    crate::metrics::increment_records_created("equipment");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Equipment created successfully.", "equipment": with_image(item)})),
    )
        .into_response())
}

pub async fn get_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
) -> Result<Response, AppError> {
    let item = equipment::require_owned(&db, equipment_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(item))).into_response())
}

pub async fn update_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
    Json(payload): Json<EquipmentInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let item = equipment::update(&db, equipment_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Equipment"))?;

    record_action("equipment", "update_equipment", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Equipment updated successfully.", "equipment": with_image(item)})),
    )
        .into_response())
}

pub async fn upload_equipment_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let item = equipment::set_image(&db, equipment_id, user_id, image).await?;

    record_action("equipment", "upload_equipment_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "equipment": with_image(item)})),
    )
        .into_response())
}

pub async fn delete_equipment(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
) -> Result<Response, AppError> {
    if !equipment::delete(&db, equipment_id, user_id).await? {
        return Err(AppError::NotFound("Equipment"));
    }

    record_action("equipment", "delete_equipment", user_id);
    crate::metrics::adjust_total("equipment", -1.0);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Equipment deleted successfully."})),
    )
        .into_response())
}

pub async fn maintenance_history(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
) -> Result<Response, AppError> {
    let history = equipment::maintenance_history(&db, equipment_id, user_id).await?;
    Ok((StatusCode::OK, Json(history)).into_response())
}

pub async fn active_maintenance(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
) -> Result<Response, AppError> {
    let record = equipment::active_maintenance_record(&db, equipment_id, user_id).await?;
    Ok((StatusCode::OK, Json(json!({ "record": record }))).into_response())
}

pub async fn request_maintenance(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
    body: Option<Json<MaintenanceNotes>>,
) -> Result<Response, AppError> {
    let notes = notes_of(body)?;
    let record = equipment::request_maintenance(&db, equipment_id, user_id, notes).await?;

    record_action("maintenance_records", "request_maintenance", user_id);
    tracing::Span::current().record("business_event", "Maintenance requested");
    crate::metrics::increment_maintenance_transition("requested");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Maintenance has been requested.", "record": record})),
    )
        .into_response())
}

pub async fn start_maintenance(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
) -> Result<Response, AppError> {
    let record = equipment::start_maintenance(&db, equipment_id, user_id).await?;

    record_action("maintenance_records", "start_maintenance", user_id);
    tracing::Span::current().record("business_event", "Maintenance started");
    crate::metrics::increment_maintenance_transition("started");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Maintenance has been started.", "record": record})),
    )
        .into_response())
}

pub async fn complete_maintenance(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(equipment_id): Path<i32>,
    body: Option<Json<MaintenanceNotes>>,
) -> Result<Response, AppError> {
    let notes = notes_of(body)?;
    let record = equipment::complete_maintenance(&db, equipment_id, user_id, notes).await?;

    record_action("maintenance_records", "complete_maintenance", user_id);
    tracing::Span::current().record("business_event", "Maintenance completed");
    crate::metrics::increment_maintenance_transition("completed");

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Maintenance completed. The equipment is operational again.",
            "record": record,
        })),
    )
        .into_response())
}
