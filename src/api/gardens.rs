use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Multipart, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;
use validator::Validate;

use super::{record_action, with_image, with_images, HasImage, WithImage};
use crate::error::AppError;
use crate::services::dashboard::{self, MonthQuery, MonthSelection};
use crate::services::{daily_records, equipment, gardens, images};
use crate::services::gardens::GardenInput;

pub async fn list_gardens(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Response, AppError> {
    let gardens = gardens::list_for_user(&db, user_id).await?;
    Ok((StatusCode::OK, Json(with_images(gardens))).into_response())
}

pub async fn create_garden(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<GardenInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let garden = gardens::create(&db, user_id, payload).await?;

    record_action("gardens", "create_garden", user_id);
    tracing::Span::current()
        .record("garden_id", garden.id)
        .record("business_event", "Garden created");
    crate::metrics::adjust_total("gardens", 1.0);
    crate::metrics::increment_records_created("gardens");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Garden created successfully.", "garden": with_image(garden)})),
    )
        .into_response())
}

pub async fn get_garden(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let garden = gardens::require_owned(&db, garden_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(garden))).into_response())
}

pub async fn garden_details(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let details = gardens::get_with_details(&db, garden_id, user_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "garden": with_image(details.garden),
            "daily_records": details.daily_records,
            "journal_entries": with_images(details.journal_entries),
            "equipment": with_images(details.equipment),
            "plants": with_images(details.plants),
        })),
    )
        .into_response())
}

pub async fn garden_dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let garden = gardens::require_owned(&db, garden_id, user_id).await?;
    let records = daily_records::list_by_garden(&db, garden_id, user_id).await?;
    let equipment = equipment::list_by_garden(&db, garden_id, user_id).await?;

    let image_url = garden.image_url();
    let selected = MonthSelection::resolve(query, Utc::now());
    let dashboard = dashboard::garden_dashboard(garden, &records, &equipment, selected);

    record_action("gardens", "garden_dashboard", user_id);
    Ok((
        StatusCode::OK,
        Json(WithImage {
            item: dashboard,
            image_url,
        }),
    )
        .into_response())
}

pub async fn update_garden(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
    Json(payload): Json<GardenInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let garden = gardens::update(&db, garden_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Garden"))?;

    record_action("gardens", "update_garden", user_id);
    tracing::Span::current().record("garden_id", garden.id);

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Garden updated successfully.", "garden": with_image(garden)})),
    )
        .into_response())
}

pub async fn upload_garden_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let garden = gardens::set_image(&db, garden_id, user_id, image).await?;

    record_action("gardens", "upload_garden_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "garden": with_image(garden)})),
    )
        .into_response())
}

pub async fn delete_garden(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    if !gardens::delete(&db, garden_id, user_id).await? {
        return Err(AppError::NotFound("Garden"));
    }

    record_action("gardens", "delete_garden", user_id);
    tracing::Span::current()
        .record("garden_id", garden_id)
        .record("business_event", "Garden deleted");
    crate::metrics::adjust_total("gardens", -1.0);

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Garden deleted successfully."})),
    )
        .into_response())
}
