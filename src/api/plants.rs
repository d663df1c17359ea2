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
use crate::services::plants::PlantInput;
use crate::services::{images, plants};

#[derive(Debug, Default, Deserialize)]
pub struct PlantSearch {
    #[serde(default)]
    search: String,
}

pub async fn list_plants(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(query): Query<PlantSearch>,
) -> Result<Response, AppError> {
    let plants = plants::search(&db, user_id, &query.search).await?;
    Ok((StatusCode::OK, Json(with_images(plants))).into_response())
}

pub async fn list_garden_plants(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let plants = plants::list_by_garden(&db, garden_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_images(plants))).into_response())
}

pub async fn create_plant(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<PlantInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let plant = plants::create(&db, user_id, payload).await?;

    record_action("plants", "create_plant", user_id);
    tracing::Span::current()
        .record("garden_id", plant.garden_id)
        .record("business_event", "Plant added");
    crate::metrics::adjust_total("plants", 1.0);
    crate::metrics::increment_records_created("plants");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Plant created successfully.", "plant": with_image(plant)})),
    )
        .into_response())
}

pub async fn get_plant(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
) -> Result<Response, AppError> {
    let plant = plants::require_owned(&db, plant_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(plant))).into_response())
}

pub async fn update_plant(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
    Json(payload): Json<PlantInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let plant = plants::update(&db, plant_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Plant"))?;

    record_action("plants", "update_plant", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Plant updated successfully.", "plant": with_image(plant)})),
    )
        .into_response())
}

pub async fn upload_plant_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let plant = plants::set_image(&db, plant_id, user_id, image).await?;

    record_action("plants", "upload_plant_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "plant": with_image(plant)})),
    )
        .into_response())
}

pub async fn delete_plant(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
) -> Result<Response, AppError> {
    if !plants::delete(&db, plant_id, user_id).await? {
        return Err(AppError::NotFound("Plant"));
    }

    record_action("plants", "delete_plant", user_id);
    crate::metrics::adjust_total("plants", -1.0);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Plant deleted successfully."})),
    )
        .into_response())
}
