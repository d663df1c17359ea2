use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Multipart, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::{record_action, with_image, with_images, DateRange, HasImage, WithImage};
use crate::entities::enums::PlantCareActivityType;
use crate::error::AppError;
use crate::services::dashboard::{self, MonthQuery, MonthSelection};
use crate::services::datetime::utc;
use crate::services::plant_care::{self, PlantCareInput};
use crate::services::{images, plants};

/// Filters on `GET /plant-care`. Every filter is scoped to one plant.
#[derive(Debug, Default, Deserialize)]
pub struct CareQuery {
    plant_id: Option<i32>,
    #[serde(default, with = "utc::option")]
    start: Option<DateTime<Utc>>,
    #[serde(default, with = "utc::option")]
    end: Option<DateTime<Utc>>,
    activity_type: Option<PlantCareActivityType>,
}

pub async fn list_plant_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(query): Query<CareQuery>,
) -> Result<Response, AppError> {
    let range = DateRange {
        start: query.start,
        end: query.end,
    }
    .bounds()?;

    let Some(plant_id) = query.plant_id else {
        if range.is_some() || query.activity_type.is_some() {
            return Err(AppError::InvalidInput(
                "A plant_id is required to filter care activities.".into(),
            ));
        }
        let activities = plant_care::list_for_user(&db, user_id).await?;
        return Ok((StatusCode::OK, Json(with_images(activities))).into_response());
    };

    plants::require_owned(&db, plant_id, user_id).await?;
    let activities = plant_care::list_filtered(&db, plant_id, query.activity_type, range).await?;
    Ok((StatusCode::OK, Json(with_images(activities))).into_response())
}

/// Care history of one plant with its running totals.
pub async fn plant_care_summary(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
) -> Result<Response, AppError> {
    plants::require_owned(&db, plant_id, user_id).await?;
    let activities = plant_care::list_by_plant(&db, plant_id).await?;
    let most_recent = plant_care::most_recent(&db, plant_id).await?;
    let total_count = plant_care::total_count(&db, plant_id).await?;
    let average_duration = plant_care::average_duration(&db, plant_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "activities": with_images(activities),
            "most_recent": most_recent.map(with_image),
            "total_count": total_count,
            "average_duration": average_duration,
        })),
    )
        .into_response())
}

pub async fn plant_care_dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(plant_id): Path<i32>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let plant = plants::require_owned(&db, plant_id, user_id).await?;
    let activities = plant_care::list_by_plant(&db, plant_id).await?;

    let image_url = plant.image_url();
    let selected = MonthSelection::resolve(query, Utc::now());
    let dashboard = dashboard::plant_care_dashboard(plant, &activities, selected);

    record_action("plant_care_activities", "plant_care_dashboard", user_id);
    Ok((
        StatusCode::OK,
        Json(WithImage {
            item: dashboard,
            image_url,
        }),
    )
        .into_response())
}

pub async fn create_plant_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<PlantCareInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let activity = plant_care::create(&db, user_id, payload).await?;

    record_action("plant_care_activities", "create_plant_care", user_id);
    tracing::Span::current()
        .record("plant_id", activity.plant_id)
        .record("business_event", "Plant care logged");
    crate::metrics::increment_records_created("plant_care_activities");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Care activity logged successfully.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn get_plant_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
) -> Result<Response, AppError> {
    let activity = plant_care::require_owned(&db, activity_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(activity))).into_response())
}

pub async fn update_plant_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
    Json(payload): Json<PlantCareInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let activity = plant_care::update(&db, activity_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Care activity"))?;

    record_action("plant_care_activities", "update_plant_care", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Care activity updated successfully.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn upload_plant_care_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let activity = plant_care::set_image(&db, activity_id, user_id, image).await?;

    record_action("plant_care_activities", "upload_plant_care_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn delete_plant_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
) -> Result<Response, AppError> {
    if !plant_care::delete(&db, activity_id, user_id).await? {
        return Err(AppError::NotFound("Care activity"));
    }

    record_action("plant_care_activities", "delete_plant_care", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Care activity deleted successfully."})),
    )
        .into_response())
}
