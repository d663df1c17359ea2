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
use crate::entities::enums::CareActivityType;
use crate::error::AppError;
use crate::services::dashboard::{self, MonthQuery, MonthSelection};
use crate::services::datetime::utc;
use crate::services::garden_care::{self, GardenCareInput};
use crate::services::{gardens, images};

/// Filters on `GET /garden-care`. Every filter is scoped to one garden.
#[derive(Debug, Default, Deserialize)]
pub struct CareQuery {
    garden_id: Option<i32>,
    #[serde(default, with = "utc::option")]
    start: Option<DateTime<Utc>>,
    #[serde(default, with = "utc::option")]
    end: Option<DateTime<Utc>>,
    activity_type: Option<CareActivityType>,
}

pub async fn list_garden_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(query): Query<CareQuery>,
) -> Result<Response, AppError> {
    let range = DateRange {
        start: query.start,
        end: query.end,
    }
    .bounds()?;

    let Some(garden_id) = query.garden_id else {
        if range.is_some() || query.activity_type.is_some() {
            return Err(AppError::InvalidInput(
                "A garden_id is required to filter care activities.".into(),
            ));
        }
        let activities = garden_care::list_for_user(&db, user_id).await?;
        return Ok((StatusCode::OK, Json(with_images(activities))).into_response());
    };

    gardens::require_owned(&db, garden_id, user_id).await?;
    let activities = garden_care::list_filtered(&db, garden_id, query.activity_type, range).await?;
    Ok((StatusCode::OK, Json(with_images(activities))).into_response())
}

/// Care history of one garden with its running totals.
pub async fn garden_care_summary(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    gardens::require_owned(&db, garden_id, user_id).await?;
    let activities = garden_care::list_by_garden(&db, garden_id).await?;
    let most_recent = garden_care::most_recent(&db, garden_id).await?;
    let total_count = garden_care::total_count(&db, garden_id).await?;
    let average_duration = garden_care::average_duration(&db, garden_id).await?;

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

pub async fn garden_care_dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let garden = gardens::require_owned(&db, garden_id, user_id).await?;
    let activities = garden_care::list_by_garden(&db, garden_id).await?;

    let image_url = garden.image_url();
    let selected = MonthSelection::resolve(query, Utc::now());
    let dashboard = dashboard::garden_care_dashboard(garden, &activities, selected);

    record_action("garden_care_activities", "garden_care_dashboard", user_id);
    Ok((
        StatusCode::OK,
        Json(WithImage {
            item: dashboard,
            image_url,
        }),
    )
        .into_response())
}

pub async fn create_garden_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<GardenCareInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let activity = garden_care::create(&db, user_id, payload).await?;

    record_action("garden_care_activities", "create_garden_care", user_id);
    tracing::Span::current()
        .record("garden_id", activity.garden_id)
        .record("business_event", "Garden care logged");
    crate::metrics::increment_records_created("garden_care_activities");

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Care activity logged successfully.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn get_garden_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
) -> Result<Response, AppError> {
    let activity = garden_care::require_owned(&db, activity_id, user_id).await?;
    Ok((StatusCode::OK, Json(with_image(activity))).into_response())
}

pub async fn update_garden_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
    Json(payload): Json<GardenCareInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let activity = garden_care::update(&db, activity_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Care activity"))?;

    record_action("garden_care_activities", "update_garden_care", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Care activity updated successfully.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn upload_garden_care_image(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let image = images::file_to_bytes(multipart).await?;
    let activity = garden_care::set_image(&db, activity_id, user_id, image).await?;

    record_action("garden_care_activities", "upload_garden_care_image", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Image uploaded.", "activity": with_image(activity)})),
    )
        .into_response())
}

pub async fn delete_garden_care(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(activity_id): Path<i32>,
) -> Result<Response, AppError> {
    if !garden_care::delete(&db, activity_id, user_id).await? {
        return Err(AppError::NotFound("Care activity"));
    }

    record_action("garden_care_activities", "delete_garden_care", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Care activity deleted successfully."})),
    )
        .into_response())
}
