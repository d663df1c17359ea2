use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, gardens, owned};
use crate::entities::daily_record;
use crate::entities::prelude::*;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyRecordInput {
    pub garden_id: i32,
    #[serde(default, with = "utc::option")]
    pub created_date: Option<DateTime<Utc>>,
    pub inside_temperature: f64,
    pub outside_temperature: f64,
    pub inside_humidity: f64,
    pub outside_humidity: f64,
    pub inside_vpd: f64,
    pub outside_vpd: f64,
    pub lighting_on: f64,
    pub lighting_off: f64,
    pub lighting_intensity: i32,
    #[validate(range(min = 0.0, max = 100.0, message = "Water amount must be between 0 and 100."))]
    pub water_amount: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Nutrient amount must be between 0 and 100."))]
    pub nutrient_amount: f64,
    #[serde(default)]
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters."))]
    pub notes: String,
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: DailyRecordInput,
) -> AppResult<daily_record::Model> {
    gardens::require_owned(db, input.garden_id, user_id).await?;

    let active_model = daily_record::ActiveModel {
        garden_id: Set(input.garden_id),
        user_id: Set(user_id),
        created_date: Set(input.created_date.unwrap_or_else(Utc::now)),
        inside_temperature: Set(input.inside_temperature),
        outside_temperature: Set(input.outside_temperature),
        inside_humidity: Set(input.inside_humidity),
        outside_humidity: Set(input.outside_humidity),
        inside_vpd: Set(input.inside_vpd),
        outside_vpd: Set(input.outside_vpd),
        lighting_on: Set(input.lighting_on),
        lighting_off: Set(input.lighting_off),
        lighting_intensity: Set(input.lighting_intensity),
        water_amount: Set(input.water_amount),
        nutrient_amount: Set(input.nutrient_amount),
        notes: Set(input.notes),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<daily_record::Model>> {
    Ok(DailyRecord::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<daily_record::Model> {
    owned(get(db, id).await?, user_id, |r| r.user_id, "Daily record")
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<daily_record::Model>> {
    Ok(DailyRecord::find()
        .filter(daily_record::Column::UserId.eq(user_id))
        .order_by_desc(daily_record::Column::CreatedDate)
        .all(db)
        .await?)
}

pub async fn list_by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
) -> AppResult<Vec<daily_record::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(DailyRecord::find()
        .filter(daily_record::Column::GardenId.eq(garden_id))
        .order_by_desc(daily_record::Column::CreatedDate)
        .all(db)
        .await?)
}

/// Inclusive on both ends.
pub async fn list_by_date_range(
    db: &DatabaseConnection,
    user_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<daily_record::Model>> {
    Ok(DailyRecord::find()
        .filter(daily_record::Column::UserId.eq(user_id))
        .filter(daily_record::Column::CreatedDate.between(start, end))
        .order_by_desc(daily_record::Column::CreatedDate)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: DailyRecordInput,
) -> AppResult<Option<daily_record::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |r| r.user_id, "Daily record")?;
    if existing.garden_id != input.garden_id {
        gardens::require_owned(db, input.garden_id, user_id).await?;
    }

    let mut active_model = existing.into_active_model();
    active_model.garden_id = Set(input.garden_id);
    if let Some(created_date) = input.created_date {
        active_model.created_date = Set(created_date);
    }
    active_model.inside_temperature = Set(input.inside_temperature);
    active_model.outside_temperature = Set(input.outside_temperature);
    active_model.inside_humidity = Set(input.inside_humidity);
    active_model.outside_humidity = Set(input.outside_humidity);
    active_model.inside_vpd = Set(input.inside_vpd);
    active_model.outside_vpd = Set(input.outside_vpd);
    active_model.lighting_on = Set(input.lighting_on);
    active_model.lighting_off = Set(input.lighting_off);
    active_model.lighting_intensity = Set(input.lighting_intensity);
    active_model.water_amount = Set(input.water_amount);
    active_model.nutrient_amount = Set(input.nutrient_amount);
    active_model.notes = Set(input.notes);

    Ok(Some(active_model.update(db).await?))
}

pub async fn delete(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<bool> {
    let Some(existing) = get(db, id).await? else {
        return Ok(false);
    };
    owned(Some(existing), user_id, |r| r.user_id, "Daily record")?;
    let result = DailyRecord::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
