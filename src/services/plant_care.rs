use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, garden_care::mean_duration, images::UploadedImage, owned, plants};
use crate::entities::enums::{
    HarvestQuality, LightIntensity, LightSource, MoistureLevel, PlantCareActivityType,
    PlantHealthStatus,
};
use crate::entities::plant_care_activity;
use crate::entities::prelude::*;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlantCareInput {
    pub plant_id: i32,
    #[serde(default, with = "utc::option")]
    pub activity_date: Option<DateTime<Utc>>,
    pub activity_type: PlantCareActivityType,
    #[validate(range(min = 0.0, max = 100.0))]
    pub planting_depth: Option<f64>,
    #[validate(length(max = 100))]
    pub planting_method: Option<String>,
    #[validate(length(max = 200))]
    pub growing_medium: Option<String>,
    #[serde(default)]
    pub watering_performed: bool,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub water_amount: Option<f64>,
    #[serde(default)]
    pub moisture_level: Option<MoistureLevel>,
    #[serde(default)]
    pub fertilizer_applied: bool,
    #[validate(length(max = 200))]
    pub fertilizer_type: Option<String>,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub fertilizer_amount: Option<f64>,
    #[validate(length(max = 50))]
    pub npk_ratio: Option<String>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub light_hours: Option<f64>,
    #[serde(default)]
    pub light_source: Option<LightSource>,
    #[serde(default)]
    pub light_intensity: Option<LightIntensity>,
    #[serde(default)]
    pub pruning_performed: bool,
    #[validate(length(max = 500))]
    pub pruning_details: Option<String>,
    #[serde(default)]
    pub support_added: bool,
    #[validate(length(max = 300))]
    pub support_details: Option<String>,
    #[serde(default)]
    pub pest_control_performed: bool,
    #[validate(length(max = 300))]
    pub pest_disease_identified: Option<String>,
    #[validate(length(max = 500))]
    pub treatment_applied: Option<String>,
    #[validate(range(min = -50.0, max = 150.0))]
    pub temperature: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph_level: Option<f64>,
    #[serde(default)]
    pub plant_health_status: Option<PlantHealthStatus>,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub plant_height: Option<f64>,
    #[validate(range(min = 0, max = 10000))]
    pub leaf_count: Option<i32>,
    #[serde(default)]
    pub is_flowering_fruiting: bool,
    #[validate(length(max = 300))]
    pub flowering_fruiting_details: Option<String>,
    #[serde(default)]
    pub harvest_performed: bool,
    #[validate(length(max = 100))]
    pub harvest_amount: Option<String>,
    #[serde(default)]
    pub harvest_quality: Option<HarvestQuality>,
    #[serde(default)]
    pub plant_removed: bool,
    #[validate(length(max = 500))]
    pub removal_reason: Option<String>,
    #[validate(range(min = 0, max = 960))]
    pub activity_duration: Option<i32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl PlantCareInput {
    fn apply(self, model: &mut plant_care_activity::ActiveModel) {
        model.plant_id = Set(self.plant_id);
        if let Some(activity_date) = self.activity_date {
            model.activity_date = Set(activity_date);
        }
        model.activity_type = Set(self.activity_type);
        model.planting_depth = Set(self.planting_depth);
        model.planting_method = Set(self.planting_method);
        model.growing_medium = Set(self.growing_medium);
        model.watering_performed = Set(self.watering_performed);
        model.water_amount = Set(self.water_amount);
        model.moisture_level = Set(self.moisture_level);
        model.fertilizer_applied = Set(self.fertilizer_applied);
        model.fertilizer_type = Set(self.fertilizer_type);
        model.fertilizer_amount = Set(self.fertilizer_amount);
        model.npk_ratio = Set(self.npk_ratio);
        model.light_hours = Set(self.light_hours);
        model.light_source = Set(self.light_source);
        model.light_intensity = Set(self.light_intensity);
        model.pruning_performed = Set(self.pruning_performed);
        model.pruning_details = Set(self.pruning_details);
        model.support_added = Set(self.support_added);
        model.support_details = Set(self.support_details);
        model.pest_control_performed = Set(self.pest_control_performed);
        model.pest_disease_identified = Set(self.pest_disease_identified);
        model.treatment_applied = Set(self.treatment_applied);
        model.temperature = Set(self.temperature);
        model.humidity = Set(self.humidity);
        model.ph_level = Set(self.ph_level);
        model.plant_health_status = Set(self.plant_health_status);
        model.plant_height = Set(self.plant_height);
        model.leaf_count = Set(self.leaf_count);
        model.is_flowering_fruiting = Set(self.is_flowering_fruiting);
        model.flowering_fruiting_details = Set(self.flowering_fruiting_details);
        model.harvest_performed = Set(self.harvest_performed);
        model.harvest_amount = Set(self.harvest_amount);
        model.harvest_quality = Set(self.harvest_quality);
        model.plant_removed = Set(self.plant_removed);
        model.removal_reason = Set(self.removal_reason);
        model.activity_duration = Set(self.activity_duration);
        model.notes = Set(self.notes);
    }
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: PlantCareInput,
) -> AppResult<plant_care_activity::Model> {
    plants::require_owned(db, input.plant_id, user_id).await?;

    let mut active_model = plant_care_activity::ActiveModel {
        user_id: Set(user_id),
        activity_date: Set(Utc::now()),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    input.apply(&mut active_model);
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<plant_care_activity::Model>> {
    Ok(PlantCareActivity::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<plant_care_activity::Model> {
    owned(get(db, id).await?, user_id, |a| a.user_id, "Plant care activity")
}

pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> AppResult<Vec<plant_care_activity::Model>> {
    Ok(PlantCareActivity::find()
        .filter(plant_care_activity::Column::UserId.eq(user_id))
        .order_by_desc(plant_care_activity::Column::ActivityDate)
        .all(db)
        .await?)
}

pub async fn list_by_plant(
    db: &DatabaseConnection,
    plant_id: i32,
) -> AppResult<Vec<plant_care_activity::Model>> {
    Ok(PlantCareActivity::find()
        .filter(plant_care_activity::Column::PlantId.eq(plant_id))
        .order_by_desc(plant_care_activity::Column::ActivityDate)
        .all(db)
        .await?)
}

/// One plant's activities narrowed by any mix of type and date range, newest first.
fn filtered_query(
    plant_id: i32,
    activity_type: Option<PlantCareActivityType>,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Select<PlantCareActivity> {
    let mut query = PlantCareActivity::find().filter(plant_care_activity::Column::PlantId.eq(plant_id));
    if let Some(activity_type) = activity_type {
        query = query.filter(plant_care_activity::Column::ActivityType.eq(activity_type));
    }
    if let Some((start, end)) = range {
        query = query.filter(plant_care_activity::Column::ActivityDate.between(start, end));
    }
    query.order_by_desc(plant_care_activity::Column::ActivityDate)
}

pub async fn list_filtered(
    db: &DatabaseConnection,
    plant_id: i32,
    activity_type: Option<PlantCareActivityType>,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<plant_care_activity::Model>> {
    Ok(filtered_query(plant_id, activity_type, range).all(db).await?)
}

pub async fn list_by_date_range(
    db: &DatabaseConnection,
    plant_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<plant_care_activity::Model>> {
    list_filtered(db, plant_id, None, Some((start, end))).await
}

pub async fn list_by_type(
    db: &DatabaseConnection,
    plant_id: i32,
    activity_type: PlantCareActivityType,
) -> AppResult<Vec<plant_care_activity::Model>> {
    list_filtered(db, plant_id, Some(activity_type), None).await
}

pub async fn most_recent(
    db: &DatabaseConnection,
    plant_id: i32,
) -> AppResult<Option<plant_care_activity::Model>> {
    Ok(PlantCareActivity::find()
        .filter(plant_care_activity::Column::PlantId.eq(plant_id))
        .order_by_desc(plant_care_activity::Column::ActivityDate)
        .one(db)
        .await?)
}

pub async fn total_count(db: &DatabaseConnection, plant_id: i32) -> AppResult<u64> {
    Ok(PlantCareActivity::find()
        .filter(plant_care_activity::Column::PlantId.eq(plant_id))
        .count(db)
        .await?)
}

pub async fn average_duration(db: &DatabaseConnection, plant_id: i32) -> AppResult<f64> {
    let timed = PlantCareActivity::find()
        .filter(plant_care_activity::Column::PlantId.eq(plant_id))
        .filter(plant_care_activity::Column::ActivityDuration.is_not_null())
        .all(db)
        .await?;
    Ok(mean_duration(timed.iter().filter_map(|a| a.activity_duration)))
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: PlantCareInput,
) -> AppResult<Option<plant_care_activity::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |a| a.user_id, "Plant care activity")?;
    if existing.plant_id != input.plant_id {
        plants::require_owned(db, input.plant_id, user_id).await?;
    }

    let mut active_model = existing.into_active_model();
    input.apply(&mut active_model);
    Ok(Some(active_model.update(db).await?))
}

pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    image: UploadedImage,
) -> AppResult<plant_care_activity::Model> {
    let existing = require_owned(db, id, user_id).await?;
    let mut active_model = existing.into_active_model();
    active_model.image_data = Set(Some(image.data));
    active_model.image_type = Set(Some(image.content_type));
    Ok(active_model.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<bool> {
    let Some(existing) = get(db, id).await? else {
        return Ok(false);
    };
    owned(Some(existing), user_id, |a| a.user_id, "Plant care activity")?;
    let result = PlantCareActivity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

    pub(crate) fn sample(
        id: i32,
        at: DateTime<Utc>,
        activity_type: PlantCareActivityType,
    ) -> plant_care_activity::Model {
        plant_care_activity::Model {
            id,
            plant_id: 1,
            user_id: 5,
            activity_date: at,
            activity_type,
            planting_depth: None,
            planting_method: None,
            growing_medium: None,
            watering_performed: false,
            water_amount: None,
            moisture_level: None,
            fertilizer_applied: false,
            fertilizer_type: None,
            fertilizer_amount: None,
            npk_ratio: None,
            light_hours: None,
            light_source: None,
            light_intensity: None,
            pruning_performed: false,
            pruning_details: None,
            support_added: false,
            support_details: None,
            pest_control_performed: false,
            pest_disease_identified: None,
            treatment_applied: None,
            temperature: None,
            humidity: None,
            ph_level: None,
            plant_health_status: None,
            plant_height: None,
            leaf_count: None,
            is_flowering_fruiting: false,
            flowering_fruiting_details: None,
            harvest_performed: false,
            harvest_amount: None,
            harvest_quality: None,
            plant_removed: false,
            removal_reason: None,
            activity_duration: None,
            notes: None,
            image_data: None,
            image_type: None,
        }
    }

    #[tokio::test]
    async fn deleting_missing_activity_is_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<plant_care_activity::Model>::new()])
            .into_connection();
        assert!(!delete(&db, 3, 5).await.unwrap());
    }

    #[test]
    fn temperature_range_allows_freezing() {
        let input: PlantCareInput = serde_json::from_value(serde_json::json!({
            "plant_id": 1,
            "activity_type": "EnvironmentalCheck",
            "temperature": -5.0,
            "light_hours": 25.0
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("light_hours"));
        assert!(!fields.contains_key("temperature"));
    }

    #[test]
    fn type_and_date_filters_combine() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        let sql = filtered_query(3, Some(PlantCareActivityType::InitialPlanting), Some((start, end)))
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""activity_type" = "#));
        assert!(sql.contains("BETWEEN"));
        assert!(sql.contains(r#""plant_id" = 3"#));

        let plain = filtered_query(3, None, None)
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(!plain.contains("BETWEEN"));
        assert!(!plain.contains(r#""activity_type" = "#));
    }
}
