use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, gardens, images::UploadedImage, owned};
use crate::entities::enums::{
    CareActivityType, EquipmentInspectionStatus, GardenStatus, PlantInspectionStatus,
};
use crate::entities::garden_care_activity;
use crate::entities::prelude::*;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GardenCareInput {
    pub garden_id: i32,
    #[serde(default, with = "utc::option")]
    pub activity_date: Option<DateTime<Utc>>,
    pub activity_type: CareActivityType,
    #[serde(default)]
    pub plant_inspection_status: Option<PlantInspectionStatus>,
    #[serde(default)]
    pub equipment_inspection_status: Option<EquipmentInspectionStatus>,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub watering_performed: bool,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub water_amount_added: Option<f64>,
    #[serde(default)]
    pub nutrients_added: bool,
    #[validate(length(max = 200))]
    pub nutrient_type: Option<String>,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub nutrient_amount: Option<f64>,
    #[serde(default)]
    pub new_plantings_added: bool,
    #[validate(range(min = 0, max = 1000))]
    pub number_of_plants_added: Option<i32>,
    #[validate(length(max = 500))]
    pub plant_types_added: Option<String>,
    #[serde(default)]
    pub weeding_performed: bool,
    #[validate(range(min = 0, max = 480))]
    pub weeding_duration: Option<i32>,
    #[serde(default)]
    pub pruning_performed: bool,
    #[validate(length(max = 500))]
    pub pruning_notes: Option<String>,
    #[serde(default)]
    pub pest_control_performed: bool,
    #[validate(length(max = 500))]
    pub pest_control_details: Option<String>,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph_level: Option<f64>,
    #[validate(range(min = 0.0, max = 5000.0))]
    pub ec_level: Option<f64>,
    #[serde(default)]
    pub garden_status: Option<GardenStatus>,
    #[validate(range(min = 0, max = 960))]
    pub activity_duration: Option<i32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl GardenCareInput {
    fn apply(self, model: &mut garden_care_activity::ActiveModel) {
        model.garden_id = Set(self.garden_id);
        if let Some(activity_date) = self.activity_date {
            model.activity_date = Set(activity_date);
        }
        model.activity_type = Set(self.activity_type);
        model.plant_inspection_status = Set(self.plant_inspection_status);
        model.equipment_inspection_status = Set(self.equipment_inspection_status);
        model.water_level = Set(self.water_level);
        model.watering_performed = Set(self.watering_performed);
        model.water_amount_added = Set(self.water_amount_added);
        model.nutrients_added = Set(self.nutrients_added);
        model.nutrient_type = Set(self.nutrient_type);
        model.nutrient_amount = Set(self.nutrient_amount);
        model.new_plantings_added = Set(self.new_plantings_added);
        model.number_of_plants_added = Set(self.number_of_plants_added);
        model.plant_types_added = Set(self.plant_types_added);
        model.weeding_performed = Set(self.weeding_performed);
        model.weeding_duration = Set(self.weeding_duration);
        model.pruning_performed = Set(self.pruning_performed);
        model.pruning_notes = Set(self.pruning_notes);
        model.pest_control_performed = Set(self.pest_control_performed);
        model.pest_control_details = Set(self.pest_control_details);
        model.ph_level = Set(self.ph_level);
        model.ec_level = Set(self.ec_level);
        model.garden_status = Set(self.garden_status);
        model.activity_duration = Set(self.activity_duration);
        model.notes = Set(self.notes);
    }
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: GardenCareInput,
) -> AppResult<garden_care_activity::Model> {
    gardens::require_owned(db, input.garden_id, user_id).await?;

    let mut active_model = garden_care_activity::ActiveModel {
        user_id: Set(user_id),
        activity_date: Set(Utc::now()),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    input.apply(&mut active_model);
    Ok(active_model.insert(db).await?)
}

pub async fn get(
    db: &DatabaseConnection,
    id: i32,
) -> AppResult<Option<garden_care_activity::Model>> {
    Ok(GardenCareActivity::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<garden_care_activity::Model> {
    owned(get(db, id).await?, user_id, |a| a.user_id, "Care activity")
}

pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> AppResult<Vec<garden_care_activity::Model>> {
    Ok(GardenCareActivity::find()
        .filter(garden_care_activity::Column::UserId.eq(user_id))
        .order_by_desc(garden_care_activity::Column::ActivityDate)
        .all(db)
        .await?)
}

pub async fn list_by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
) -> AppResult<Vec<garden_care_activity::Model>> {
    Ok(GardenCareActivity::find()
        .filter(garden_care_activity::Column::GardenId.eq(garden_id))
        .order_by_desc(garden_care_activity::Column::ActivityDate)
        .all(db)
        .await?)
}

/// One garden's activities narrowed by any mix of type and date range, newest first.
fn filtered_query(
    garden_id: i32,
    activity_type: Option<CareActivityType>,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Select<GardenCareActivity> {
    let mut query = GardenCareActivity::find().filter(garden_care_activity::Column::GardenId.eq(garden_id));
    if let Some(activity_type) = activity_type {
        query = query.filter(garden_care_activity::Column::ActivityType.eq(activity_type));
    }
    if let Some((start, end)) = range {
        query = query.filter(garden_care_activity::Column::ActivityDate.between(start, end));
    }
    query.order_by_desc(garden_care_activity::Column::ActivityDate)
}

pub async fn list_filtered(
    db: &DatabaseConnection,
    garden_id: i32,
    activity_type: Option<CareActivityType>,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<garden_care_activity::Model>> {
    Ok(filtered_query(garden_id, activity_type, range).all(db).await?)
}

pub async fn list_by_date_range(
    db: &DatabaseConnection,
    garden_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<garden_care_activity::Model>> {
    list_filtered(db, garden_id, None, Some((start, end))).await
}

pub async fn list_by_type(
    db: &DatabaseConnection,
    garden_id: i32,
    activity_type: CareActivityType,
) -> AppResult<Vec<garden_care_activity::Model>> {
    list_filtered(db, garden_id, Some(activity_type), None).await
}

pub async fn most_recent(
    db: &DatabaseConnection,
    garden_id: i32,
) -> AppResult<Option<garden_care_activity::Model>> {
    Ok(GardenCareActivity::find()
        .filter(garden_care_activity::Column::GardenId.eq(garden_id))
        .order_by_desc(garden_care_activity::Column::ActivityDate)
        .one(db)
        .await?)
}

pub async fn total_count(db: &DatabaseConnection, garden_id: i32) -> AppResult<u64> {
    Ok(GardenCareActivity::find()
        .filter(garden_care_activity::Column::GardenId.eq(garden_id))
        .count(db)
        .await?)
}

/// Mean of the recorded durations in minutes; 0 when nothing was timed.
pub async fn average_duration(db: &DatabaseConnection, garden_id: i32) -> AppResult<f64> {
    let timed = GardenCareActivity::find()
        .filter(garden_care_activity::Column::GardenId.eq(garden_id))
        .filter(garden_care_activity::Column::ActivityDuration.is_not_null())
        .all(db)
        .await?;
    Ok(mean_duration(timed.iter().filter_map(|a| a.activity_duration)))
}

pub(crate) fn mean_duration(durations: impl Iterator<Item = i32>) -> f64 {
    let (sum, count) = durations.fold((0i64, 0u32), |(sum, n), d| (sum + d as i64, n + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: GardenCareInput,
) -> AppResult<Option<garden_care_activity::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |a| a.user_id, "Care activity")?;
    if existing.garden_id != input.garden_id {
        gardens::require_owned(db, input.garden_id, user_id).await?;
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
) -> AppResult<garden_care_activity::Model> {
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
    owned(Some(existing), user_id, |a| a.user_id, "Care activity")?;
    let result = GardenCareActivity::delete_by_id(id).exec(db).await?;
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
        activity_type: CareActivityType,
    ) -> garden_care_activity::Model {
        garden_care_activity::Model {
            id,
            garden_id: 1,
            user_id: 5,
            activity_date: at,
            activity_type,
            plant_inspection_status: None,
            equipment_inspection_status: None,
            water_level: None,
            watering_performed: false,
            water_amount_added: None,
            nutrients_added: false,
            nutrient_type: None,
            nutrient_amount: None,
            new_plantings_added: false,
            number_of_plants_added: None,
            plant_types_added: None,
            weeding_performed: false,
            weeding_duration: None,
            pruning_performed: false,
            pruning_notes: None,
            pest_control_performed: false,
            pest_control_details: None,
            ph_level: None,
            ec_level: None,
            garden_status: None,
            activity_duration: None,
            notes: None,
            image_data: None,
            image_type: None,
        }
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean_duration(std::iter::empty()), 0.0);
        assert_eq!(mean_duration([30, 45, 60].into_iter()), 45.0);
    }

    #[tokio::test]
    async fn average_ignores_untimed_activities() {
        let mut timed = sample(1, Utc::now(), CareActivityType::Weeding);
        timed.activity_duration = Some(40);
        let mut longer = sample(2, Utc::now(), CareActivityType::Pruning);
        longer.activity_duration = Some(20);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![timed, longer]])
            .into_connection();

        assert_eq!(average_duration(&db, 1).await.unwrap(), 30.0);
    }

    #[test]
    fn ph_must_be_on_the_scale() {
        let input: GardenCareInput = serde_json::from_value(serde_json::json!({
            "garden_id": 1,
            "activity_type": "PhEcAdjustment",
            "ph_level": 15.2
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ph_level"));
    }

    #[test]
    fn type_and_date_filters_combine() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        let sql = filtered_query(3, Some(CareActivityType::VisualInspection), Some((start, end)))
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""activity_type" = "#));
        assert!(sql.contains("BETWEEN"));
        assert!(sql.contains(r#""garden_id" = 3"#));

        let plain = filtered_query(3, None, None)
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(!plain.contains("BETWEEN"));
        assert!(!plain.contains(r#""activity_type" = "#));
    }
}
