use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, gardens, images::UploadedImage, owned};
use crate::entities::enums::{GrowMethod, LightingRequirement, PlantCondition, PlantType};
use crate::entities::plant;
use crate::entities::prelude::*;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlantInput {
    pub garden_id: i32,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters."))]
    pub name: String,
    #[validate(length(min = 2, max = 500, message = "Description must be between 2 and 500 characters."))]
    pub description: String,
    pub plant_type: PlantType,
    pub lighting_requirement: LightingRequirement,
    pub grow_method: GrowMethod,
    #[serde(with = "utc")]
    pub date_planted: DateTime<Utc>,
    #[serde(default)]
    pub condition: Option<PlantCondition>,
}

pub async fn create(db: &DatabaseConnection, user_id: i32, input: PlantInput) -> AppResult<plant::Model> {
    gardens::require_owned(db, input.garden_id, user_id).await?;

    let active_model = plant::ActiveModel {
        garden_id: Set(input.garden_id),
        user_id: Set(user_id),
        name: Set(input.name),
        description: Set(input.description),
        plant_type: Set(input.plant_type),
        lighting_requirement: Set(input.lighting_requirement),
        grow_method: Set(input.grow_method),
        date_planted: Set(input.date_planted),
        condition: Set(input.condition),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<plant::Model>> {
    Ok(Plant::find_by_id(id).one(db).await?)
}

pub async fn require_owned(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<plant::Model> {
    owned(get(db, id).await?, user_id, |p| p.user_id, "Plant")
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<plant::Model>> {
    Ok(Plant::find()
        .filter(plant::Column::UserId.eq(user_id))
        .order_by_asc(plant::Column::Name)
        .all(db)
        .await?)
}

pub async fn list_by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
) -> AppResult<Vec<plant::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(Plant::find()
        .filter(plant::Column::GardenId.eq(garden_id))
        .order_by_asc(plant::Column::Name)
        .all(db)
        .await?)
}

/// Name or description contains `term`. A blank term lists everything.
pub async fn search(db: &DatabaseConnection, user_id: i32, term: &str) -> AppResult<Vec<plant::Model>> {
    let term = term.trim();
    if term.is_empty() {
        return list_for_user(db, user_id).await;
    }
    Ok(Plant::find()
        .filter(plant::Column::UserId.eq(user_id))
        .filter(
            Condition::any()
                .add(plant::Column::Name.contains(term))
                .add(plant::Column::Description.contains(term)),
        )
        .order_by_asc(plant::Column::Name)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: PlantInput,
) -> AppResult<Option<plant::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |p| p.user_id, "Plant")?;
    if existing.garden_id != input.garden_id {
        gardens::require_owned(db, input.garden_id, user_id).await?;
    }

    let mut active_model = existing.into_active_model();
    active_model.garden_id = Set(input.garden_id);
    active_model.name = Set(input.name);
    active_model.description = Set(input.description);
    active_model.plant_type = Set(input.plant_type);
    active_model.lighting_requirement = Set(input.lighting_requirement);
    active_model.grow_method = Set(input.grow_method);
    active_model.date_planted = Set(input.date_planted);
    active_model.condition = Set(input.condition);

    Ok(Some(active_model.update(db).await?))
}

pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    image: UploadedImage,
) -> AppResult<plant::Model> {
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
    owned(Some(existing), user_id, |p| p.user_id, "Plant")?;
    let result = Plant::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::gardens::tests::sample as sample_garden;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    pub(crate) fn sample(id: i32, garden_id: i32, user_id: i32) -> plant::Model {
        plant::Model {
            id,
            garden_id,
            user_id,
            name: "Roma tomato".into(),
            description: "Paste tomato".into(),
            plant_type: PlantType::Vegetable,
            lighting_requirement: LightingRequirement::FullSun,
            grow_method: GrowMethod::Soil,
            date_planted: Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap(),
            condition: Some(PlantCondition::Healthy),
            image_data: Some(vec![1, 2, 3]),
            image_type: Some("image/png".into()),
        }
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, 1, 5), sample(2, 1, 5)]])
            .into_connection();

        let found = search(&db, 5, "   ").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn update_keeps_the_stored_image() {
        let mut updated = sample(1, 1, 5);
        updated.name = "San Marzano".into();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, 1, 5)]])
            .append_query_results([vec![updated.clone()]])
            .into_connection();

        let input = PlantInput {
            garden_id: 1,
            name: "San Marzano".into(),
            description: "Paste tomato".into(),
            plant_type: PlantType::Vegetable,
            lighting_requirement: LightingRequirement::FullSun,
            grow_method: GrowMethod::Soil,
            date_planted: updated.date_planted,
            condition: Some(PlantCondition::Healthy),
        };
        let saved = update(&db, 1, 5, input).await.unwrap().unwrap();
        assert_eq!(saved.name, "San Marzano");
        assert_eq!(saved.image_data, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn plants_need_an_owned_garden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_garden(1, 99)]])
            .into_connection();

        let input = PlantInput {
            garden_id: 1,
            name: "Basil".into(),
            description: "Genovese".into(),
            plant_type: PlantType::Herb,
            lighting_requirement: LightingRequirement::High,
            grow_method: GrowMethod::Container,
            date_planted: Utc::now(),
            condition: None,
        };
        assert!(create(&db, 5, input).await.is_err());
    }
}
