use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, images::UploadedImage, owned};
use crate::entities::enums::{GardenType, GrowMethod, Location};
use crate::entities::prelude::*;
use crate::entities::{daily_record, equipment, garden, journal_entry, plant};
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GardenInput {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters."))]
    pub name: String,
    #[validate(length(min = 2, max = 500, message = "Description must be between 2 and 500 characters."))]
    pub description: String,
    pub location: Location,
    pub garden_type: GardenType,
    pub grow_method: GrowMethod,
    #[serde(with = "utc")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "utc")]
    pub end_date: DateTime<Utc>,
}

/// A garden with everything that hangs off it.
#[derive(Debug, Clone)]
pub struct GardenDetails {
    pub garden: garden::Model,
    pub daily_records: Vec<daily_record::Model>,
    pub journal_entries: Vec<journal_entry::Model>,
    pub equipment: Vec<equipment::Model>,
    pub plants: Vec<plant::Model>,
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: GardenInput,
) -> AppResult<garden::Model> {
    let active_model = garden::ActiveModel {
        user_id: Set(user_id),
        name: Set(input.name),
        description: Set(input.description),
        location: Set(input.location),
        garden_type: Set(input.garden_type),
        grow_method: Set(input.grow_method),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<garden::Model>> {
    Ok(Garden::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<garden::Model> {
    owned(get(db, id).await?, user_id, |g| g.user_id, "Garden")
}

pub async fn get_with_details(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<GardenDetails> {
    let garden = require_owned(db, id, user_id).await?;

    let daily_records = DailyRecord::find()
        .filter(daily_record::Column::GardenId.eq(id))
        .order_by_desc(daily_record::Column::CreatedDate)
        .all(db)
        .await?;
    let journal_entries = JournalEntry::find()
        .filter(journal_entry::Column::GardenId.eq(id))
        .order_by_desc(journal_entry::Column::EntryDate)
        .all(db)
        .await?;
    let equipment = Equipment::find()
        .filter(equipment::Column::GardenId.eq(id))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await?;
    let plants = Plant::find()
        .filter(plant::Column::GardenId.eq(id))
        .order_by_asc(plant::Column::Name)
        .all(db)
        .await?;

    Ok(GardenDetails {
        garden,
        daily_records,
        journal_entries,
        equipment,
        plants,
    })
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<garden::Model>> {
    Ok(Garden::find()
        .filter(garden::Column::UserId.eq(user_id))
        .order_by_asc(garden::Column::Name)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: GardenInput,
) -> AppResult<Option<garden::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |g| g.user_id, "Garden")?;

    let mut active_model = existing.into_active_model();
    active_model.name = Set(input.name);
    active_model.description = Set(input.description);
    active_model.location = Set(input.location);
    active_model.garden_type = Set(input.garden_type);
    active_model.grow_method = Set(input.grow_method);
    active_model.start_date = Set(input.start_date);
    active_model.end_date = Set(input.end_date);

    Ok(Some(active_model.update(db).await?))
}

pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    image: UploadedImage,
) -> AppResult<garden::Model> {
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
    owned(Some(existing), user_id, |g| g.user_id, "Garden")?;
    let result = Garden::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let count = Garden::find()
        .filter(garden::Column::Id.eq(id))
        .count(db)
        .await?;
    Ok(count > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    pub(crate) fn sample(id: i32, user_id: i32) -> garden::Model {
        garden::Model {
            id,
            user_id,
            name: "Back yard".into(),
            description: "Raised beds".into(),
            location: Location::Outdoor,
            garden_type: GardenType::Vegetable,
            grow_method: GrowMethod::RaisedBed,
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap(),
            image_data: None,
            image_type: None,
        }
    }

    #[tokio::test]
    async fn created_garden_is_returned() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, 5)]])
            .into_connection();

        let input = GardenInput {
            name: "Back yard".into(),
            description: "Raised beds".into(),
            location: Location::Outdoor,
            garden_type: GardenType::Vegetable,
            grow_method: GrowMethod::RaisedBed,
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap(),
        };
        let created = create(&db, 5, input).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.user_id, 5);
    }

    #[tokio::test]
    async fn deleting_a_missing_garden_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<garden::Model>::new()])
            .into_connection();

        assert!(!delete(&db, 42, 5).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_an_owned_garden_removes_it() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(3, 5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        assert!(delete(&db, 3, 5).await.unwrap());
    }

    #[tokio::test]
    async fn foreign_gardens_are_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(3, 9)]])
            .into_connection();

        let err = require_owned(&db, 3, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn short_names_fail_validation() {
        let input = GardenInput {
            name: "A".into(),
            description: "ok".into(),
            location: Location::Indoor,
            garden_type: GardenType::Herb,
            grow_method: GrowMethod::Soil,
            start_date: Utc::now(),
            end_date: Utc::now(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
