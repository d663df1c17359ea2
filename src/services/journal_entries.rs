use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, day_window, gardens, images::UploadedImage, owned};
use crate::entities::journal_entry;
use crate::entities::prelude::*;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JournalEntryInput {
    pub garden_id: i32,
    #[serde(default, with = "utc::option")]
    pub entry_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 1000, message = "Content must be between 1 and 1000 characters."))]
    pub content: String,
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: JournalEntryInput,
) -> AppResult<journal_entry::Model> {
    gardens::require_owned(db, input.garden_id, user_id).await?;

    let active_model = journal_entry::ActiveModel {
        garden_id: Set(input.garden_id),
        user_id: Set(user_id),
        entry_date: Set(input.entry_date.unwrap_or_else(Utc::now)),
        content: Set(input.content),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<journal_entry::Model>> {
    Ok(JournalEntry::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<journal_entry::Model> {
    owned(get(db, id).await?, user_id, |e| e.user_id, "Journal entry")
}

pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> AppResult<Vec<journal_entry::Model>> {
    Ok(JournalEntry::find()
        .filter(journal_entry::Column::UserId.eq(user_id))
        .order_by_desc(journal_entry::Column::EntryDate)
        .all(db)
        .await?)
}

pub async fn list_by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
) -> AppResult<Vec<journal_entry::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(JournalEntry::find()
        .filter(journal_entry::Column::GardenId.eq(garden_id))
        .order_by_desc(journal_entry::Column::EntryDate)
        .all(db)
        .await?)
}

/// Entries written in the last `days` days, newest first, optionally for one garden.
pub async fn recent(
    db: &DatabaseConnection,
    user_id: i32,
    garden_id: Option<i32>,
    days: i64,
) -> AppResult<Vec<journal_entry::Model>> {
    let since = Utc::now() - day_window(days.max(1))?;
    let mut query = JournalEntry::find()
        .filter(journal_entry::Column::UserId.eq(user_id))
        .filter(journal_entry::Column::EntryDate.gte(since));
    if let Some(garden_id) = garden_id {
        gardens::require_owned(db, garden_id, user_id).await?;
        query = query.filter(journal_entry::Column::GardenId.eq(garden_id));
    }
    Ok(query
        .order_by_desc(journal_entry::Column::EntryDate)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: JournalEntryInput,
) -> AppResult<Option<journal_entry::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |e| e.user_id, "Journal entry")?;
    if existing.garden_id != input.garden_id {
        gardens::require_owned(db, input.garden_id, user_id).await?;
    }

    let mut active_model = existing.into_active_model();
    active_model.garden_id = Set(input.garden_id);
    if let Some(entry_date) = input.entry_date {
        active_model.entry_date = Set(entry_date);
    }
    active_model.content = Set(input.content);

    Ok(Some(active_model.update(db).await?))
}

pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    image: UploadedImage,
) -> AppResult<journal_entry::Model> {
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
    owned(Some(existing), user_id, |e| e.user_id, "Journal entry")?;
    let result = JournalEntry::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn deleting_missing_entry_reports_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<journal_entry::Model>::new()])
            .into_connection();
        assert!(!delete(&db, 1, 5).await.unwrap());
    }

    #[tokio::test]
    async fn an_absurd_look_back_is_refused() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        assert!(matches!(
            recent(&db, 5, None, 1_000_000_000_000).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn recent_entries_for_a_foreign_garden_are_refused() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gardens::tests::sample(3, 99)]])
            .into_connection();
        let err = recent(&db, 5, Some(3), 30).await.unwrap_err();
        assert!(matches!(err, crate::error::AppError::Forbidden(_)));
    }

    #[test]
    fn content_is_required() {
        let input = JournalEntryInput {
            garden_id: 1,
            entry_date: None,
            content: String::new(),
        };
        assert!(input.validate().is_err());
    }
}
