use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::{record_action, DateRange};
use crate::entities::enums::{ReminderPriority, ReminderType};
use crate::entities::reminder;
use crate::error::AppError;
use crate::services::reminders::{self, QuickReminderInput, ReminderFilter, ReminderInput};

/// A reminder as the client sees it, with its due-state already worked out.
#[derive(Debug, Serialize)]
pub struct ReminderView {
    #[serde(flatten)]
    reminder: reminder::Model,
    is_overdue: bool,
    is_due_today: bool,
    is_due_soon: bool,
}

impl ReminderView {
    fn at(reminder: reminder::Model, now: DateTime<Utc>) -> Self {
        Self {
            is_overdue: reminder.is_overdue_at(now),
            is_due_today: reminder.is_due_today_at(now),
            is_due_soon: reminder.is_due_soon_at(now),
            reminder,
        }
    }
}

impl From<reminder::Model> for ReminderView {
    fn from(reminder: reminder::Model) -> Self {
        Self::at(reminder, Utc::now())
    }
}

fn views(reminders: Vec<reminder::Model>) -> Vec<ReminderView> {
    let now = Utc::now();
    reminders
        .into_iter()
        .map(|r| ReminderView::at(r, now))
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    filter: Option<ReminderFilter>,
    days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnoozeQuery {
    hours: Option<i64>,
}

pub async fn list_reminders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let found = reminders::list(&db, user_id, query.filter, query.days).await?;
    Ok((StatusCode::OK, Json(views(found))).into_response())
}

pub async fn reminders_in_range(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Query(range): Query<DateRange>,
) -> Result<Response, AppError> {
    let Some((start, end)) = range.bounds()? else {
        return Err(AppError::InvalidInput(
            "Both start and end dates are required.".into(),
        ));
    };
    let found = reminders::by_date_range(&db, user_id, start, end).await?;
    Ok((StatusCode::OK, Json(views(found))).into_response())
}

pub async fn reminders_by_type(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_type): Path<ReminderType>,
) -> Result<Response, AppError> {
    let found = reminders::by_type(&db, user_id, reminder_type).await?;
    Ok((StatusCode::OK, Json(views(found))).into_response())
}

pub async fn reminders_by_priority(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(priority): Path<ReminderPriority>,
) -> Result<Response, AppError> {
    let found = reminders::by_priority(&db, user_id, priority).await?;
    Ok((StatusCode::OK, Json(views(found))).into_response())
}

pub async fn list_garden_reminders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(garden_id): Path<i32>,
) -> Result<Response, AppError> {
    let found = reminders::by_garden(&db, garden_id, user_id).await?;
    Ok((StatusCode::OK, Json(views(found))).into_response())
}

pub async fn create_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<ReminderInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let reminder = reminders::create(&db, user_id, payload).await?;

    record_action("reminders", "create_reminder", user_id);
    crate::metrics::increment_records_created("reminders");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Reminder created successfully.",
            "reminder": ReminderView::from(reminder),
        })),
    )
        .into_response())
}

pub async fn quick_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<QuickReminderInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let reminder = reminders::quick_create(&db, user_id, payload).await?;

    record_action("reminders", "quick_reminder", user_id);
    crate::metrics::increment_records_created("reminders");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Reminder added.",
            "reminder": ReminderView::from(reminder),
        })),
    )
        .into_response())
}

pub async fn get_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
) -> Result<Response, AppError> {
    let reminder = reminders::require_owned(&db, reminder_id, user_id).await?;
    Ok((StatusCode::OK, Json(ReminderView::from(reminder))).into_response())
}

pub async fn update_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
    Json(payload): Json<ReminderInput>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let reminder = reminders::update(&db, reminder_id, user_id, payload)
        .await?
        .ok_or(AppError::NotFound("Reminder"))?;

    record_action("reminders", "update_reminder", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Reminder updated successfully.",
            "reminder": ReminderView::from(reminder),
        })),
    )
        .into_response())
}

pub async fn delete_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
) -> Result<Response, AppError> {
    if !reminders::delete(&db, reminder_id, user_id).await? {
        return Err(AppError::NotFound("Reminder"));
    }

    record_action("reminders", "delete_reminder", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Reminder deleted successfully."})),
    )
        .into_response())
}

pub async fn complete_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
) -> Result<Response, AppError> {
    let completion = reminders::mark_completed(&db, reminder_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Reminder"))?;

    record_action("reminders", "complete_reminder", user_id);
    let message = match &completion.next {
        Some(next) => {
            tracing::Span::current().record("business_event", "Recurring reminder rescheduled");
            format!(
                "Reminder completed. The next one is due {}.",
                next.reminder_date_time.format("%Y-%m-%d %H:%M")
            )
        }
        None => "Reminder marked as completed.".to_string(),
    };
    crate::metrics::increment_reminders_completed(completion.next.is_some());

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": message,
            "reminder": ReminderView::from(completion.reminder),
            "next": completion.next.map(ReminderView::from),
        })),
    )
        .into_response())
}

pub async fn incomplete_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
) -> Result<Response, AppError> {
    let reminder = reminders::mark_incomplete(&db, reminder_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Reminder"))?;

    record_action("reminders", "incomplete_reminder", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Reminder marked as incomplete.",
            "reminder": ReminderView::from(reminder),
        })),
    )
        .into_response())
}

pub async fn snooze_reminder(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Path(reminder_id): Path<i32>,
    Query(query): Query<SnoozeQuery>,
) -> Result<Response, AppError> {
    let hours = query.hours.unwrap_or(1);
    let reminder = reminders::snooze(&db, reminder_id, user_id, hours)
        .await?
        .ok_or(AppError::NotFound("Reminder"))?;

    record_action("reminders", "snooze_reminder", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Reminder snoozed for {hours} hour(s)."),
            "reminder": ReminderView::from(reminder),
        })),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reminder(at: DateTime<Utc>, completed: bool) -> reminder::Model {
        reminder::Model {
            id: 1,
            user_id: 5,
            title: "Water the basil".into(),
            description: None,
            reminder_date_time: at,
            reminder_type: ReminderType::Watering,
            is_completed: completed,
            completed_date: None,
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_interval: None,
            priority: ReminderPriority::Normal,
            garden_id: None,
            daily_record_id: None,
            garden_care_activity_id: None,
            created_date: at - Duration::days(1),
            last_modified_date: None,
        }
    }

    #[test]
    fn view_flags_follow_the_clock() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let late = ReminderView::at(reminder(now - Duration::hours(2), false), now);
        assert!(late.is_overdue);

        let done = ReminderView::at(reminder(now - Duration::hours(2), true), now);
        assert!(!done.is_overdue);

        let json = serde_json::to_value(late).unwrap();
        assert_eq!(json["title"], "Water the basil");
        assert_eq!(json["is_overdue"], true);
    }
}
