use chrono::{DateTime, Duration, Months, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use validator::Validate;

use super::{daily_records, datetime, datetime::utc, day_window, garden_care, gardens, owned};
use crate::entities::enums::{RecurrencePattern, ReminderPriority, ReminderType};
use crate::entities::prelude::*;
use crate::entities::reminder;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReminderInput {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(with = "utc")]
    pub reminder_date_time: DateTime<Utc>,
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub priority: ReminderPriority,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365."))]
    pub recurrence_interval: Option<i32>,
    pub garden_id: Option<i32>,
    pub daily_record_id: Option<i32>,
    pub garden_care_activity_id: Option<i32>,
}

/// Longest snooze accepted, one year.
pub const MAX_SNOOZE_HOURS: i64 = 24 * 365;

/// The quick-add form sends the date and the time as separate fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuickReminderInput {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub priority: ReminderPriority,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365."))]
    pub recurrence_interval: Option<i32>,
    pub garden_id: Option<i32>,
}

impl QuickReminderInput {
    /// Joins the date and time fields into a full reminder.
    pub fn into_reminder_input(self) -> AppResult<ReminderInput> {
        let at = datetime::combine_date_time(&self.date, &self.time).ok_or_else(|| {
            AppError::InvalidInput(
                "Please provide a valid date (YYYY-MM-DD) and time (HH:MM).".into(),
            )
        })?;
        Ok(ReminderInput {
            title: self.title,
            description: self.description,
            reminder_date_time: at,
            reminder_type: self.reminder_type,
            priority: self.priority,
            is_recurring: self.is_recurring,
            recurrence_pattern: self.recurrence_pattern,
            recurrence_interval: self.recurrence_interval,
            garden_id: self.garden_id,
            daily_record_id: None,
            garden_care_activity_id: None,
        })
    }
}

/// The list views offered on the reminders page.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFilter {
    Active,
    Completed,
    Overdue,
    Upcoming,
}

/// Next due date of a recurring reminder. `interval` below 1 counts as 1.
/// Month steps clamp to the last day of shorter months.
pub fn next_occurrence(
    from: DateTime<Utc>,
    pattern: RecurrencePattern,
    interval: Option<i32>,
) -> Option<DateTime<Utc>> {
    let n = interval.filter(|n| *n >= 1).unwrap_or(1) as u32;
    match pattern {
        RecurrencePattern::Daily => from.checked_add_signed(Duration::days(n as i64)),
        RecurrencePattern::Weekly => from.checked_add_signed(Duration::days(7 * n as i64)),
        RecurrencePattern::BiWeekly => from.checked_add_signed(Duration::days(14 * n as i64)),
        RecurrencePattern::Monthly => from.checked_add_months(Months::new(n)),
        RecurrencePattern::Quarterly => from.checked_add_months(Months::new(3 * n)),
        RecurrencePattern::Yearly => from.checked_add_months(Months::new(12 * n)),
    }
}

/// Builds the follow-up row for a recurring reminder, or `None` when it does not repeat.
pub fn follow_up(original: &reminder::Model, now: DateTime<Utc>) -> Option<reminder::ActiveModel> {
    if !original.is_recurring {
        return None;
    }
    let pattern = original.recurrence_pattern?;
    let next = next_occurrence(
        original.reminder_date_time,
        pattern,
        original.recurrence_interval,
    )?;

    Some(reminder::ActiveModel {
        id: NotSet,
        user_id: Set(original.user_id),
        title: Set(original.title.clone()),
        description: Set(original.description.clone()),
        reminder_date_time: Set(next),
        reminder_type: Set(original.reminder_type),
        is_completed: Set(false),
        completed_date: Set(None),
        is_recurring: Set(true),
        recurrence_pattern: Set(Some(pattern)),
        recurrence_interval: Set(original.recurrence_interval),
        priority: Set(original.priority),
        garden_id: Set(original.garden_id),
        daily_record_id: Set(original.daily_record_id),
        garden_care_activity_id: Set(original.garden_care_activity_id),
        created_date: Set(now),
        last_modified_date: Set(None),
    })
}

async fn check_links(db: &DatabaseConnection, user_id: i32, input: &ReminderInput) -> AppResult<()> {
    if let Some(garden_id) = input.garden_id {
        gardens::require_owned(db, garden_id, user_id).await?;
    }
    if let Some(record_id) = input.daily_record_id {
        daily_records::require_owned(db, record_id, user_id).await?;
    }
    if let Some(activity_id) = input.garden_care_activity_id {
        garden_care::require_owned(db, activity_id, user_id).await?;
    }
    Ok(())
}

fn recurrence_of(input: &ReminderInput) -> (Option<RecurrencePattern>, Option<i32>) {
    if input.is_recurring {
        (input.recurrence_pattern, input.recurrence_interval)
    } else {
        (None, None)
    }
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: ReminderInput,
) -> AppResult<reminder::Model> {
    check_links(db, user_id, &input).await?;
    let (pattern, interval) = recurrence_of(&input);

    let active_model = reminder::ActiveModel {
        user_id: Set(user_id),
        title: Set(input.title),
        description: Set(input.description),
        reminder_date_time: Set(input.reminder_date_time),
        reminder_type: Set(input.reminder_type),
        is_completed: Set(false),
        completed_date: Set(None),
        is_recurring: Set(input.is_recurring),
        recurrence_pattern: Set(pattern),
        recurrence_interval: Set(interval),
        priority: Set(input.priority),
        garden_id: Set(input.garden_id),
        daily_record_id: Set(input.daily_record_id),
        garden_care_activity_id: Set(input.garden_care_activity_id),
        created_date: Set(Utc::now()),
        last_modified_date: Set(None),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn quick_create(
    db: &DatabaseConnection,
    user_id: i32,
    input: QuickReminderInput,
) -> AppResult<reminder::Model> {
    create(db, user_id, input.into_reminder_input()?).await
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<reminder::Model>> {
    Ok(Reminder::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<reminder::Model> {
    owned(get(db, id).await?, user_id, |r| r.user_id, "Reminder")
}

async fn find_for_user(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<Option<reminder::Model>> {
    match get(db, id).await? {
        Some(found) => owned(Some(found), user_id, |r| r.user_id, "Reminder").map(Some),
        None => Ok(None),
    }
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: ReminderInput,
) -> AppResult<Option<reminder::Model>> {
    let Some(existing) = find_for_user(db, id, user_id).await? else {
        return Ok(None);
    };
    check_links(db, user_id, &input).await?;
    let (pattern, interval) = recurrence_of(&input);

    let mut active_model = existing.into_active_model();
    active_model.title = Set(input.title);
    active_model.description = Set(input.description);
    active_model.reminder_date_time = Set(input.reminder_date_time);
    active_model.reminder_type = Set(input.reminder_type);
    active_model.priority = Set(input.priority);
    active_model.is_recurring = Set(input.is_recurring);
    active_model.recurrence_pattern = Set(pattern);
    active_model.recurrence_interval = Set(interval);
    active_model.garden_id = Set(input.garden_id);
    active_model.daily_record_id = Set(input.daily_record_id);
    active_model.garden_care_activity_id = Set(input.garden_care_activity_id);
    active_model.last_modified_date = Set(Some(Utc::now()));

    Ok(Some(active_model.update(db).await?))
}

pub async fn delete(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<bool> {
    if find_for_user(db, id, user_id).await?.is_none() {
        return Ok(false);
    }
    let result = Reminder::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Outcome of completing a reminder.
#[derive(Debug, Clone)]
pub struct Completion {
    pub reminder: reminder::Model,
    pub next: Option<reminder::Model>,
}

/// Marks the reminder done and, for recurring reminders, schedules exactly one
/// follow-up. Completing an already-completed reminder changes nothing.
pub async fn mark_completed(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<Option<Completion>> {
    let txn = db.begin().await?;

    let found = Reminder::find_by_id(id).one(&txn).await?;
    let Some(existing) = found else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |r| r.user_id, "Reminder")?;
    if existing.is_completed {
        return Ok(Some(Completion {
            reminder: existing,
            next: None,
        }));
    }

    let now = Utc::now();
    let next_row = follow_up(&existing, now);

    let mut active_model = existing.into_active_model();
    active_model.is_completed = Set(true);
    active_model.completed_date = Set(Some(now));
    active_model.last_modified_date = Set(Some(now));
    let reminder = active_model.update(&txn).await?;

    let next = match next_row {
        Some(row) => Some(row.insert(&txn).await?),
        None => None,
    };

    txn.commit().await?;
    Ok(Some(Completion { reminder, next }))
}

pub async fn mark_incomplete(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<Option<reminder::Model>> {
    let Some(existing) = find_for_user(db, id, user_id).await? else {
        return Ok(None);
    };
    let mut active_model = existing.into_active_model();
    active_model.is_completed = Set(false);
    active_model.completed_date = Set(None);
    active_model.last_modified_date = Set(Some(Utc::now()));
    Ok(Some(active_model.update(db).await?))
}

pub async fn snooze(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    hours: i64,
) -> AppResult<Option<reminder::Model>> {
    if !(1..=MAX_SNOOZE_HOURS).contains(&hours) {
        return Err(AppError::InvalidInput(format!(
            "Snooze must be between 1 and {MAX_SNOOZE_HOURS} hours."
        )));
    }
    let Some(existing) = find_for_user(db, id, user_id).await? else {
        return Ok(None);
    };
    let at = existing
        .reminder_date_time
        .checked_add_signed(Duration::hours(hours))
        .ok_or_else(|| AppError::InvalidInput("Snoozed date is out of range.".into()))?;
    let mut active_model = existing.into_active_model();
    active_model.reminder_date_time = Set(at);
    active_model.last_modified_date = Set(Some(Utc::now()));
    Ok(Some(active_model.update(db).await?))
}

pub async fn active(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::IsCompleted.eq(false))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn completed(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::IsCompleted.eq(true))
        .order_by_desc(reminder::Column::CompletedDate)
        .all(db)
        .await?)
}

pub async fn overdue(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::IsCompleted.eq(false))
        .filter(reminder::Column::ReminderDateTime.lt(Utc::now()))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn upcoming(
    db: &DatabaseConnection,
    user_id: i32,
    days: i64,
) -> AppResult<Vec<reminder::Model>> {
    let now = Utc::now();
    let until = now + day_window(days)?;
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::IsCompleted.eq(false))
        .filter(reminder::Column::ReminderDateTime.between(now, until))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn by_date_range(
    db: &DatabaseConnection,
    user_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::ReminderDateTime.between(start, end))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn by_type(
    db: &DatabaseConnection,
    user_id: i32,
    reminder_type: ReminderType,
) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::ReminderType.eq(reminder_type))
        .filter(reminder::Column::IsCompleted.eq(false))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn by_priority(
    db: &DatabaseConnection,
    user_id: i32,
    priority: ReminderPriority,
) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::Priority.eq(priority))
        .filter(reminder::Column::IsCompleted.eq(false))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
) -> AppResult<Vec<reminder::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(Reminder::find()
        .filter(reminder::Column::GardenId.eq(garden_id))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn by_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<reminder::Model>> {
    Ok(Reminder::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .order_by_asc(reminder::Column::ReminderDateTime)
        .all(db)
        .await?)
}

pub async fn list(
    db: &DatabaseConnection,
    user_id: i32,
    filter: Option<ReminderFilter>,
    days: Option<i64>,
) -> AppResult<Vec<reminder::Model>> {
    match filter {
        Some(ReminderFilter::Active) => active(db, user_id).await,
        Some(ReminderFilter::Completed) => completed(db, user_id).await,
        Some(ReminderFilter::Overdue) => overdue(db, user_id).await,
        Some(ReminderFilter::Upcoming) => upcoming(db, user_id, days.unwrap_or(7)).await,
        None => by_user(db, user_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn recurring(pattern: Option<RecurrencePattern>, interval: Option<i32>) -> reminder::Model {
        reminder::Model {
            id: 1,
            user_id: 5,
            title: "Feed the lemon tree".into(),
            description: Some("Citrus feed".into()),
            reminder_date_time: at(2024, 1, 31),
            reminder_type: ReminderType::Fertilizing,
            is_completed: false,
            completed_date: None,
            is_recurring: pattern.is_some(),
            recurrence_pattern: pattern,
            recurrence_interval: interval,
            priority: ReminderPriority::High,
            garden_id: Some(2),
            daily_record_id: None,
            garden_care_activity_id: None,
            created_date: at(2024, 1, 1),
            last_modified_date: None,
        }
    }

    #[test]
    fn day_based_patterns() {
        let start = at(2024, 3, 1);
        assert_eq!(next_occurrence(start, RecurrencePattern::Daily, Some(3)), Some(at(2024, 3, 4)));
        assert_eq!(next_occurrence(start, RecurrencePattern::Weekly, Some(2)), Some(at(2024, 3, 15)));
        assert_eq!(next_occurrence(start, RecurrencePattern::BiWeekly, None), Some(at(2024, 3, 15)));
    }

    #[test]
    fn month_based_patterns_clamp() {
        let start = at(2024, 1, 31);
        assert_eq!(next_occurrence(start, RecurrencePattern::Monthly, Some(1)), Some(at(2024, 2, 29)));
        assert_eq!(next_occurrence(start, RecurrencePattern::Quarterly, Some(1)), Some(at(2024, 4, 30)));
        assert_eq!(
            next_occurrence(at(2024, 2, 29), RecurrencePattern::Yearly, Some(1)),
            Some(at(2025, 2, 28))
        );
    }

    #[test]
    fn non_positive_interval_counts_as_one() {
        let start = at(2024, 3, 1);
        assert_eq!(next_occurrence(start, RecurrencePattern::Daily, Some(0)), Some(at(2024, 3, 2)));
        assert_eq!(next_occurrence(start, RecurrencePattern::Daily, Some(-4)), Some(at(2024, 3, 2)));
    }

    #[test]
    fn follow_up_copies_the_original() {
        let original = recurring(Some(RecurrencePattern::Weekly), Some(2));
        let now = at(2024, 2, 1);
        let next = follow_up(&original, now).unwrap();
        assert_eq!(next.reminder_date_time, ActiveValue::Set(at(2024, 2, 14)));
        assert_eq!(next.title, ActiveValue::Set("Feed the lemon tree".to_string()));
        assert_eq!(next.is_completed, ActiveValue::Set(false));
        assert_eq!(next.garden_id, ActiveValue::Set(Some(2)));
        assert_eq!(next.created_date, ActiveValue::Set(now));
        assert!(follow_up(&recurring(None, None), now).is_none());
    }

    #[tokio::test]
    async fn completing_a_recurring_reminder_schedules_one_more() {
        let original = recurring(Some(RecurrencePattern::Weekly), Some(2));
        let mut done = original.clone();
        done.is_completed = true;
        done.completed_date = Some(Utc::now());
        let mut next = original.clone();
        next.id = 2;
        next.reminder_date_time = at(2024, 2, 14);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![original]])
            .append_query_results([vec![done]])
            .append_query_results([vec![next]])
            .into_connection();

        let completion = mark_completed(&db, 1, 5).await.unwrap().unwrap();
        assert!(completion.reminder.is_completed);
        let next = completion.next.unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(next.reminder_date_time, at(2024, 2, 14));
    }

    #[tokio::test]
    async fn completing_twice_does_not_duplicate() {
        let mut done = recurring(Some(RecurrencePattern::Daily), None);
        done.is_completed = true;

        // Only the lookup is answered; any write would hit an exhausted mock.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![done]])
            .into_connection();

        let completion = mark_completed(&db, 1, 5).await.unwrap().unwrap();
        assert!(completion.next.is_none());
    }

    #[tokio::test]
    async fn missing_reminder_completes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reminder::Model>::new()])
            .into_connection();
        assert!(mark_completed(&db, 9, 5).await.unwrap().is_none());
    }

    #[test]
    fn interval_is_bounded() {
        let input: ReminderInput = serde_json::from_value(serde_json::json!({
            "title": "Check pH",
            "reminder_date_time": "2024-05-01T08:00",
            "reminder_type": "Inspection",
            "is_recurring": true,
            "recurrence_pattern": "Daily",
            "recurrence_interval": 400
        }))
        .unwrap();
        assert_eq!(input.priority, ReminderPriority::Normal);
        assert!(input.validate().is_err());
    }

    #[tokio::test]
    async fn snooze_moves_the_due_time() {
        let original = recurring(None, None);
        let mut snoozed = original.clone();
        snoozed.reminder_date_time = original.reminder_date_time + Duration::hours(3);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![original]])
            .append_query_results([vec![snoozed.clone()]])
            .into_connection();

        let updated = snooze(&db, 1, 5, 3).await.unwrap().unwrap();
        assert_eq!(updated.reminder_date_time, snoozed.reminder_date_time);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("2024-01-31T12:00:00Z"));
    }

    #[tokio::test]
    async fn snooze_hours_are_bounded() {
        // No query results: a rejected snooze must not reach the database.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        assert!(matches!(snooze(&db, 1, 5, 0).await, Err(AppError::InvalidInput(_))));
        assert!(matches!(
            snooze(&db, 1, 5, 10_000_000_000_000).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            snooze(&db, 1, 5, MAX_SNOOZE_HOURS + 1).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn reopening_clears_the_completion() {
        let mut done = recurring(None, None);
        done.is_completed = true;
        done.completed_date = Some(at(2024, 2, 1));
        let mut reopened = done.clone();
        reopened.is_completed = false;
        reopened.completed_date = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![done]])
            .append_query_results([vec![reopened]])
            .into_connection();

        let reminder = mark_incomplete(&db, 1, 5).await.unwrap().unwrap();
        assert!(!reminder.is_completed);
        assert!(reminder.completed_date.is_none());
    }

    #[tokio::test]
    async fn reopening_someone_elses_reminder_is_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![recurring(None, None)]])
            .into_connection();
        assert!(matches!(
            mark_incomplete(&db, 1, 6).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn upcoming_window_is_bounded() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![recurring(None, None)]])
            .into_connection();

        assert_eq!(upcoming(&db, 5, 7).await.unwrap().len(), 1);
        assert!(matches!(upcoming(&db, 5, 0).await, Err(AppError::InvalidInput(_))));
        assert!(matches!(
            upcoming(&db, 5, 1_000_000_000_000).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            list(&db, 5, Some(ReminderFilter::Upcoming), Some(-3)).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    fn quick(recurring: bool) -> QuickReminderInput {
        serde_json::from_value(serde_json::json!({
            "title": "Flush the reservoir",
            "description": "Drain and refill",
            "date": "2024-05-01",
            "time": "07:30",
            "reminder_type": "Maintenance",
            "is_recurring": recurring,
            "recurrence_pattern": "Weekly",
            "recurrence_interval": 2
        }))
        .unwrap()
    }

    #[test]
    fn quick_form_can_repeat() {
        let input = quick(true).into_reminder_input().unwrap();
        assert_eq!(input.reminder_date_time, Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap());
        assert_eq!(input.description.as_deref(), Some("Drain and refill"));
        assert_eq!(
            recurrence_of(&input),
            (Some(RecurrencePattern::Weekly), Some(2))
        );
    }

    #[test]
    fn quick_form_drops_the_pattern_of_one_off_reminders() {
        let input = quick(false).into_reminder_input().unwrap();
        assert_eq!(recurrence_of(&input), (None, None));
    }

    #[test]
    fn quick_form_interval_is_bounded() {
        let mut input = quick(true);
        input.recurrence_interval = Some(0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn quick_form_needs_a_real_time() {
        let mut input = quick(false);
        input.time = "25:99".into();
        assert!(matches!(
            input.into_reminder_input(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn filters_parse_lowercase() {
        let filter: ReminderFilter = serde_json::from_str("\"overdue\"").unwrap();
        assert_eq!(filter, ReminderFilter::Overdue);
    }
}
