use chrono::{Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{RecurrencePattern, ReminderPriority, ReminderType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub reminder_date_time: DateTimeUtc,
    pub reminder_type: ReminderType,
    pub is_completed: bool,
    pub completed_date: Option<DateTimeUtc>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub recurrence_interval: Option<i32>,
    pub priority: ReminderPriority,
    pub garden_id: Option<i32>,
    pub daily_record_id: Option<i32>,
    pub garden_care_activity_id: Option<i32>,
    pub created_date: DateTimeUtc,
    pub last_modified_date: Option<DateTimeUtc>,
}

impl Model {
    pub fn is_overdue_at(&self, now: DateTimeUtc) -> bool {
        !self.is_completed && self.reminder_date_time < now
    }

    pub fn is_due_today_at(&self, now: DateTimeUtc) -> bool {
        !self.is_completed && self.reminder_date_time.date_naive() == now.date_naive()
    }

    pub fn is_due_soon_at(&self, now: DateTimeUtc) -> bool {
        !self.is_completed
            && self.reminder_date_time > now
            && self.reminder_date_time <= now + Duration::hours(24)
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    pub fn is_due_today(&self) -> bool {
        self.is_due_today_at(Utc::now())
    }

    pub fn is_due_soon(&self) -> bool {
        self.is_due_soon_at(Utc::now())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::garden::Entity",
        from = "Column::GardenId",
        to = "super::garden::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Garden,
    #[sea_orm(
        belongs_to = "super::daily_record::Entity",
        from = "Column::DailyRecordId",
        to = "super::daily_record::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    DailyRecord,
    #[sea_orm(
        belongs_to = "super::garden_care_activity::Entity",
        from = "Column::GardenCareActivityId",
        to = "super::garden_care_activity::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    GardenCareActivity,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::garden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Garden.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
