use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_gardens::Gardens;
use super::m20240101_000005_create_garden_logs::DailyRecords;
use super::m20240115_000001_create_care_activities::GardenCareActivities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reminders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reminders::UserId).integer().not_null())
                    .col(ColumnDef::new(Reminders::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Reminders::Description).text())
                    .col(
                        ColumnDef::new(Reminders::ReminderDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reminders::ReminderType).integer().not_null())
                    .col(
                        ColumnDef::new(Reminders::IsCompleted)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reminders::CompletedDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Reminders::IsRecurring)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reminders::RecurrencePattern).integer())
                    .col(ColumnDef::new(Reminders::RecurrenceInterval).integer())
                    // 2 = Normal
                    .col(
                        ColumnDef::new(Reminders::Priority)
                            .integer()
                            .default(2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reminders::GardenId).integer())
                    .col(ColumnDef::new(Reminders::DailyRecordId).integer())
                    .col(ColumnDef::new(Reminders::GardenCareActivityId).integer())
                    .col(
                        ColumnDef::new(Reminders::CreatedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reminders::LastModifiedDate).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_user")
                            .from(Reminders::Table, Reminders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_garden")
                            .from(Reminders::Table, Reminders::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_daily_record")
                            .from(Reminders::Table, Reminders::DailyRecordId)
                            .to(DailyRecords::Table, DailyRecords::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_garden_care_activity")
                            .from(Reminders::Table, Reminders::GardenCareActivityId)
                            .to(GardenCareActivities::Table, GardenCareActivities::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_user_date")
                    .table(Reminders::Table)
                    .col(Reminders::UserId)
                    .col(Reminders::ReminderDateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_is_completed")
                    .table(Reminders::Table)
                    .col(Reminders::IsCompleted)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reminders {
    Table,
    Id,
    UserId,
    Title,
    Description,
    ReminderDateTime,
    ReminderType,
    IsCompleted,
    CompletedDate,
    IsRecurring,
    RecurrencePattern,
    RecurrenceInterval,
    Priority,
    GardenId,
    DailyRecordId,
    GardenCareActivityId,
    CreatedDate,
    LastModifiedDate,
}
