use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_gardens::Gardens;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyRecords::GardenId).integer().not_null())
                    .col(ColumnDef::new(DailyRecords::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(DailyRecords::CreatedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyRecords::InsideTemperature).double().not_null())
                    .col(ColumnDef::new(DailyRecords::OutsideTemperature).double().not_null())
                    .col(ColumnDef::new(DailyRecords::InsideHumidity).double().not_null())
                    .col(ColumnDef::new(DailyRecords::OutsideHumidity).double().not_null())
                    .col(ColumnDef::new(DailyRecords::InsideVpd).double().not_null())
                    .col(ColumnDef::new(DailyRecords::OutsideVpd).double().not_null())
                    .col(ColumnDef::new(DailyRecords::LightingOn).double().not_null())
                    .col(ColumnDef::new(DailyRecords::LightingOff).double().not_null())
                    .col(ColumnDef::new(DailyRecords::LightingIntensity).integer().not_null())
                    .col(ColumnDef::new(DailyRecords::WaterAmount).double().not_null())
                    .col(ColumnDef::new(DailyRecords::NutrientAmount).double().not_null())
                    .col(ColumnDef::new(DailyRecords::Notes).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_records_garden")
                            .from(DailyRecords::Table, DailyRecords::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_records_user")
                            .from(DailyRecords::Table, DailyRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::GardenId).integer().not_null())
                    .col(ColumnDef::new(JournalEntries::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::EntryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::Content).text().not_null())
                    .col(ColumnDef::new(JournalEntries::ImageData).binary())
                    .col(ColumnDef::new(JournalEntries::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_entries_garden")
                            .from(JournalEntries::Table, JournalEntries::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_entries_user")
                            .from(JournalEntries::Table, JournalEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_records_garden_created")
                    .table(DailyRecords::Table)
                    .col(DailyRecords::GardenId)
                    .col(DailyRecords::CreatedDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_garden_id")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::GardenId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DailyRecords {
    Table,
    Id,
    GardenId,
    UserId,
    CreatedDate,
    InsideTemperature,
    OutsideTemperature,
    InsideHumidity,
    OutsideHumidity,
    InsideVpd,
    OutsideVpd,
    LightingOn,
    LightingOff,
    LightingIntensity,
    WaterAmount,
    NutrientAmount,
    Notes,
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    GardenId,
    UserId,
    EntryDate,
    Content,
    ImageData,
    ImageType,
}
