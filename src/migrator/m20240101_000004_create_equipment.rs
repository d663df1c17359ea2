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
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipment::GardenId).integer().not_null())
                    .col(ColumnDef::new(Equipment::UserId).integer().not_null())
                    .col(ColumnDef::new(Equipment::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Equipment::Description).text().not_null())
                    .col(ColumnDef::new(Equipment::EquipmentType).integer().not_null())
                    .col(
                        ColumnDef::new(Equipment::PurchaseDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Equipment::PurchasePrice).double().not_null())
                    .col(ColumnDef::new(Equipment::LastMaintenanceDate).timestamp_with_time_zone())
                    // 1 = Operational
                    .col(
                        ColumnDef::new(Equipment::MaintenanceStatus)
                            .integer()
                            .default(1)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Equipment::ImageData).binary())
                    .col(ColumnDef::new(Equipment::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_garden")
                            .from(Equipment::Table, Equipment::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_user")
                            .from(Equipment::Table, Equipment::UserId)
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
                    .table(MaintenanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::EquipmentId).integer().not_null())
                    .col(ColumnDef::new(MaintenanceRecords::Status).integer().not_null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::RequestDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::MaintenanceStartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(MaintenanceRecords::MaintenanceEndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(MaintenanceRecords::Notes).text())
                    .col(
                        ColumnDef::new(MaintenanceRecords::RequestedByUserId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_records_equipment")
                            .from(MaintenanceRecords::Table, MaintenanceRecords::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_equipment_garden_id")
                    .table(Equipment::Table)
                    .col(Equipment::GardenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_records_equipment_status")
                    .table(MaintenanceRecords::Table)
                    .col(MaintenanceRecords::EquipmentId)
                    .col(MaintenanceRecords::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
    GardenId,
    UserId,
    Name,
    Description,
    EquipmentType,
    PurchaseDate,
    PurchasePrice,
    LastMaintenanceDate,
    MaintenanceStatus,
    ImageData,
    ImageType,
}

#[derive(DeriveIden)]
enum MaintenanceRecords {
    Table,
    Id,
    EquipmentId,
    Status,
    RequestDate,
    MaintenanceStartDate,
    MaintenanceEndDate,
    Notes,
    RequestedByUserId,
}
