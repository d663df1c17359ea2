use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gardens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gardens::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gardens::UserId).integer().not_null())
                    .col(ColumnDef::new(Gardens::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Gardens::Description).text().not_null())
                    .col(ColumnDef::new(Gardens::Location).integer().not_null())
                    .col(ColumnDef::new(Gardens::GardenType).integer().not_null())
                    .col(ColumnDef::new(Gardens::GrowMethod).integer().not_null())
                    .col(
                        ColumnDef::new(Gardens::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gardens::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Gardens::ImageData).binary())
                    .col(ColumnDef::new(Gardens::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gardens_user")
                            .from(Gardens::Table, Gardens::UserId)
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
                    .name("idx_gardens_user_id")
                    .table(Gardens::Table)
                    .col(Gardens::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gardens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Gardens {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Location,
    GardenType,
    GrowMethod,
    StartDate,
    EndDate,
    ImageData,
    ImageType,
}
