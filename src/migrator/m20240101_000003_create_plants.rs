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
                    .table(Plants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plants::GardenId).integer().not_null())
                    .col(ColumnDef::new(Plants::UserId).integer().not_null())
                    .col(ColumnDef::new(Plants::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Plants::Description).text().not_null())
                    .col(ColumnDef::new(Plants::PlantType).integer().not_null())
                    .col(ColumnDef::new(Plants::LightingRequirement).integer().not_null())
                    .col(ColumnDef::new(Plants::GrowMethod).integer().not_null())
                    .col(
                        ColumnDef::new(Plants::DatePlanted)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Plants::Condition).integer())
                    .col(ColumnDef::new(Plants::ImageData).binary())
                    .col(ColumnDef::new(Plants::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plants_garden")
                            .from(Plants::Table, Plants::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plants_user")
                            .from(Plants::Table, Plants::UserId)
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
                    .name("idx_plants_garden_id")
                    .table(Plants::Table)
                    .col(Plants::GardenId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Plants {
    Table,
    Id,
    GardenId,
    UserId,
    Name,
    Description,
    PlantType,
    LightingRequirement,
    GrowMethod,
    DatePlanted,
    Condition,
    ImageData,
    ImageType,
}
