use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_gardens::Gardens;
use super::m20240101_000003_create_plants::Plants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GardenCareActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GardenCareActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::GardenId).integer().not_null())
                    .col(ColumnDef::new(GardenCareActivities::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(GardenCareActivities::ActivityDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::ActivityType).integer().not_null())
                    .col(ColumnDef::new(GardenCareActivities::PlantInspectionStatus).integer())
                    .col(ColumnDef::new(GardenCareActivities::EquipmentInspectionStatus).integer())
                    .col(ColumnDef::new(GardenCareActivities::WaterLevel).double())
                    .col(
                        ColumnDef::new(GardenCareActivities::WateringPerformed)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::WaterAmountAdded).double())
                    .col(
                        ColumnDef::new(GardenCareActivities::NutrientsAdded)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::NutrientType).string_len(200))
                    .col(ColumnDef::new(GardenCareActivities::NutrientAmount).double())
                    .col(
                        ColumnDef::new(GardenCareActivities::NewPlantingsAdded)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::NumberOfPlantsAdded).integer())
                    .col(ColumnDef::new(GardenCareActivities::PlantTypesAdded).string_len(500))
                    .col(
                        ColumnDef::new(GardenCareActivities::WeedingPerformed)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::WeedingDuration).integer())
                    .col(
                        ColumnDef::new(GardenCareActivities::PruningPerformed)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::PruningNotes).text())
                    .col(
                        ColumnDef::new(GardenCareActivities::PestControlPerformed)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GardenCareActivities::PestControlDetails).text())
                    .col(ColumnDef::new(GardenCareActivities::PhLevel).double())
                    .col(ColumnDef::new(GardenCareActivities::EcLevel).double())
                    .col(ColumnDef::new(GardenCareActivities::GardenStatus).integer())
                    .col(ColumnDef::new(GardenCareActivities::ActivityDuration).integer())
                    .col(ColumnDef::new(GardenCareActivities::Notes).text())
                    .col(ColumnDef::new(GardenCareActivities::ImageData).binary())
                    .col(ColumnDef::new(GardenCareActivities::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_garden_care_activities_garden")
                            .from(GardenCareActivities::Table, GardenCareActivities::GardenId)
                            .to(Gardens::Table, Gardens::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_garden_care_activities_user")
                            .from(GardenCareActivities::Table, GardenCareActivities::UserId)
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
                    .table(PlantCareActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlantCareActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlantCareActivities::PlantId).integer().not_null())
                    .col(ColumnDef::new(PlantCareActivities::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(PlantCareActivities::ActivityDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlantCareActivities::ActivityType).integer().not_null())
                    .col(ColumnDef::new(PlantCareActivities::PlantingDepth).double())
                    .col(ColumnDef::new(PlantCareActivities::PlantingMethod).string_len(100))
                    .col(ColumnDef::new(PlantCareActivities::GrowingMedium).string_len(200))
                    .col(flag(PlantCareActivities::WateringPerformed))
                    .col(ColumnDef::new(PlantCareActivities::WaterAmount).double())
                    .col(ColumnDef::new(PlantCareActivities::MoistureLevel).integer())
                    .col(flag(PlantCareActivities::FertilizerApplied))
                    .col(ColumnDef::new(PlantCareActivities::FertilizerType).string_len(200))
                    .col(ColumnDef::new(PlantCareActivities::FertilizerAmount).double())
                    .col(ColumnDef::new(PlantCareActivities::NpkRatio).string_len(50))
                    .col(ColumnDef::new(PlantCareActivities::LightHours).double())
                    .col(ColumnDef::new(PlantCareActivities::LightSource).integer())
                    .col(ColumnDef::new(PlantCareActivities::LightIntensity).integer())
                    .col(flag(PlantCareActivities::PruningPerformed))
                    .col(ColumnDef::new(PlantCareActivities::PruningDetails).text())
                    .col(flag(PlantCareActivities::SupportAdded))
                    .col(ColumnDef::new(PlantCareActivities::SupportDetails).string_len(300))
                    .col(flag(PlantCareActivities::PestControlPerformed))
                    .col(ColumnDef::new(PlantCareActivities::PestDiseaseIdentified).string_len(300))
                    .col(ColumnDef::new(PlantCareActivities::TreatmentApplied).text())
                    .col(ColumnDef::new(PlantCareActivities::Temperature).double())
                    .col(ColumnDef::new(PlantCareActivities::Humidity).double())
                    .col(ColumnDef::new(PlantCareActivities::PhLevel).double())
                    .col(ColumnDef::new(PlantCareActivities::PlantHealthStatus).integer())
                    .col(ColumnDef::new(PlantCareActivities::PlantHeight).double())
                    .col(ColumnDef::new(PlantCareActivities::LeafCount).integer())
                    .col(flag(PlantCareActivities::IsFloweringFruiting))
                    .col(ColumnDef::new(PlantCareActivities::FloweringFruitingDetails).string_len(300))
                    .col(flag(PlantCareActivities::HarvestPerformed))
                    .col(ColumnDef::new(PlantCareActivities::HarvestAmount).string_len(100))
                    .col(ColumnDef::new(PlantCareActivities::HarvestQuality).integer())
                    .col(flag(PlantCareActivities::PlantRemoved))
                    .col(ColumnDef::new(PlantCareActivities::RemovalReason).text())
                    .col(ColumnDef::new(PlantCareActivities::ActivityDuration).integer())
                    .col(ColumnDef::new(PlantCareActivities::Notes).text())
                    .col(ColumnDef::new(PlantCareActivities::ImageData).binary())
                    .col(ColumnDef::new(PlantCareActivities::ImageType).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plant_care_activities_plant")
                            .from(PlantCareActivities::Table, PlantCareActivities::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plant_care_activities_user")
                            .from(PlantCareActivities::Table, PlantCareActivities::UserId)
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
                    .name("idx_garden_care_activities_garden_date")
                    .table(GardenCareActivities::Table)
                    .col(GardenCareActivities::GardenId)
                    .col(GardenCareActivities::ActivityDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plant_care_activities_plant_date")
                    .table(PlantCareActivities::Table)
                    .col(PlantCareActivities::PlantId)
                    .col(PlantCareActivities::ActivityDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlantCareActivities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GardenCareActivities::Table).to_owned())
            .await
    }
}

fn flag<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .default(false)
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
pub enum GardenCareActivities {
    Table,
    Id,
    GardenId,
    UserId,
    ActivityDate,
    ActivityType,
    PlantInspectionStatus,
    EquipmentInspectionStatus,
    WaterLevel,
    WateringPerformed,
    WaterAmountAdded,
    NutrientsAdded,
    NutrientType,
    NutrientAmount,
    NewPlantingsAdded,
    NumberOfPlantsAdded,
    PlantTypesAdded,
    WeedingPerformed,
    WeedingDuration,
    PruningPerformed,
    PruningNotes,
    PestControlPerformed,
    PestControlDetails,
    PhLevel,
    EcLevel,
    GardenStatus,
    ActivityDuration,
    Notes,
    ImageData,
    ImageType,
}

#[derive(DeriveIden)]
enum PlantCareActivities {
    Table,
    Id,
    PlantId,
    UserId,
    ActivityDate,
    ActivityType,
    PlantingDepth,
    PlantingMethod,
    GrowingMedium,
    WateringPerformed,
    WaterAmount,
    MoistureLevel,
    FertilizerApplied,
    FertilizerType,
    FertilizerAmount,
    NpkRatio,
    LightHours,
    LightSource,
    LightIntensity,
    PruningPerformed,
    PruningDetails,
    SupportAdded,
    SupportDetails,
    PestControlPerformed,
    PestDiseaseIdentified,
    TreatmentApplied,
    Temperature,
    Humidity,
    PhLevel,
    PlantHealthStatus,
    PlantHeight,
    LeafCount,
    IsFloweringFruiting,
    FloweringFruitingDetails,
    HarvestPerformed,
    HarvestAmount,
    HarvestQuality,
    PlantRemoved,
    RemovalReason,
    ActivityDuration,
    Notes,
    ImageData,
    ImageType,
}
