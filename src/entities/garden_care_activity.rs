use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{CareActivityType, EquipmentInspectionStatus, GardenStatus, PlantInspectionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "garden_care_activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub garden_id: i32,
    pub user_id: i32,
    pub activity_date: DateTimeUtc,
    pub activity_type: CareActivityType,
    pub plant_inspection_status: Option<PlantInspectionStatus>,
    pub equipment_inspection_status: Option<EquipmentInspectionStatus>,
    pub water_level: Option<f64>,
    pub watering_performed: bool,
    pub water_amount_added: Option<f64>,
    pub nutrients_added: bool,
    pub nutrient_type: Option<String>,
    pub nutrient_amount: Option<f64>,
    pub new_plantings_added: bool,
    pub number_of_plants_added: Option<i32>,
    pub plant_types_added: Option<String>,
    pub weeding_performed: bool,
    pub weeding_duration: Option<i32>,
    pub pruning_performed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub pruning_notes: Option<String>,
    pub pest_control_performed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub pest_control_details: Option<String>,
    pub ph_level: Option<f64>,
    pub ec_level: Option<f64>,
    pub garden_status: Option<GardenStatus>,
    pub activity_duration: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub image_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::garden::Entity",
        from = "Column::GardenId",
        to = "super::garden::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Garden,
}

impl Related<super::garden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Garden.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
