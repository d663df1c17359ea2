use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{
    HarvestQuality, LightIntensity, LightSource, MoistureLevel, PlantCareActivityType,
    PlantHealthStatus,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "plant_care_activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub plant_id: i32,
    pub user_id: i32,
    pub activity_date: DateTimeUtc,
    pub activity_type: PlantCareActivityType,
    pub planting_depth: Option<f64>,
    pub planting_method: Option<String>,
    pub growing_medium: Option<String>,
    pub watering_performed: bool,
    pub water_amount: Option<f64>,
    pub moisture_level: Option<MoistureLevel>,
    pub fertilizer_applied: bool,
    pub fertilizer_type: Option<String>,
    pub fertilizer_amount: Option<f64>,
    pub npk_ratio: Option<String>,
    pub light_hours: Option<f64>,
    pub light_source: Option<LightSource>,
    pub light_intensity: Option<LightIntensity>,
    pub pruning_performed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub pruning_details: Option<String>,
    pub support_added: bool,
    pub support_details: Option<String>,
    pub pest_control_performed: bool,
    pub pest_disease_identified: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub treatment_applied: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph_level: Option<f64>,
    pub plant_health_status: Option<PlantHealthStatus>,
    pub plant_height: Option<f64>,
    pub leaf_count: Option<i32>,
    pub is_flowering_fruiting: bool,
    pub flowering_fruiting_details: Option<String>,
    pub harvest_performed: bool,
    pub harvest_amount: Option<String>,
    pub harvest_quality: Option<HarvestQuality>,
    pub plant_removed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub removal_reason: Option<String>,
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
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Plant,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
