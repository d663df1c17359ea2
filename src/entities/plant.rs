use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{GrowMethod, LightingRequirement, PlantCondition, PlantType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub garden_id: i32,
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub plant_type: PlantType,
    pub lighting_requirement: LightingRequirement,
    pub grow_method: GrowMethod,
    pub date_planted: DateTimeUtc,
    pub condition: Option<PlantCondition>,
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
    #[sea_orm(has_many = "super::plant_care_activity::Entity")]
    PlantCareActivity,
}

impl Related<super::garden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Garden.def()
    }
}

impl Related<super::plant_care_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlantCareActivity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
