use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{EquipmentType, MaintenanceStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub garden_id: i32,
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub equipment_type: EquipmentType,
    pub purchase_date: DateTimeUtc,
    #[sea_orm(column_type = "Double")]
    pub purchase_price: f64,
    pub last_maintenance_date: Option<DateTimeUtc>,
    pub maintenance_status: MaintenanceStatus,
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
    #[sea_orm(has_many = "super::maintenance_record::Entity")]
    MaintenanceRecord,
}

impl Related<super::garden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Garden.def()
    }
}

impl Related<super::maintenance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
