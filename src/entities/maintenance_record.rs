use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::MaintenanceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "maintenance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment_id: i32,
    pub status: MaintenanceStatus,
    pub request_date: DateTimeUtc,
    pub maintenance_start_date: Option<DateTimeUtc>,
    pub maintenance_end_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub requested_by_user_id: i32,
}

impl Model {
    /// Time the equipment spent out of service, once both ends are known.
    pub fn downtime(&self) -> Option<chrono::Duration> {
        match (self.maintenance_start_date, self.maintenance_end_date) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Equipment,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
