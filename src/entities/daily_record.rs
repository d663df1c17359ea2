use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "daily_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub garden_id: i32,
    pub user_id: i32,
    pub created_date: DateTimeUtc,
    pub inside_temperature: f64,
    pub outside_temperature: f64,
    pub inside_humidity: f64,
    pub outside_humidity: f64,
    pub inside_vpd: f64,
    pub outside_vpd: f64,
    pub lighting_on: f64,
    pub lighting_off: f64,
    pub lighting_intensity: i32,
    pub water_amount: f64,
    pub nutrient_amount: f64,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
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
