use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{GardenType, GrowMethod, Location};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "gardens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: Location,
    pub garden_type: GardenType,
    pub grow_method: GrowMethod,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub image_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::plant::Entity")]
    Plant,
    #[sea_orm(has_many = "super::equipment::Entity")]
    Equipment,
    #[sea_orm(has_many = "super::daily_record::Entity")]
    DailyRecord,
    #[sea_orm(has_many = "super::journal_entry::Entity")]
    JournalEntry,
    #[sea_orm(has_many = "super::garden_care_activity::Entity")]
    GardenCareActivity,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl Related<super::daily_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyRecord.def()
    }
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntry.def()
    }
}

impl Related<super::garden_care_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GardenCareActivity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
