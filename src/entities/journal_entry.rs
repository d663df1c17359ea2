use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub garden_id: i32,
    pub user_id: i32,
    pub entry_date: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub content: String,
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
