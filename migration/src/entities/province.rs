use sea_orm::entity::prelude::*;

/// Canonical province reference row. `name` is the vocabulary the province
/// resolver matches free-form scraper text against.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "provinces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub province_id: i32,
    pub name: String,
    pub region_id: i32,
    pub province_no: i32,
    pub status: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
