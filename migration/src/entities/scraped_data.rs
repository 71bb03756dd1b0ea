use sea_orm::entity::prelude::*;

/// One ingested article. Rows are written by the external scraper and are
/// read-only to this service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "scraped_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub link_href: String,
    pub site_name: String,
    pub category: String,
    pub res_date: Date,
    /// JSON document produced by the scraper; its `province` key holds the
    /// semi-structured province value (string, delimited string or array).
    #[sea_orm(column_type = "Text")]
    pub res_data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
