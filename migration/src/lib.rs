pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260815_000001_reference_tables;
mod m20260815_000002_scraped_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_reference_tables::Migration),
            Box::new(m20260815_000002_scraped_data::Migration),
        ]
    }
}
