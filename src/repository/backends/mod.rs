pub mod sea_orm;

pub use sea_orm::SeaOrmStore;
