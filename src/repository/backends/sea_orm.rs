use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use tracing::info;

use crate::config::{Config, ResolverMode};
use crate::core::aggregate::outlet_key;
use crate::core::resolver::{candidates, matches_province};
use crate::errors::{NewswatchError, Result};
use crate::repository::models::{DateRange, NewsRecord, ProvinceRow, RegionRow, RegionStat};
use crate::repository::{NewsFilter, NewsStore};

use migration::{Migrator, MigratorTrait, entities::province, entities::region,
    entities::scraped_data};

/// sea-orm backed store. The connection pool is built once here and owned by
/// this value; handlers receive it behind `Arc<dyn NewsStore>`.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    resolver_mode: ResolverMode,
}

impl SeaOrmStore {
    pub async fn connect(config: &Config) -> Result<Self> {
        let database_url = &config.database.database_url;
        if database_url.is_empty() {
            return Err(NewswatchError::database_config("DATABASE_URL is empty"));
        }

        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(config.database.max_connections)
            .min_connections(1)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| NewswatchError::database_connection(format!("connect failed: {}", e)))?;

        let store = SeaOrmStore {
            db,
            resolver_mode: config.resolver_mode,
        };
        store.run_migrations().await?;

        info!("news store initialized ({} pooled connections max)", config.database.max_connections);
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| NewswatchError::database_operation(format!("migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Outlet and province filters are resolved in memory after the SQL date
    /// filter: outlet is a derived prefix and province matching is the
    /// resolver's containment heuristic, neither of which ports across the
    /// supported SQL backends.
    fn apply_memory_filter(&self, records: Vec<NewsRecord>, filter: &NewsFilter) -> Vec<NewsRecord> {
        match filter {
            NewsFilter::Outlet(outlet) => records
                .into_iter()
                .filter(|r| outlet_key(&r.site_name) == outlet)
                .collect(),
            NewsFilter::Province(name) => records
                .into_iter()
                .filter(|r| {
                    candidates(&r.province_field)
                        .iter()
                        .any(|c| matches_province(c, name, self.resolver_mode))
                })
                .collect(),
            _ => records,
        }
    }
}

#[async_trait::async_trait]
impl NewsStore for SeaOrmStore {
    async fn fetch_news(
        &self,
        range: Option<&DateRange>,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsRecord>> {
        let mut query = scraped_data::Entity::find();

        match filter {
            // Explicit id lists bypass the date range (drill-down carve-out).
            NewsFilter::Ids(ids) => {
                query = query.filter(scraped_data::Column::Id.is_in(ids.iter().copied()));
            }
            other => {
                if let Some(range) = range {
                    query = query
                        .filter(scraped_data::Column::ResDate.gte(range.start))
                        .filter(scraped_data::Column::ResDate.lte(range.end));
                }
                if let NewsFilter::Category(category) = other {
                    query = query.filter(scraped_data::Column::Category.eq(category.clone()));
                }
            }
        }

        let models = query
            .order_by_asc(scraped_data::Column::Id)
            .all(&self.db)
            .await?;

        let records = models.into_iter().map(NewsRecord::from_model).collect();
        Ok(self.apply_memory_filter(records, filter))
    }

    async fn regions(&self) -> Result<Vec<RegionRow>> {
        let models = region::Entity::find()
            .filter(region::Column::Status.eq(1))
            .order_by_asc(region::Column::Sort)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(RegionRow::from).collect())
    }

    async fn provinces(&self, region_id: Option<i32>) -> Result<Vec<ProvinceRow>> {
        let mut query = province::Entity::find();
        if let Some(region_id) = region_id {
            query = query.filter(province::Column::RegionId.eq(region_id));
        }

        let models = query
            .order_by_asc(province::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ProvinceRow::from).collect())
    }

    async fn region_statistics(&self) -> Result<Vec<RegionStat>> {
        let regions = region::Entity::find()
            .filter(region::Column::Status.eq(1))
            .order_by_asc(region::Column::Sort)
            .all(&self.db)
            .await?;

        let provinces = province::Entity::find()
            .filter(province::Column::Status.eq(1))
            .all(&self.db)
            .await?;

        Ok(regions
            .into_iter()
            .map(|r| {
                let province_count = provinces
                    .iter()
                    .filter(|p| p.region_id == r.region_id)
                    .count() as i64;
                RegionStat {
                    region_id: r.region_id,
                    region_name: r.name,
                    province_count,
                }
            })
            .collect())
    }
}
