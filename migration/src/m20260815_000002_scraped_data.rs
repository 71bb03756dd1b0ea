use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapedData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapedData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapedData::Title).text().not_null())
                    .col(ColumnDef::new(ScrapedData::LinkHref).text().not_null())
                    .col(ColumnDef::new(ScrapedData::SiteName).string().not_null())
                    .col(ColumnDef::new(ScrapedData::Category).string().not_null())
                    .col(ColumnDef::new(ScrapedData::ResDate).date().not_null())
                    .col(ColumnDef::new(ScrapedData::ResData).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Date range is the primary filter of every dashboard request
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scraped_data_res_date")
                    .table(ScrapedData::Table)
                    .col(ScrapedData::ResDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scraped_data_category")
                    .table(ScrapedData::Table)
                    .col(ScrapedData::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_scraped_data_category").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_scraped_data_res_date").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ScrapedData::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ScrapedData {
    Table,
    Id,
    Title,
    LinkHref,
    SiteName,
    Category,
    ResDate,
    ResData,
}
