use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Region::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Region::RegionId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Region::Name).string().not_null())
                    .col(
                        ColumnDef::new(Region::Sort)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Region::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Province::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Province::ProvinceId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Province::Name).string().not_null())
                    .col(ColumnDef::new(Province::RegionId).integer().not_null())
                    .col(
                        ColumnDef::new(Province::ProvinceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Province::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_provinces_region_id")
                    .table(Province::Table)
                    .col(Province::RegionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_provinces_region_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Province::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Region::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Region {
    #[sea_orm(iden = "regions")]
    Table,
    RegionId,
    Name,
    Sort,
    Status,
}

#[derive(DeriveIden)]
enum Province {
    #[sea_orm(iden = "provinces")]
    Table,
    ProvinceId,
    Name,
    RegionId,
    ProvinceNo,
    Status,
}
