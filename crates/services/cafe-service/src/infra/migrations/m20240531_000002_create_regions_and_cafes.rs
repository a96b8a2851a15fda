//! Migration: Create regions and cafes tables.

use domain::Relation;
use sea_orm_migration::prelude::*;

use super::referential_action;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Regions::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Regions::CityCode).integer().not_null())
                    .col(ColumnDef::new(Regions::CityName).string_len(50).not_null())
                    .col(ColumnDef::new(Regions::CountyCode).integer().not_null())
                    .col(ColumnDef::new(Regions::CountyName).string_len(50).not_null())
                    .col(ColumnDef::new(Regions::TownCode).integer().not_null())
                    .col(ColumnDef::new(Regions::TownName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Regions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Regions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Regions::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Regions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cafes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cafes::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Cafes::RegionId).integer().not_null())
                    .col(ColumnDef::new(Cafes::CrawlId).string_len(50).null())
                    .col(
                        ColumnDef::new(Cafes::IsCrawled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cafes::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cafes::Wordcloud).text().null())
                    .col(ColumnDef::new(Cafes::Address).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Cafes::StudyFriendly)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cafes::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Cafes::Latitude).string_len(20).not_null())
                    .col(ColumnDef::new(Cafes::Longitude).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Cafes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cafes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cafes::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Cafes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafes_region_id")
                            .from(Cafes::Table, Cafes::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(referential_action(Relation::RegionCafes)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_regions_is_active")
                    .table(Regions::Table)
                    .col(Regions::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cafes_region_id")
                    .table(Cafes::Table)
                    .col(Cafes::RegionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cafes_is_active")
                    .table(Cafes::Table)
                    .col(Cafes::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cafes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Regions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Regions {
    Table,
    Id,
    CityCode,
    CityName,
    CountyCode,
    CountyName,
    TownCode,
    TownName,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    IsActive,
}

#[derive(Iden)]
pub enum Cafes {
    Table,
    Id,
    RegionId,
    CrawlId,
    IsCrawled,
    Name,
    Wordcloud,
    Address,
    StudyFriendly,
    Phone,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    IsActive,
}
