//! Migration: Create reviews, cafe_likes and review_likes tables.

use domain::Relation;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use super::referential_action;

use super::m20240531_000001_create_users_table::Users;
use super::m20240531_000002_create_regions_and_cafes::Cafes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(serial_key(manager, Reviews::Id))
                    .col(ColumnDef::new(Reviews::UserId).uuid().null())
                    .col(ColumnDef::new(Reviews::CafeId).integer().not_null())
                    .col(ColumnDef::new(Reviews::Body).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::Crawled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    // Reviews outlive a hard deleted author (SET NULL)
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(referential_action(Relation::UserReviews)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_cafe_id")
                            .from(Reviews::Table, Reviews::CafeId)
                            .to(Cafes::Table, Cafes::Id)
                            .on_delete(referential_action(Relation::CafeReviews)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CafeLikes::Table)
                    .if_not_exists()
                    .col(serial_key(manager, CafeLikes::Id))
                    .col(ColumnDef::new(CafeLikes::CafeId).integer().not_null())
                    .col(ColumnDef::new(CafeLikes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CafeLikes::LikedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CafeLikes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CafeLikes::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CafeLikes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafe_likes_cafe_id")
                            .from(CafeLikes::Table, CafeLikes::CafeId)
                            .to(Cafes::Table, Cafes::Id)
                            .on_delete(referential_action(Relation::CafeLikes)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafe_likes_user_id")
                            .from(CafeLikes::Table, CafeLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(referential_action(Relation::UserCafeLikes)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewLikes::Table)
                    .if_not_exists()
                    .col(serial_key(manager, ReviewLikes::Id))
                    .col(ColumnDef::new(ReviewLikes::ReviewId).big_integer().not_null())
                    .col(ColumnDef::new(ReviewLikes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ReviewLikes::LikedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewLikes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewLikes::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ReviewLikes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_likes_review_id")
                            .from(ReviewLikes::Table, ReviewLikes::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(referential_action(Relation::ReviewLikes)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_likes_user_id")
                            .from(ReviewLikes::Table, ReviewLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(referential_action(Relation::UserReviewLikes)),
                    )
                    .to_owned(),
            )
            .await?;

        // One like per user and target
        manager
            .create_index(
                Index::create()
                    .name("idx_cafe_likes_cafe_user")
                    .table(CafeLikes::Table)
                    .col(CafeLikes::CafeId)
                    .col(CafeLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_likes_review_user")
                    .table(ReviewLikes::Table)
                    .col(ReviewLikes::ReviewId)
                    .col(ReviewLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        index(manager, "idx_reviews_cafe_id", Reviews::Table, Reviews::CafeId).await?;
        index(manager, "idx_reviews_user_id", Reviews::Table, Reviews::UserId).await?;
        index(manager, "idx_reviews_is_active", Reviews::Table, Reviews::IsActive).await?;
        index(manager, "idx_cafe_likes_user_id", CafeLikes::Table, CafeLikes::UserId).await?;
        index(manager, "idx_cafe_likes_is_active", CafeLikes::Table, CafeLikes::IsActive).await?;
        index(manager, "idx_review_likes_user_id", ReviewLikes::Table, ReviewLikes::UserId).await?;
        index(
            manager,
            "idx_review_likes_is_active",
            ReviewLikes::Table,
            ReviewLikes::IsActive,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewLikes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CafeLikes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

/// Auto-increment 64-bit key.
///
/// SQLite only accepts AUTOINCREMENT on an `INTEGER PRIMARY KEY`, which is
/// 64-bit there already.
fn serial_key<T: Iden + 'static>(manager: &SchemaManager<'_>, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match manager.get_database_backend() {
        DatabaseBackend::Sqlite => def.integer(),
        _ => def.big_integer(),
    };
    def.not_null().auto_increment().primary_key();
    def
}

async fn index<T, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    column: C,
) -> Result<(), DbErr>
where
    T: Iden + 'static,
    C: Iden + 'static,
{
    manager
        .create_index(Index::create().name(name).table(table).col(column).to_owned())
        .await
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    UserId,
    CafeId,
    Body,
    Crawled,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    IsActive,
}

#[derive(Iden)]
enum CafeLikes {
    Table,
    Id,
    CafeId,
    UserId,
    LikedAt,
    UpdatedAt,
    DeletedAt,
    IsActive,
}

#[derive(Iden)]
enum ReviewLikes {
    Table,
    Id,
    ReviewId,
    UserId,
    LikedAt,
    UpdatedAt,
    DeletedAt,
    IsActive,
}
