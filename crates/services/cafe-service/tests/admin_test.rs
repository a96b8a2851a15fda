//! Admin batches and the unit of work.

mod support;

use std::sync::Arc;

use cafe_service_lib::infra::{Persistence, UnitOfWork};
use cafe_service_lib::repository::entities::CafeEntity;
use cafe_service_lib::repository::{CafeRepository, ReviewRepository};
use cafe_service_lib::service::{AdminManager, AdminService};
use cafe_service_lib::with_transaction;
use common::AppError;
use domain::{EntityKind, Scope};

use support::Catalog;

fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

async fn seeded() -> (Catalog, AdminManager<Persistence>) {
    let catalog = Catalog::new().await;
    catalog.region(1).await;
    catalog.cafe(10, 1).await;
    catalog.cafe(11, 1).await;
    catalog.review(10, None).await;

    let admin = AdminManager::new(Arc::new(Persistence::new(catalog.db.clone())));
    (catalog, admin)
}

#[tokio::test]
async fn test_batch_soft_delete_and_restore() {
    let (catalog, admin) = seeded().await;

    let outcome = admin
        .soft_delete(EntityKind::Cafe, keys(&["10", "11"]))
        .await
        .unwrap();
    assert_eq!(outcome.kind, EntityKind::Cafe);
    assert_eq!(outcome.records, 2);
    assert_eq!(outcome.cascaded, 1);
    assert!(catalog.cafes.list(Scope::Active).await.unwrap().is_empty());

    let outcome = admin.restore(EntityKind::Cafe, keys(&["10", "11"])).await.unwrap();
    assert_eq!(outcome.records, 2);
    assert_eq!(catalog.cafes.list(Scope::Active).await.unwrap().len(), 2);
    assert_eq!(catalog.reviews.list(Scope::Active).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_batch_rolls_back_on_missing_key() {
    let (catalog, admin) = seeded().await;

    let result = admin.soft_delete(EntityKind::Cafe, keys(&["10", "999"])).await;

    assert!(matches!(result, Err(AppError::NotFound)));
    let cafe = catalog.cafes.find_by_id(10, Scope::All).await.unwrap().unwrap();
    assert!(cafe.is_active());
    assert_eq!(catalog.reviews.list(Scope::Active).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_batch_rejects_malformed_key() {
    let (catalog, admin) = seeded().await;

    let result = admin.soft_delete(EntityKind::User, keys(&["10"])).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = admin.hard_delete(EntityKind::Cafe, keys(&["ten"])).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(catalog.cafes.list(Scope::All).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_batch_rejects_empty_keys() {
    let (_catalog, admin) = seeded().await;

    let result = admin.restore(EntityKind::Region, Vec::new()).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_batch_hard_delete() {
    let (catalog, admin) = seeded().await;

    let outcome = admin.hard_delete(EntityKind::Region, keys(&["1"])).await.unwrap();

    assert_eq!(outcome.records, 1);
    assert!(catalog.cafes.list(Scope::All).await.unwrap().is_empty());
    assert!(catalog.reviews.list(Scope::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_batch_hard_delete_with_repeated_key() {
    let (catalog, admin) = seeded().await;

    let outcome = admin.hard_delete(EntityKind::Cafe, keys(&["10", "10"])).await.unwrap();

    assert_eq!(outcome.records, 1);
    assert!(catalog.cafes.find_by_id(10, Scope::All).await.unwrap().is_none());
    assert_eq!(catalog.cafes.list(Scope::All).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_inactive_as_json() {
    let (_catalog, admin) = seeded().await;
    admin.soft_delete(EntityKind::Cafe, keys(&["11"])).await.unwrap();

    let json = admin.list_inactive(EntityKind::Cafe).await.unwrap();

    let records = json.as_array().expect("array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 11);
    assert_eq!(records[0]["is_active"], false);
    assert!(records[0]["deleted_at"].is_string());

    let json = admin.list_inactive(EntityKind::Review).await.unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_transaction_rolls_back_on_error() {
    let (catalog, _admin) = seeded().await;
    let uow = Persistence::new(catalog.db.clone());

    let result: Result<(), AppError> = with_transaction!(uow, |ctx| {
        ctx.store::<CafeEntity>().delete(10).await?;
        Err::<(), _>(AppError::internal("abort"))
    });

    assert!(result.is_err());
    let cafe = catalog.cafes.find_by_id(10, Scope::Active).await.unwrap();
    assert!(cafe.is_some());
    assert_eq!(catalog.reviews.list(Scope::Active).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_transaction_commits_on_success() {
    let (catalog, _admin) = seeded().await;
    let uow = Persistence::new(catalog.db.clone());

    let deleted = with_transaction!(uow, |ctx| {
        let outcome = ctx.store::<CafeEntity>().delete(10).await?;
        Ok::<_, AppError>(outcome.cascaded.total())
    })
    .unwrap();

    assert_eq!(deleted, 1);
    assert!(uow.cafes().find_by_id(10, Scope::Active).await.unwrap().is_none());
}
