//! Store service tests against mock repositories.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use store_ratings::domain::UserRole;
use store_ratings::errors::AppError;
use store_ratings::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
use store_ratings::services::{StoreManager, StoreService};
use store_ratings::types::StoreListQuery;

use common::{test_rating, test_store, test_user, TestUnitOfWork};

fn service_with(
    users: MockUserRepository,
    stores: MockStoreRepository,
    ratings: MockRatingRepository,
) -> StoreManager<TestUnitOfWork> {
    StoreManager::new(Arc::new(TestUnitOfWork::new(users, stores, ratings)))
}

#[tokio::test]
async fn list_stores_attaches_aggregates_and_own_rating() {
    let store_id = Uuid::new_v4();
    let me = Uuid::new_v4();
    let someone_else = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_list()
        .returning(move |_| Ok((vec![test_store(store_id, None)], 1)));

    let my_rating = test_rating(me, store_id, 2);
    let my_rating_id = my_rating.id;
    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_stores().returning(move |_| {
        Ok(vec![
            my_rating.clone(),
            test_rating(someone_else, store_id, 5),
        ])
    });

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let (summaries, total) = service
        .list_stores(&StoreListQuery::default(), Some(me))
        .await
        .unwrap();

    assert_eq!(total, 1);
    let summary = &summaries[0];
    assert_eq!(summary.average_rating.as_deref(), Some("3.5"));
    assert_eq!(summary.total_ratings, 2);
    assert_eq!(summary.user_rating, Some(2));
    assert_eq!(summary.user_rating_id, Some(my_rating_id));
}

#[tokio::test]
async fn list_stores_without_caller_has_no_own_rating() {
    let store_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_list()
        .returning(move |_| Ok((vec![test_store(store_id, None)], 1)));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_stores().returning(|_| Ok(vec![]));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let (summaries, _) = service
        .list_stores(&StoreListQuery::default(), None)
        .await
        .unwrap();

    assert_eq!(summaries[0].user_rating, None);
    assert_eq!(summaries[0].average_rating, None);
    assert_eq!(summaries[0].total_ratings, 0);
}

#[tokio::test]
async fn get_store_resolves_owner_and_raters() {
    let store_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();
    let rater_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .with(eq(store_id))
        .returning(move |id| Ok(Some(test_store(id, Some(owner_id)))));

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_list_for_store()
        .returning(move |sid| Ok(vec![test_rating(rater_id, sid, 4)]));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(owner_id))
        .returning(|id| Ok(Some(test_user(id, UserRole::StoreOwner))));
    users
        .expect_find_by_ids()
        .returning(|ids| Ok(ids.iter().map(|id| test_user(*id, UserRole::User)).collect()));

    let service = service_with(users, stores, ratings);
    let detail = service.get_store(store_id).await.unwrap();

    assert_eq!(detail.id, store_id);
    assert_eq!(detail.owner.unwrap().id, owner_id);
    assert_eq!(detail.ratings.len(), 1);
    assert_eq!(detail.ratings[0].user.id, rater_id);
    assert_eq!(detail.average_rating.as_deref(), Some("4.0"));
    assert_eq!(detail.total_ratings, 1);
}

#[tokio::test]
async fn get_store_not_found() {
    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service.get_store(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("Store")));
}

#[tokio::test]
async fn my_store_requires_an_assigned_store() {
    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_owner().returning(|_| Ok(None));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service.my_store(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("Store")));
}

#[tokio::test]
async fn create_store_rejects_duplicate_email() {
    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_store(Uuid::new_v4(), None))));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service
        .create_store(
            "Shop".to_string(),
            "taken@example.com".to_string(),
            "3 Lane".to_string(),
            None,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn create_store_rejects_unknown_owner() {
    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_email().returning(|_| Ok(None));

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(users, stores, MockRatingRepository::new());
    let result = service
        .create_store(
            "Shop".to_string(),
            "shop@example.com".to_string(),
            "3 Lane".to_string(),
            Some(Uuid::new_v4()),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn create_store_rejects_owner_with_existing_store() {
    let owner_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_email().returning(|_| Ok(None));
    stores
        .expect_find_by_owner()
        .with(eq(owner_id))
        .returning(|id| Ok(Some(test_store(Uuid::new_v4(), Some(id)))));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, UserRole::User))));

    let service = service_with(users, stores, MockRatingRepository::new());
    let result = service
        .create_store(
            "Shop".to_string(),
            "shop@example.com".to_string(),
            "3 Lane".to_string(),
            Some(owner_id),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn create_unowned_store_returns_empty_detail() {
    let store_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_email().returning(|_| Ok(None));
    stores
        .expect_create()
        .returning(move |_, _, _| Ok(test_store(store_id, None)));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_store().returning(|_| Ok(vec![]));

    let mut users = MockUserRepository::new();
    users.expect_find_by_ids().returning(|_| Ok(vec![]));

    let service = service_with(users, stores, ratings);
    let detail = service
        .create_store(
            "Shop".to_string(),
            "shop@example.com".to_string(),
            "3 Lane".to_string(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(detail.id, store_id);
    assert!(detail.owner.is_none());
    assert!(detail.ratings.is_empty());
    assert_eq!(detail.average_rating, None);
}
