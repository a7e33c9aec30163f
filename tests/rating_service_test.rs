//! Rating service tests against mock repositories.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use store_ratings::domain::UserRole;
use store_ratings::errors::AppError;
use store_ratings::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
use store_ratings::services::{RatingDesk, RatingService};

use common::{test_rating, test_store, test_user, TestUnitOfWork};

fn service_with(
    users: MockUserRepository,
    stores: MockStoreRepository,
    ratings: MockRatingRepository,
) -> RatingDesk<TestUnitOfWork> {
    RatingDesk::new(Arc::new(TestUnitOfWork::new(users, stores, ratings)))
}

#[tokio::test]
async fn submit_records_a_first_rating() {
    let store_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, None))));

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_find_by_user_and_store()
        .returning(|_, _| Ok(None));
    ratings
        .expect_create()
        .with(eq(user_id), eq(store_id), eq(4))
        .returning(|uid, sid, value| Ok(test_rating(uid, sid, value)));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let rating = service.submit(user_id, store_id, 4).await.unwrap();

    assert_eq!(rating.value, 4);
    assert_eq!(rating.store_id, store_id);
}

#[tokio::test]
async fn submit_rejects_out_of_range_values() {
    let service = service_with(
        MockUserRepository::new(),
        MockStoreRepository::new(),
        MockRatingRepository::new(),
    );

    for value in [0, 6, -1] {
        let result = service.submit(Uuid::new_v4(), Uuid::new_v4(), value).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }
}

#[tokio::test]
async fn submit_requires_an_existing_store() {
    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service.submit(Uuid::new_v4(), Uuid::new_v4(), 3).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("Store")));
}

#[tokio::test]
async fn submit_conflicts_when_already_rated() {
    let store_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, None))));

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_find_by_user_and_store()
        .returning(move |uid, sid| Ok(Some(test_rating(uid, sid, 5))));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let result = service.submit(user_id, store_id, 3).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn update_revises_an_existing_rating() {
    let store_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, None))));

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_update_value()
        .with(eq(user_id), eq(store_id), eq(1))
        .returning(|uid, sid, value| Ok(test_rating(uid, sid, value)));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let rating = service.update(user_id, store_id, 1).await.unwrap();

    assert_eq!(rating.value, 1);
}

#[tokio::test]
async fn update_surfaces_missing_rating() {
    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, None))));

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_update_value()
        .returning(|_, _, _| Err(AppError::NotFound("Rating")));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let result = service.update(Uuid::new_v4(), Uuid::new_v4(), 3).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("Rating")));
}

#[tokio::test]
async fn store_ratings_is_gated_to_the_owner() {
    let store_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();
    let intruder_id = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, Some(owner_id)))));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service.store_ratings(store_id, intruder_id).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn store_ratings_for_missing_store_looks_like_forbidden() {
    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(
        MockUserRepository::new(),
        stores,
        MockRatingRepository::new(),
    );
    let result = service.store_ratings(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn store_ratings_resolves_raters_and_average() {
    let store_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();
    let rater_a = Uuid::new_v4();
    let rater_b = Uuid::new_v4();

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_store(id, Some(owner_id)))));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_store().returning(move |sid| {
        Ok(vec![test_rating(rater_a, sid, 5), test_rating(rater_b, sid, 2)])
    });

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .returning(|ids| Ok(ids.iter().map(|id| test_user(*id, UserRole::User)).collect()));

    let service = service_with(users, stores, ratings);
    let result = service.store_ratings(store_id, owner_id).await.unwrap();

    assert_eq!(result.total_ratings, 2);
    assert_eq!(result.average_rating.as_deref(), Some("3.5"));
    assert_eq!(result.ratings.len(), 2);
    assert_eq!(result.ratings[0].user.id, rater_a);
}

#[tokio::test]
async fn user_ratings_carries_store_identity() {
    let user_id = Uuid::new_v4();
    let store_id = Uuid::new_v4();

    let mut ratings = MockRatingRepository::new();
    ratings
        .expect_list_for_user()
        .with(eq(user_id))
        .returning(move |uid| Ok(vec![test_rating(uid, store_id, 3)]));

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_ids()
        .returning(|ids| Ok(ids.iter().map(|id| test_store(*id, None)).collect()));

    let service = service_with(MockUserRepository::new(), stores, ratings);
    let result = service.user_ratings(user_id).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rating, 3);
    assert_eq!(result[0].store.id, store_id);
}
