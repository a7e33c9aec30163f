//! User service tests against mock repositories.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use store_ratings::domain::{Password, UserRole};
use store_ratings::errors::AppError;
use store_ratings::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
use store_ratings::services::{UserManager, UserService};
use store_ratings::types::UserListQuery;

use common::{test_rating, test_store, test_user, TestUnitOfWork};

fn service_with(
    users: MockUserRepository,
    stores: MockStoreRepository,
    ratings: MockRatingRepository,
) -> UserManager<TestUnitOfWork> {
    UserManager::new(Arc::new(TestUnitOfWork::new(users, stores, ratings)))
}

#[tokio::test]
async fn get_user_attaches_owned_store_with_derived_average() {
    let user_id = Uuid::new_v4();
    let store_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(move |id| Ok(Some(test_user(id, UserRole::StoreOwner))));

    let mut stores = MockStoreRepository::new();
    stores
        .expect_find_by_owner_ids()
        .returning(move |_| Ok(vec![test_store(store_id, Some(user_id))]));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_stores().returning(move |_| {
        Ok(vec![
            test_rating(Uuid::new_v4(), store_id, 5),
            test_rating(Uuid::new_v4(), store_id, 4),
        ])
    });

    let service = service_with(users, stores, ratings);
    let result = service.get_user(user_id).await.unwrap();

    assert_eq!(result.user.id, user_id);
    let store = result.store.unwrap();
    assert_eq!(store.id, store_id);
    assert_eq!(store.average_rating.as_deref(), Some("4.5"));
}

#[tokio::test]
async fn get_user_without_store_has_no_store_summary() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, UserRole::User))));

    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_owner_ids().returning(|_| Ok(vec![]));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_stores().returning(|_| Ok(vec![]));

    let service = service_with(users, stores, ratings);
    let result = service.get_user(user_id).await.unwrap();

    assert!(result.store.is_none());
}

#[tokio::test]
async fn get_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service_with(
        users,
        MockStoreRepository::new(),
        MockRatingRepository::new(),
    );
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("User")));
}

#[tokio::test]
async fn list_users_returns_page_and_total() {
    let mut users = MockUserRepository::new();
    users.expect_list().returning(|_| {
        Ok((
            vec![
                test_user(Uuid::new_v4(), UserRole::User),
                test_user(Uuid::new_v4(), UserRole::Admin),
            ],
            27,
        ))
    });

    let mut stores = MockStoreRepository::new();
    stores.expect_find_by_owner_ids().returning(|_| Ok(vec![]));

    let mut ratings = MockRatingRepository::new();
    ratings.expect_list_for_stores().returning(|_| Ok(vec![]));

    let service = service_with(users, stores, ratings);
    let (page, total) = service.list_users(&UserListQuery::default()).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(total, 27);
}

#[tokio::test]
async fn create_user_hashes_the_password() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|_, _, hash, _, role| {
            *role == UserRole::Admin && Password::from_hash(hash.clone()).verify("Admin@123")
        })
        .returning(|name, email, hash, address, role| {
            let mut user = test_user(Uuid::new_v4(), role);
            user.name = name;
            user.email = email;
            user.password_hash = hash;
            user.address = address;
            Ok(user)
        });

    let service = service_with(
        users,
        MockStoreRepository::new(),
        MockRatingRepository::new(),
    );
    let user = service
        .create_user(
            "Admin Person".to_string(),
            "admin2@example.com".to_string(),
            "Admin@123".to_string(),
            "5 Admin Road".to_string(),
            UserRole::Admin,
        )
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Admin);
    assert_ne!(user.password_hash, "Admin@123");
}

#[tokio::test]
async fn create_user_rejects_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4(), UserRole::User))));

    let service = service_with(
        users,
        MockStoreRepository::new(),
        MockRatingRepository::new(),
    );
    let result = service
        .create_user(
            "Someone".to_string(),
            "taken@example.com".to_string(),
            "Secret@123".to_string(),
            "1 Street".to_string(),
            UserRole::User,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}
