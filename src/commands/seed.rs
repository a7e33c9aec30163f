//! Seed command - Loads sample data for local development.
//!
//! Idempotent: every record is looked up by its natural key (email,
//! rating pair) before insertion, so the command can be re-run.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Password, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence, UnitOfWork};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Seeding database...");

    let db = Database::connect(&config).await;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let admin = seed_user(
        &uow,
        "System Administrator Account",
        "admin@storereviewer.com",
        "Admin@123",
        "123 Admin Street, Admin City, Admin Country",
        UserRole::Admin,
    )
    .await?;
    tracing::info!("Admin user ready: {}", admin.1);

    let john = seed_user(
        &uow,
        "John Doe Regular User",
        "john.doe@example.com",
        "User@123",
        "456 User Lane, User City, User Country",
        UserRole::User,
    )
    .await?;

    let jane = seed_user(
        &uow,
        "Jane Smith Regular User",
        "jane.smith@example.com",
        "User@123",
        "789 Customer Road, Customer Town, Customer State",
        UserRole::User,
    )
    .await?;

    let tech_store = seed_owned_store(
        &uow,
        (
            "Tech Store Owner Account",
            "owner1@techstore.com",
            "100 Tech Avenue, Silicon Valley, California",
        ),
        (
            "Tech Gadgets Electronics Store",
            "contact@techstore.com",
            "100 Tech Avenue, Silicon Valley, California, USA 94000",
        ),
    )
    .await?;

    let fashion_store = seed_owned_store(
        &uow,
        (
            "Fashion Hub Store Owner",
            "owner2@fashionhub.com",
            "200 Fashion Street, New York City, New York",
        ),
        (
            "Fashion Hub Clothing Store",
            "contact@fashionhub.com",
            "200 Fashion Street, New York City, New York, USA 10001",
        ),
    )
    .await?;

    let book_store = seed_owned_store(
        &uow,
        (
            "Bookworm Paradise Store Owner",
            "owner3@bookworm.com",
            "300 Literary Lane, Boston, Massachusetts",
        ),
        (
            "Bookworm Paradise Bookstore",
            "contact@bookworm.com",
            "300 Literary Lane, Boston, Massachusetts, USA 02101",
        ),
    )
    .await?;

    seed_rating(&uow, john.0, tech_store, 5).await?;
    seed_rating(&uow, john.0, fashion_store, 4).await?;
    seed_rating(&uow, jane.0, tech_store, 4).await?;
    seed_rating(&uow, jane.0, book_store, 5).await?;

    tracing::info!("Database seeding completed");
    Ok(())
}

/// Find-or-create a user by email; returns `(id, email)`
async fn seed_user(
    uow: &Arc<Persistence>,
    name: &str,
    email: &str,
    password: &str,
    address: &str,
    role: UserRole,
) -> AppResult<(Uuid, String)> {
    if let Some(existing) = uow.users().find_by_email(email).await? {
        return Ok((existing.id, existing.email));
    }

    let password_hash = Password::new(password)?.into_string();
    let user = uow
        .users()
        .create(
            name.to_string(),
            email.to_string(),
            password_hash,
            address.to_string(),
            role,
        )
        .await?;

    tracing::info!("Created user: {}", user.email);
    Ok((user.id, user.email))
}

/// Find-or-create a store together with its owning user
async fn seed_owned_store(
    uow: &Arc<Persistence>,
    owner: (&str, &str, &str),
    store: (&str, &str, &str),
) -> AppResult<Uuid> {
    let (owner_name, owner_email, owner_address) = owner;
    let (store_name, store_email, store_address) = store;

    let (owner_id, _) = seed_user(
        uow,
        owner_name,
        owner_email,
        "Owner@123",
        owner_address,
        UserRole::StoreOwner,
    )
    .await?;

    if let Some(existing) = uow.stores().find_by_email(store_email).await? {
        return Ok(existing.id);
    }

    let name = store_name.to_string();
    let email = store_email.to_string();
    let address = store_address.to_string();
    let created = uow
        .transaction(move |ctx| {
            Box::pin(async move {
                ctx.users().set_role(owner_id, UserRole::StoreOwner).await?;
                ctx.stores().create(name, email, address, Some(owner_id)).await
            })
        })
        .await?;

    tracing::info!("Created store: {}", created.name);
    Ok(created.id)
}

/// Insert a rating unless the user has already rated the store
async fn seed_rating(
    uow: &Arc<Persistence>,
    user_id: Uuid,
    store_id: Uuid,
    value: i32,
) -> AppResult<()> {
    if uow
        .ratings()
        .find_by_user_and_store(user_id, store_id)
        .await?
        .is_some()
    {
        return Ok(());
    }

    uow.ratings()
        .create(user_id, store_id, value)
        .await
        .map(|_| ())
        .or_else(|e| match e {
            // Lost a race with another seeder run
            AppError::Conflict(_) => Ok(()),
            other => Err(other),
        })
}
