//! Rating database entity for SeaORM.
//!
//! The `(user_id, store_id)` pair carries a unique index (created in
//! the ratings migration); concurrent inserts for the same pair are
//! resolved by the database, not by application logic.

use sea_orm::entity::prelude::*;

use crate::domain::Rating;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub rating: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Rating {
    fn from(model: Model) -> Self {
        Rating {
            id: model.id,
            user_id: model.user_id,
            store_id: model.store_id,
            value: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
