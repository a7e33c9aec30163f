//! Rating domain entity and derived-aggregate helpers.
//!
//! A rating links one user to one store; the `(user_id, store_id)`
//! pair is unique. Averages are computed from the raw values on
//! every read and are never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Rating domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_id: Uuid,
    /// Integer in [1, 5]
    pub value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity of the user who placed a rating
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RaterInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Rating as seen by a store owner: value plus rater identity
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithRater {
    pub id: Uuid,
    pub rating: i32,
    pub user: RaterInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Target store summary carried with a user's own ratings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatedStore {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

/// Rating as seen by its author: value plus the rated store
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithStore {
    pub id: Uuid,
    pub rating: i32,
    pub store: RatedStore,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Arithmetic mean of rating values formatted to exactly one decimal
/// digit, or `None` when there are no ratings.
pub fn average_rating(values: &[i32]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    let avg = sum as f64 / values.len() as f64;
    Some(format!("{:.1}", avg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_no_ratings_is_absent() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn average_has_exactly_one_decimal_digit() {
        assert_eq!(average_rating(&[5]).as_deref(), Some("5.0"));
        assert_eq!(average_rating(&[5, 3]).as_deref(), Some("4.0"));
        assert_eq!(average_rating(&[1, 3]).as_deref(), Some("2.0"));
        assert_eq!(average_rating(&[5, 4, 4]).as_deref(), Some("4.3"));
        assert_eq!(average_rating(&[1, 2]).as_deref(), Some("1.5"));
    }

    #[test]
    fn update_scenario_moves_the_average() {
        // alice rates 5, bob rates 3, alice updates to 1
        assert_eq!(average_rating(&[5]).as_deref(), Some("5.0"));
        assert_eq!(average_rating(&[5, 3]).as_deref(), Some("4.0"));
        assert_eq!(average_rating(&[1, 3]).as_deref(), Some("2.0"));
    }
}
