//! Favourite bookmarks linking users to dishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DishId, FavouriteId, UserId};

/// A user's bookmark on a dish. At most one exists per `(user, dish)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub id: FavouriteId,
    pub user_id: UserId,
    pub dish_id: DishId,
    pub created_at: DateTime<Utc>,
}

impl Favourite {
    /// Create a new bookmark stamped with `created_at`.
    pub fn new(user_id: UserId, dish_id: DishId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: FavouriteId::random(),
            user_id,
            dish_id,
            created_at,
        }
    }
}
