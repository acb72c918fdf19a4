//! Driving port for favourite bookmark mutations.

use async_trait::async_trait;

use crate::domain::{DishId, Error, FavouriteId, UserId};

/// Driving port for favourite writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavouritesCommand: Send + Sync {
    /// Bookmark a dish.
    ///
    /// # Errors
    /// Conflict when already bookmarked; not-found for a missing dish.
    async fn add_favourite(&self, user_id: &UserId, dish_id: &DishId)
    -> Result<FavouriteId, Error>;

    /// Remove a bookmark.
    ///
    /// # Errors
    /// Not-found when the dish was not bookmarked.
    async fn remove_favourite(&self, user_id: &UserId, dish_id: &DishId) -> Result<(), Error>;
}

/// Fixture command that accepts additions and finds nothing to remove.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavouritesCommand;

#[async_trait]
impl FavouritesCommand for FixtureFavouritesCommand {
    async fn add_favourite(
        &self,
        _user_id: &UserId,
        _dish_id: &DishId,
    ) -> Result<FavouriteId, Error> {
        Ok(FavouriteId::random())
    }

    async fn remove_favourite(&self, _user_id: &UserId, _dish_id: &DishId) -> Result<(), Error> {
        Err(Error::not_found("favourite not found"))
    }
}
