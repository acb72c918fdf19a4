//! Port for favourite bookmarks.

use async_trait::async_trait;

use crate::domain::{DishId, Favourite, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favourite repository adapters.
    pub enum FavouriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "favourite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "favourite repository query failed: {message}",
        /// The referenced dish does not exist.
        DishNotFound => "dish not found",
    }
}

/// Port for favourite storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavouriteRepository: Send + Sync {
    /// Insert unless the `(user, dish)` pair already exists.
    ///
    /// Returns `false` when the pair was already present. Adapters must make
    /// the check and insert a single atomic step.
    async fn insert(&self, favourite: &Favourite) -> Result<bool, FavouriteRepositoryError>;

    /// Delete the `(user, dish)` pair. Returns whether a row was removed.
    async fn remove(&self, user_id: &UserId, dish_id: &DishId)
    -> Result<bool, FavouriteRepositoryError>;

    /// List the user's favourites ordered by creation time.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Favourite>, FavouriteRepositoryError>;
}

/// Fixture implementation with no stored favourites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavouriteRepository;

#[async_trait]
impl FavouriteRepository for FixtureFavouriteRepository {
    async fn insert(&self, _favourite: &Favourite) -> Result<bool, FavouriteRepositoryError> {
        Ok(true)
    }

    async fn remove(
        &self,
        _user_id: &UserId,
        _dish_id: &DishId,
    ) -> Result<bool, FavouriteRepositoryError> {
        Ok(false)
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Favourite>, FavouriteRepositoryError> {
        Ok(Vec::new())
    }
}
