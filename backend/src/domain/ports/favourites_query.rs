//! Driving port for reading favourites.

use async_trait::async_trait;

use crate::domain::{DishWithIngredients, Error, UserRef};

/// Driving port for favourite reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavouritesQuery: Send + Sync {
    /// The user's bookmarked dishes, oldest bookmark first.
    ///
    /// # Errors
    /// Not-found when an e-mail reference matches no user.
    async fn list_favourites(&self, user: &UserRef) -> Result<Vec<DishWithIngredients>, Error>;
}

/// Fixture query returning no favourites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavouritesQuery;

#[async_trait]
impl FavouritesQuery for FixtureFavouritesQuery {
    async fn list_favourites(&self, _user: &UserRef) -> Result<Vec<DishWithIngredients>, Error> {
        Ok(Vec::new())
    }
}
