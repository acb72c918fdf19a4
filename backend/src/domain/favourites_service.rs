//! Favourite dish bookmarks.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::catalogue_service::{load_dish_views, map_dish_error};
use crate::domain::ports::{
    DishRepository, FavouriteRepository, FavouriteRepositoryError, FavouritesCommand,
    FavouritesQuery, UserDirectory,
};
use crate::domain::user_lookup::resolve_user_ref;
use crate::domain::{DishId, DishWithIngredients, Error, Favourite, FavouriteId, UserId, UserRef};

/// Favourites service implementing [`FavouritesCommand`] and
/// [`FavouritesQuery`].
#[derive(Clone)]
pub struct FavouritesService<F, D, U> {
    favourite_repo: Arc<F>,
    dish_repo: Arc<D>,
    users: Arc<U>,
}

impl<F, D, U> FavouritesService<F, D, U> {
    /// Create a new service.
    pub fn new(favourite_repo: Arc<F>, dish_repo: Arc<D>, users: Arc<U>) -> Self {
        Self {
            favourite_repo,
            dish_repo,
            users,
        }
    }
}

fn map_favourite_error(error: FavouriteRepositoryError) -> Error {
    match error {
        FavouriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favourite repository unavailable: {message}"))
        }
        FavouriteRepositoryError::Query { message } => {
            Error::internal(format!("favourite repository error: {message}"))
        }
        FavouriteRepositoryError::DishNotFound => Error::not_found("dish not found"),
    }
}

#[async_trait]
impl<F, D, U> FavouritesCommand for FavouritesService<F, D, U>
where
    F: FavouriteRepository,
    D: DishRepository,
    U: UserDirectory,
{
    async fn add_favourite(
        &self,
        user_id: &UserId,
        dish_id: &DishId,
    ) -> Result<FavouriteId, Error> {
        let favourite = Favourite::new(*user_id, *dish_id, Utc::now());
        let inserted = self
            .favourite_repo
            .insert(&favourite)
            .await
            .map_err(map_favourite_error)?;
        if inserted {
            Ok(favourite.id)
        } else {
            Err(Error::conflict("dish is already a favourite"))
        }
    }

    async fn remove_favourite(&self, user_id: &UserId, dish_id: &DishId) -> Result<(), Error> {
        let removed = self
            .favourite_repo
            .remove(user_id, dish_id)
            .await
            .map_err(map_favourite_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("favourite not found"))
        }
    }
}

#[async_trait]
impl<F, D, U> FavouritesQuery for FavouritesService<F, D, U>
where
    F: FavouriteRepository,
    D: DishRepository,
    U: UserDirectory,
{
    async fn list_favourites(&self, user: &UserRef) -> Result<Vec<DishWithIngredients>, Error> {
        let user_id = resolve_user_ref(self.users.as_ref(), user).await?;
        let favourites = self
            .favourite_repo
            .list_for_user(&user_id)
            .await
            .map_err(map_favourite_error)?;
        if favourites.is_empty() {
            return Ok(Vec::new());
        }

        let dish_ids: Vec<DishId> = favourites.iter().map(|favourite| favourite.dish_id).collect();
        let dishes = self
            .dish_repo
            .find_many(&dish_ids)
            .await
            .map_err(map_dish_error)?;
        let mut views: HashMap<DishId, DishWithIngredients> =
            load_dish_views(self.dish_repo.as_ref(), dishes)
                .await?
                .into_iter()
                .map(|view| (view.dish.id, view))
                .collect();

        // Bookmark order, not dish creation order.
        Ok(favourites
            .iter()
            .filter_map(|favourite| views.remove(&favourite.dish_id))
            .collect())
    }
}

#[cfg(test)]
#[path = "favourites_service_tests.rs"]
mod tests;
