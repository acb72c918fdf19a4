//! PostgreSQL-backed favourite bookmarks.
//!
//! Inserts use `ON CONFLICT DO NOTHING` against the `(user_id, dish_id)`
//! unique constraint; zero affected rows means the bookmark already existed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FavouriteRepository, FavouriteRepositoryError};
use crate::domain::{DishId, Favourite, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::FavouriteRow;
use super::pool::{DbPool, PoolError};
use super::schema::favourite_dishes;

/// Diesel-backed implementation of the `FavouriteRepository` port.
#[derive(Clone)]
pub struct DieselFavouriteRepository {
    pool: DbPool,
}

impl DieselFavouriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavouriteRepositoryError {
    FavouriteRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> FavouriteRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.is_foreign_key_on("dish_id") {
        return FavouriteRepositoryError::dish_not_found();
    }
    match failure {
        DieselFailure::Connection(message) => FavouriteRepositoryError::connection(message),
        DieselFailure::Query(message) => FavouriteRepositoryError::query(message),
        DieselFailure::ForeignKey { .. } => FavouriteRepositoryError::query("unknown user"),
        DieselFailure::Unique { .. } | DieselFailure::Check { .. } | DieselFailure::OutOfRange => {
            FavouriteRepositoryError::query("constraint violation")
        }
    }
}

#[async_trait]
impl FavouriteRepository for DieselFavouriteRepository {
    async fn insert(&self, favourite: &Favourite) -> Result<bool, FavouriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(favourite_dishes::table)
            .values(FavouriteRow::from(favourite))
            .on_conflict((favourite_dishes::user_id, favourite_dishes::dish_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted == 1)
    }

    async fn remove(
        &self,
        user_id: &UserId,
        dish_id: &DishId,
    ) -> Result<bool, FavouriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            favourite_dishes::table
                .filter(favourite_dishes::user_id.eq(user_id.as_uuid()))
                .filter(favourite_dishes::dish_id.eq(dish_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favourite>, FavouriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FavouriteRow> = favourite_dishes::table
            .filter(favourite_dishes::user_id.eq(user_id.as_uuid()))
            .select(FavouriteRow::as_select())
            .order_by((favourite_dishes::created_at, favourite_dishes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Favourite::from).collect())
    }
}
