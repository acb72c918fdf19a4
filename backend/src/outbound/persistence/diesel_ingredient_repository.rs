//! PostgreSQL-backed `IngredientRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{Ingredient, IngredientId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientRepositoryError {
    IngredientRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => IngredientRepositoryError::connection(message),
        DieselFailure::Query(message) => IngredientRepositoryError::query(message),
        DieselFailure::ForeignKey { .. }
        | DieselFailure::Unique { .. }
        | DieselFailure::Check { .. }
        | DieselFailure::OutOfRange => IngredientRepositoryError::query("constraint violation"),
    }
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(ingredients::table)
            .values(NewIngredientRow::from(ingredient))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id.as_uuid()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(IngredientRow::into_ingredient))
    }
}
