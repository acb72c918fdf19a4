//! PostgreSQL-backed `DishRepository` implementation using Diesel ORM.
//!
//! Dish creation writes the dish row and every association inside one
//! transaction, so a failing association (for example a missing ingredient)
//! leaves no trace. Ingredient lines for many dishes are loaded with a single
//! join rather than one query per dish.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{DishRepository, DishRepositoryError};
use crate::domain::{
    AssociatedLine, AssociationQuantity, Category, Dish, DishId, DishIngredient, IngredientLine,
    SearchTerm,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{DishRow, IngredientRow, NewDishIngredientRow, NewDishRow};
use super::pool::{DbPool, PoolError};
use super::schema::{dish_ingredients, dishes, ingredients};

/// Diesel-backed implementation of the `DishRepository` port.
#[derive(Clone)]
pub struct DieselDishRepository {
    pool: DbPool,
}

impl DieselDishRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DishRepositoryError {
    DishRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DishRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.is_foreign_key_on("ingredient_id") {
        return DishRepositoryError::ingredient_not_found();
    }
    if failure.is_foreign_key_on("dish_id") {
        return DishRepositoryError::dish_not_found();
    }
    match failure {
        DieselFailure::Unique { .. } => DishRepositoryError::duplicate_association(),
        DieselFailure::Connection(message) => DishRepositoryError::connection(message),
        DieselFailure::ForeignKey { constraint } => {
            warn!(?constraint, "unrecognised foreign key violation on dish write");
            DishRepositoryError::query("foreign key violation")
        }
        DieselFailure::Check { .. } | DieselFailure::OutOfRange => {
            DishRepositoryError::query("dish values rejected by database")
        }
        DieselFailure::Query(message) => DishRepositoryError::query(message),
    }
}

fn row_to_line(
    dish_id: Uuid,
    quantity: f64,
    ingredient: IngredientRow,
) -> Result<AssociatedLine, DishRepositoryError> {
    let quantity = AssociationQuantity::new(quantity).map_err(|_| {
        warn!(%dish_id, ingredient_id = %ingredient.id, quantity, "stored quantity is invalid");
        DishRepositoryError::query("stored association quantity is invalid")
    })?;
    Ok(AssociatedLine {
        dish_id: DishId::from_uuid(dish_id),
        line: IngredientLine {
            ingredient: ingredient.into_summary(),
            quantity,
        },
    })
}

fn rows_to_dishes(rows: Vec<DishRow>) -> Vec<Dish> {
    rows.into_iter().map(DishRow::into_dish).collect()
}

#[async_trait]
impl DishRepository for DieselDishRepository {
    async fn create_with_ingredients(
        &self,
        dish: &Dish,
        associations: &[DishIngredient],
    ) -> Result<(), DishRepositoryError> {
        let dish_row = NewDishRow::from(dish);
        let association_rows: Vec<NewDishIngredientRow> =
            associations.iter().map(NewDishIngredientRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(dishes::table)
                    .values(&dish_row)
                    .execute(conn)
                    .await?;

                if !association_rows.is_empty() {
                    diesel::insert_into(dish_ingredients::table)
                        .values(&association_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DishRow> = dishes::table
            .filter(dishes::id.eq(id.as_uuid()))
            .select(DishRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(DishRow::into_dish))
    }

    async fn find_many(&self, ids: &[DishId]) -> Result<Vec<Dish>, DishRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DishRow> = dishes::table
            .filter(dishes::id.eq_any(uuids))
            .select(DishRow::as_select())
            .order_by((dishes::created_at, dishes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows_to_dishes(rows))
    }

    async fn list_all(&self) -> Result<Vec<Dish>, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DishRow> = dishes::table
            .select(DishRow::as_select())
            .order_by((dishes::created_at, dishes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows_to_dishes(rows))
    }

    async fn list_by_category(&self, category: &Category) -> Result<Vec<Dish>, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DishRow> = dishes::table
            .filter(dishes::category.eq(category.as_str()))
            .select(DishRow::as_select())
            .order_by((dishes::created_at, dishes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows_to_dishes(rows))
    }

    async fn search_by_name(&self, term: &SearchTerm) -> Result<Vec<Dish>, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Backslash is PostgreSQL's default LIKE escape character.
        let rows: Vec<DishRow> = dishes::table
            .filter(dishes::name.ilike(term.like_pattern()))
            .select(DishRow::as_select())
            .order_by((dishes::created_at, dishes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows_to_dishes(rows))
    }

    async fn ingredient_lines_for(
        &self,
        ids: &[DishId],
    ) -> Result<Vec<AssociatedLine>, DishRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, f64, IngredientRow)> = dish_ingredients::table
            .inner_join(ingredients::table)
            .filter(dish_ingredients::dish_id.eq_any(uuids))
            .select((
                dish_ingredients::dish_id,
                dish_ingredients::quantity,
                IngredientRow::as_select(),
            ))
            .order_by((ingredients::name, ingredients::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(dish_id, quantity, ingredient)| row_to_line(dish_id, quantity, ingredient))
            .collect()
    }

    async fn add_association(
        &self,
        association: &DishIngredient,
    ) -> Result<(), DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(dish_ingredients::table)
            .values(NewDishIngredientRow::from(association))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
