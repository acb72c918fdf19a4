//! PostgreSQL-backed cart ledger.
//!
//! Merging is one `INSERT .. ON CONFLICT DO UPDATE` statement keyed on the
//! `(user_id, ingredient_id)` unique constraint, so concurrent merges add up
//! instead of racing. Adjustments lock the row with `SELECT .. FOR UPDATE`
//! and apply [`plan_adjustment`] inside the same transaction; when no row
//! exists yet the insert uses the same upsert.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CartRepository, CartRepositoryError};
use crate::domain::{
    AdjustOutcome, AdjustmentPlan, CartItem, CartItemId, CartLine, CartValidationError,
    IngredientId, UserId, plan_adjustment,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CartItemRow, IngredientRow, NewCartItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cart_items, ingredients};

/// Diesel-backed implementation of the `CartRepository` port.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures inside the adjustment transaction.
enum AdjustError {
    Diesel(diesel::result::Error),
    Rule(CartValidationError),
}

impl From<diesel::result::Error> for AdjustError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> CartRepositoryError {
    CartRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CartRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.is_foreign_key_on("ingredient_id") {
        return CartRepositoryError::ingredient_not_found();
    }
    match failure {
        DieselFailure::Connection(message) => CartRepositoryError::connection(message),
        DieselFailure::Check { .. } => CartRepositoryError::non_positive_quantity(),
        DieselFailure::OutOfRange => CartRepositoryError::quantity_overflow(),
        DieselFailure::ForeignKey { .. } => CartRepositoryError::query("unknown cart owner"),
        DieselFailure::Unique { .. } => CartRepositoryError::query("concurrent cart insert"),
        DieselFailure::Query(message) => CartRepositoryError::query(message),
    }
}

fn map_rule_error(error: CartValidationError) -> CartRepositoryError {
    match error {
        CartValidationError::Overflow => CartRepositoryError::quantity_overflow(),
        CartValidationError::NonPositiveAddition
        | CartValidationError::NonPositiveNewRow => CartRepositoryError::non_positive_quantity(),
    }
}

fn map_adjust_error(error: AdjustError) -> CartRepositoryError {
    match error {
        AdjustError::Diesel(err) => map_diesel_error(err),
        AdjustError::Rule(err) => map_rule_error(err),
    }
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn add_or_merge(&self, item: &CartItem) -> Result<CartItemId, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Uuid = diesel::insert_into(cart_items::table)
            .values(NewCartItemRow::from(item))
            .on_conflict((cart_items::user_id, cart_items::ingredient_id))
            .do_update()
            .set(cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)))
            .returning(cart_items::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(CartItemId::from_uuid(id))
    }

    async fn adjust_or_remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
        new_id: CartItemId,
    ) -> Result<AdjustOutcome, CartRepositoryError> {
        let user = *user_id.as_uuid();
        let ingredient = *ingredient_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let existing: Option<CartItemRow> = cart_items::table
                    .filter(cart_items::user_id.eq(user))
                    .filter(cart_items::ingredient_id.eq(ingredient))
                    .select(CartItemRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                let plan = plan_adjustment(existing.map(|row| row.quantity), delta)
                    .map_err(AdjustError::Rule)?;

                match (plan, existing) {
                    (AdjustmentPlan::Insert { quantity }, _) => {
                        let row = NewCartItemRow {
                            id: *new_id.as_uuid(),
                            user_id: user,
                            ingredient_id: ingredient,
                            quantity,
                        };
                        // A concurrent first insert lands on the unique key and merges.
                        let (id, quantity): (Uuid, i32) = diesel::insert_into(cart_items::table)
                            .values(&row)
                            .on_conflict((cart_items::user_id, cart_items::ingredient_id))
                            .do_update()
                            .set(
                                cart_items::quantity
                                    .eq(cart_items::quantity + excluded(cart_items::quantity)),
                            )
                            .returning((cart_items::id, cart_items::quantity))
                            .get_result(conn)
                            .await?;
                        Ok(AdjustOutcome::Updated {
                            id: CartItemId::from_uuid(id),
                            quantity,
                        })
                    }
                    (AdjustmentPlan::Update { quantity }, Some(row)) => {
                        diesel::update(cart_items::table.find(row.id))
                            .set(cart_items::quantity.eq(quantity))
                            .execute(conn)
                            .await?;
                        Ok(AdjustOutcome::Updated {
                            id: CartItemId::from_uuid(row.id),
                            quantity,
                        })
                    }
                    (AdjustmentPlan::Delete, Some(row)) => {
                        diesel::delete(cart_items::table.find(row.id))
                            .execute(conn)
                            .await?;
                        Ok(AdjustOutcome::Removed)
                    }
                    // Update and delete plans are only produced for an existing row.
                    (AdjustmentPlan::Update { .. } | AdjustmentPlan::Delete, None) => {
                        Err(AdjustError::Rule(CartValidationError::NonPositiveNewRow))
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_adjust_error)
    }

    async fn remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
    ) -> Result<bool, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id.as_uuid()))
                .filter(cart_items::ingredient_id.eq(ingredient_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn clear(&self, user_id: &UserId) -> Result<usize, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CartLine>, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CartItemRow, IngredientRow)> = cart_items::table
            .inner_join(ingredients::table)
            .filter(cart_items::user_id.eq(user_id.as_uuid()))
            .select((CartItemRow::as_select(), IngredientRow::as_select()))
            .order_by((cart_items::created_at, cart_items::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(item, ingredient)| CartLine {
                item: CartItem::from(item),
                ingredient: ingredient.into_summary(),
            })
            .collect())
    }
}
