//! Port for the per-user cart ledger.
//!
//! Adapters must apply merges and adjustments atomically: a merge is a single
//! upsert statement, an adjustment runs under a row lock and follows
//! [`crate::domain::plan_adjustment`].

use async_trait::async_trait;

use crate::domain::{AdjustOutcome, CartItem, CartItemId, CartLine, IngredientId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cart repository adapters.
    pub enum CartRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "cart repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cart repository query failed: {message}",
        /// The referenced ingredient does not exist.
        IngredientNotFound => "ingredient not found",
        /// A new row would start at a non-positive quantity.
        NonPositiveQuantity => "cannot add non-positive quantity",
        /// The merged quantity exceeds the ledger's range.
        QuantityOverflow => "cart quantity overflow",
    }
}

/// Port for cart ledger storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert `item`, or add its quantity to the existing row for the same
    /// `(user, ingredient)` pair. Returns the identifier of the stored row.
    async fn add_or_merge(&self, item: &CartItem) -> Result<CartItemId, CartRepositoryError>;

    /// Apply a signed adjustment to the `(user, ingredient)` row.
    ///
    /// `new_id` is used only when the adjustment creates a row.
    async fn adjust_or_remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
        new_id: CartItemId,
    ) -> Result<AdjustOutcome, CartRepositoryError>;

    /// Delete the `(user, ingredient)` row. Returns whether a row was removed.
    async fn remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
    ) -> Result<bool, CartRepositoryError>;

    /// Delete every row for the user. Returns how many rows were removed.
    async fn clear(&self, user_id: &UserId) -> Result<usize, CartRepositoryError>;

    /// List the user's rows joined with their ingredients.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CartLine>, CartRepositoryError>;
}

/// Fixture implementation with an always-empty cart.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartRepository;

#[async_trait]
impl CartRepository for FixtureCartRepository {
    async fn add_or_merge(&self, item: &CartItem) -> Result<CartItemId, CartRepositoryError> {
        Ok(item.id)
    }

    async fn adjust_or_remove(
        &self,
        _user_id: &UserId,
        _ingredient_id: &IngredientId,
        delta: i32,
        new_id: CartItemId,
    ) -> Result<AdjustOutcome, CartRepositoryError> {
        if delta > 0 {
            Ok(AdjustOutcome::Updated {
                id: new_id,
                quantity: delta,
            })
        } else {
            Err(CartRepositoryError::non_positive_quantity())
        }
    }

    async fn remove(
        &self,
        _user_id: &UserId,
        _ingredient_id: &IngredientId,
    ) -> Result<bool, CartRepositoryError> {
        Ok(false)
    }

    async fn clear(&self, _user_id: &UserId) -> Result<usize, CartRepositoryError> {
        Ok(0)
    }

    async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<CartLine>, CartRepositoryError> {
        Ok(Vec::new())
    }
}
