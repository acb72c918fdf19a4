//! Driving port for cart ledger mutations.

use async_trait::async_trait;

use crate::domain::{AdjustOutcome, CartItemId, Error, IngredientId, UserId};

/// Driving port for cart writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCommand: Send + Sync {
    /// Add `delta` units, merging into an existing row.
    ///
    /// # Errors
    /// Invalid-request for `delta <= 0` or overflow; not-found for a missing
    /// ingredient.
    async fn add_or_merge(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
    ) -> Result<CartItemId, Error>;

    /// Apply a signed change, deleting the row once it reaches zero.
    ///
    /// # Errors
    /// Invalid-request for a non-positive change to a missing row; not-found
    /// for a missing ingredient.
    async fn adjust_or_remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
    ) -> Result<AdjustOutcome, Error>;

    /// Remove one ingredient from the cart.
    ///
    /// # Errors
    /// Not-found when the cart holds no such row.
    async fn remove_item(&self, user_id: &UserId, ingredient_id: &IngredientId)
    -> Result<(), Error>;

    /// Empty the cart.
    ///
    /// # Errors
    /// Not-found when the cart was already empty.
    async fn clear_cart(&self, user_id: &UserId) -> Result<(), Error>;
}

/// Fixture command that accepts additions and finds nothing to remove.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartCommand;

#[async_trait]
impl CartCommand for FixtureCartCommand {
    async fn add_or_merge(
        &self,
        _user_id: &UserId,
        _ingredient_id: &IngredientId,
        _delta: i32,
    ) -> Result<CartItemId, Error> {
        Ok(CartItemId::random())
    }

    async fn adjust_or_remove(
        &self,
        _user_id: &UserId,
        _ingredient_id: &IngredientId,
        _delta: i32,
    ) -> Result<AdjustOutcome, Error> {
        Ok(AdjustOutcome::Removed)
    }

    async fn remove_item(
        &self,
        _user_id: &UserId,
        _ingredient_id: &IngredientId,
    ) -> Result<(), Error> {
        Err(Error::not_found("cart item not found"))
    }

    async fn clear_cart(&self, _user_id: &UserId) -> Result<(), Error> {
        Err(Error::not_found("cart is already empty"))
    }
}
