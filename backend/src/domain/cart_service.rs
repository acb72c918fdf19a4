//! Cart ledger service.
//!
//! Validates quantities before touching storage and relies on the repository
//! to apply merges and adjustments atomically.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CartCommand, CartQuery, CartRepository, CartRepositoryError, UserDirectory,
};
use crate::domain::user_lookup::resolve_user_ref;
use crate::domain::{
    AdjustOutcome, CartItem, CartItemId, CartLine, CartValidationError, Error, IngredientId,
    UserId, UserRef, validate_addition,
};

/// Cart service implementing [`CartCommand`] and [`CartQuery`].
#[derive(Clone)]
pub struct CartService<C, U> {
    cart_repo: Arc<C>,
    users: Arc<U>,
}

impl<C, U> CartService<C, U> {
    /// Create a new service with the given repository and user directory.
    pub fn new(cart_repo: Arc<C>, users: Arc<U>) -> Self {
        Self { cart_repo, users }
    }
}

fn map_validation_error(error: CartValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(serde_json::json!({
        "field": "quantity",
        "code": match error {
            CartValidationError::Overflow => "overflow",
            _ => "invalid_quantity",
        },
    }))
}

fn map_cart_error(error: CartRepositoryError) -> Error {
    match error {
        CartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cart repository unavailable: {message}"))
        }
        CartRepositoryError::Query { message } => {
            Error::internal(format!("cart repository error: {message}"))
        }
        CartRepositoryError::IngredientNotFound => Error::not_found("ingredient not found"),
        CartRepositoryError::NonPositiveQuantity => {
            map_validation_error(CartValidationError::NonPositiveNewRow)
        }
        CartRepositoryError::QuantityOverflow => map_validation_error(CartValidationError::Overflow),
    }
}

#[async_trait]
impl<C, U> CartCommand for CartService<C, U>
where
    C: CartRepository,
    U: UserDirectory,
{
    async fn add_or_merge(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
    ) -> Result<CartItemId, Error> {
        let quantity = validate_addition(delta).map_err(map_validation_error)?;
        let item = CartItem {
            id: CartItemId::random(),
            user_id: *user_id,
            ingredient_id: *ingredient_id,
            quantity,
        };
        let id = self
            .cart_repo
            .add_or_merge(&item)
            .await
            .map_err(map_cart_error)?;
        debug!(%user_id, %ingredient_id, delta, cart_item_id = %id, "cart item merged");
        Ok(id)
    }

    async fn adjust_or_remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
    ) -> Result<AdjustOutcome, Error> {
        let outcome = self
            .cart_repo
            .adjust_or_remove(user_id, ingredient_id, delta, CartItemId::random())
            .await
            .map_err(map_cart_error)?;
        debug!(%user_id, %ingredient_id, delta, ?outcome, "cart item adjusted");
        Ok(outcome)
    }

    async fn remove_item(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
    ) -> Result<(), Error> {
        let removed = self
            .cart_repo
            .remove(user_id, ingredient_id)
            .await
            .map_err(map_cart_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("cart item not found"))
        }
    }

    async fn clear_cart(&self, user_id: &UserId) -> Result<(), Error> {
        let removed = self
            .cart_repo
            .clear(user_id)
            .await
            .map_err(map_cart_error)?;
        if removed == 0 {
            return Err(Error::not_found("cart is already empty"));
        }
        debug!(%user_id, removed, "cart cleared");
        Ok(())
    }
}

#[async_trait]
impl<C, U> CartQuery for CartService<C, U>
where
    C: CartRepository,
    U: UserDirectory,
{
    async fn list_cart(&self, user: &UserRef) -> Result<Vec<CartLine>, Error> {
        let user_id = resolve_user_ref(self.users.as_ref(), user).await?;
        self.cart_repo
            .list_for_user(&user_id)
            .await
            .map_err(map_cart_error)
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
