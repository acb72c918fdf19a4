//! Driving port for catalogue mutations.
//!
//! Inbound adapters call [`CatalogueCommand`] to add ingredients, create
//! dishes with their ingredient lists, and link further ingredients to an
//! existing dish.

use async_trait::async_trait;

use crate::domain::{DishDraft, DishId, DishIngredientId, Error, IngredientId, UserId};

/// Request to add a catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub image: Option<Vec<u8>>,
}

/// Request to create a dish together with its ingredient associations.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDishRequest {
    /// User recorded as the dish owner.
    pub owner_id: UserId,
    /// Dish attributes, validated by the service.
    pub draft: DishDraft,
    /// Requested `(ingredient, quantity)` pairs in caller order.
    pub ingredients: Vec<(IngredientId, f64)>,
}

/// Request to link one more ingredient to an existing dish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddAssociationRequest {
    pub dish_id: DishId,
    pub ingredient_id: IngredientId,
    pub quantity: f64,
}

/// Driving port for catalogue writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    /// Add an ingredient.
    ///
    /// # Errors
    /// Returns an invalid-request error when the name is blank.
    async fn create_ingredient(&self, request: CreateIngredientRequest)
    -> Result<IngredientId, Error>;

    /// Create a dish and all of its associations atomically.
    ///
    /// # Errors
    /// Returns an invalid-request error for bad attributes or quantities, and
    /// a not-found error when any ingredient is missing; nothing is written
    /// in either case.
    async fn create_dish_with_ingredients(
        &self,
        request: CreateDishRequest,
    ) -> Result<DishId, Error>;

    /// Link an ingredient to an existing dish.
    ///
    /// # Errors
    /// Returns not-found for a missing dish or ingredient, conflict when the
    /// pair already exists, and invalid-request for a bad quantity.
    async fn add_association(
        &self,
        request: AddAssociationRequest,
    ) -> Result<DishIngredientId, Error>;
}

/// Fixture command that accepts every request without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueCommand;

#[async_trait]
impl CatalogueCommand for FixtureCatalogueCommand {
    async fn create_ingredient(
        &self,
        _request: CreateIngredientRequest,
    ) -> Result<IngredientId, Error> {
        Ok(IngredientId::random())
    }

    async fn create_dish_with_ingredients(
        &self,
        _request: CreateDishRequest,
    ) -> Result<DishId, Error> {
        Ok(DishId::random())
    }

    async fn add_association(
        &self,
        _request: AddAssociationRequest,
    ) -> Result<DishIngredientId, Error> {
        Ok(DishIngredientId::random())
    }
}
