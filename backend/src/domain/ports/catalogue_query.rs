//! Driving port for catalogue reads.
//!
//! Every method returning dishes yields [`DishWithIngredients`] views built by
//! the shared composition rule, so the ingredient list of a dish is identical
//! whichever query produced it.

use async_trait::async_trait;

use crate::domain::{DishId, DishWithIngredients, Error, IngredientLine};

/// Driving port for catalogue queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Every dish, oldest first.
    async fn list_dishes(&self) -> Result<Vec<DishWithIngredients>, Error>;

    /// Dishes in exactly `category`.
    ///
    /// # Errors
    /// Returns an invalid-request error when the category is blank.
    async fn list_dishes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<DishWithIngredients>, Error>;

    /// Dishes whose name contains `term`, ignoring case.
    ///
    /// # Errors
    /// Returns an invalid-request error when the term is blank.
    async fn search_dishes_by_name(&self, term: &str) -> Result<Vec<DishWithIngredients>, Error>;

    /// A single dish.
    ///
    /// # Errors
    /// Returns not-found when the dish does not exist.
    async fn get_dish(&self, dish_id: &DishId) -> Result<DishWithIngredients, Error>;

    /// The ingredient lines of a dish; empty when it has none.
    ///
    /// # Errors
    /// Returns not-found when the dish does not exist.
    async fn ingredients_for_dish(&self, dish_id: &DishId) -> Result<Vec<IngredientLine>, Error>;
}

/// Fixture query over an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueQuery;

#[async_trait]
impl CatalogueQuery for FixtureCatalogueQuery {
    async fn list_dishes(&self) -> Result<Vec<DishWithIngredients>, Error> {
        Ok(Vec::new())
    }

    async fn list_dishes_by_category(
        &self,
        _category: &str,
    ) -> Result<Vec<DishWithIngredients>, Error> {
        Ok(Vec::new())
    }

    async fn search_dishes_by_name(
        &self,
        _term: &str,
    ) -> Result<Vec<DishWithIngredients>, Error> {
        Ok(Vec::new())
    }

    async fn get_dish(&self, _dish_id: &DishId) -> Result<DishWithIngredients, Error> {
        Err(Error::not_found("dish not found"))
    }

    async fn ingredients_for_dish(&self, _dish_id: &DishId) -> Result<Vec<IngredientLine>, Error> {
        Err(Error::not_found("dish not found"))
    }
}
