//! Port for dish persistence and dish-to-ingredient associations.
//!
//! The [`DishRepository`] owns both dishes and their association rows because
//! dish creation must write them atomically. Read methods return raw dishes
//! and batch-joined ingredient lines; composing them into views is a domain
//! concern.

use async_trait::async_trait;

use crate::domain::{AssociatedLine, Category, Dish, DishId, DishIngredient, SearchTerm};

use super::define_port_error;

define_port_error! {
    /// Errors raised by dish repository adapters.
    pub enum DishRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "dish repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "dish repository query failed: {message}",
        /// A referenced dish does not exist.
        DishNotFound => "dish not found",
        /// A referenced ingredient does not exist.
        IngredientNotFound => "ingredient not found",
        /// The dish already references the ingredient.
        DuplicateAssociation =>
            "dish already contains this ingredient",
    }
}

/// Port for dish storage, retrieval, and association management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Insert a dish and all of its associations in one transaction.
    ///
    /// Either every row is written or none is. A missing ingredient yields
    /// [`DishRepositoryError::IngredientNotFound`].
    async fn create_with_ingredients(
        &self,
        dish: &Dish,
        associations: &[DishIngredient],
    ) -> Result<(), DishRepositoryError>;

    /// Fetch a single dish.
    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DishRepositoryError>;

    /// Fetch the dishes among `ids` that exist, in creation order.
    async fn find_many(&self, ids: &[DishId]) -> Result<Vec<Dish>, DishRepositoryError>;

    /// List every dish ordered by creation time, then identifier.
    async fn list_all(&self) -> Result<Vec<Dish>, DishRepositoryError>;

    /// List dishes whose category equals `category`.
    async fn list_by_category(&self, category: &Category) -> Result<Vec<Dish>, DishRepositoryError>;

    /// List dishes whose name contains `term`, ignoring case.
    async fn search_by_name(&self, term: &SearchTerm) -> Result<Vec<Dish>, DishRepositoryError>;

    /// Load the ingredient lines of every dish in `ids` in one round trip.
    async fn ingredient_lines_for(
        &self,
        ids: &[DishId],
    ) -> Result<Vec<AssociatedLine>, DishRepositoryError>;

    /// Link an ingredient to an existing dish.
    async fn add_association(&self, association: &DishIngredient)
    -> Result<(), DishRepositoryError>;
}

/// Fixture implementation with an empty catalogue that accepts writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDishRepository;

#[async_trait]
impl DishRepository for FixtureDishRepository {
    async fn create_with_ingredients(
        &self,
        _dish: &Dish,
        _associations: &[DishIngredient],
    ) -> Result<(), DishRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &DishId) -> Result<Option<Dish>, DishRepositoryError> {
        Ok(None)
    }

    async fn find_many(&self, _ids: &[DishId]) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_category(
        &self,
        _category: &Category,
    ) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(Vec::new())
    }

    async fn search_by_name(&self, _term: &SearchTerm) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(Vec::new())
    }

    async fn ingredient_lines_for(
        &self,
        _ids: &[DishId],
    ) -> Result<Vec<AssociatedLine>, DishRepositoryError> {
        Ok(Vec::new())
    }

    async fn add_association(
        &self,
        _association: &DishIngredient,
    ) -> Result<(), DishRepositoryError> {
        Ok(())
    }
}
