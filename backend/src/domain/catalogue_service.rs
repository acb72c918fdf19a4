//! Catalogue domain service.
//!
//! Implements the catalogue driving ports: ingredient and dish creation,
//! association management, and every dish read path. All reads assemble
//! their views through [`load_dish_views`] so ingredient lists are identical
//! regardless of which query produced them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    AddAssociationRequest, CatalogueCommand, CatalogueQuery, CreateDishRequest,
    CreateIngredientRequest, DishRepository, DishRepositoryError, IngredientRepository,
    IngredientRepositoryError,
};
use crate::domain::{
    AssociationQuantity, CatalogueValidationError, Category, Dish, DishId, DishIngredient,
    DishIngredientId, DishWithIngredients, Error, Ingredient, IngredientId, IngredientLine,
    IngredientPortion, SearchTerm,
};

/// Catalogue service implementing [`CatalogueCommand`] and [`CatalogueQuery`].
#[derive(Clone)]
pub struct CatalogueService<I, D> {
    ingredient_repo: Arc<I>,
    dish_repo: Arc<D>,
}

impl<I, D> CatalogueService<I, D> {
    /// Create a new service with the given repositories.
    pub fn new(ingredient_repo: Arc<I>, dish_repo: Arc<D>) -> Self {
        Self {
            ingredient_repo,
            dish_repo,
        }
    }
}

/// Translate a catalogue validation failure into an invalid-request error
/// carrying `{field, code, index?}` details.
pub(crate) fn validation_error(error: CatalogueValidationError) -> Error {
    let mut details = json!({
        "field": error.field(),
        "code": error.code(),
    });
    if let (Some(index), Some(map)) = (error.index(), details.as_object_mut()) {
        map.insert("index".to_owned(), json!(index));
    }
    Error::invalid_request(error.to_string()).with_details(details)
}

pub(crate) fn map_dish_error(error: DishRepositoryError) -> Error {
    match error {
        DishRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("dish repository unavailable: {message}"))
        }
        DishRepositoryError::Query { message } => {
            Error::internal(format!("dish repository error: {message}"))
        }
        DishRepositoryError::DishNotFound => Error::not_found("dish not found"),
        DishRepositoryError::IngredientNotFound => Error::not_found("ingredient not found"),
        DishRepositoryError::DuplicateAssociation => {
            Error::conflict("dish already contains this ingredient")
        }
    }
}

fn map_ingredient_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
    }
}

/// Attach ingredient lines to `dishes` with a single batched lookup.
pub(crate) async fn load_dish_views<D>(
    repo: &D,
    dishes: Vec<Dish>,
) -> Result<Vec<DishWithIngredients>, Error>
where
    D: DishRepository + ?Sized,
{
    if dishes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<DishId> = dishes.iter().map(|dish| dish.id).collect();
    let lines = repo
        .ingredient_lines_for(&ids)
        .await
        .map_err(map_dish_error)?;
    Ok(DishWithIngredients::compose_all(dishes, lines))
}

impl<I, D> CatalogueService<I, D>
where
    I: IngredientRepository,
    D: DishRepository,
{
    async fn load_dish(&self, dish_id: &DishId) -> Result<DishWithIngredients, Error> {
        let dish = self
            .dish_repo
            .find_by_id(dish_id)
            .await
            .map_err(map_dish_error)?
            .ok_or_else(|| Error::not_found(format!("dish {dish_id} not found")))?;
        let mut views = load_dish_views(self.dish_repo.as_ref(), vec![dish]).await?;
        views
            .pop()
            .ok_or_else(|| Error::internal("dish view composition returned no rows"))
    }
}

#[async_trait]
impl<I, D> CatalogueCommand for CatalogueService<I, D>
where
    I: IngredientRepository,
    D: DishRepository,
{
    async fn create_ingredient(
        &self,
        request: CreateIngredientRequest,
    ) -> Result<IngredientId, Error> {
        let ingredient = Ingredient::new(&request.name, request.image).map_err(validation_error)?;
        self.ingredient_repo
            .insert(&ingredient)
            .await
            .map_err(map_ingredient_error)?;
        debug!(ingredient_id = %ingredient.id, "ingredient created");
        Ok(ingredient.id)
    }

    async fn create_dish_with_ingredients(
        &self,
        request: CreateDishRequest,
    ) -> Result<DishId, Error> {
        let CreateDishRequest {
            owner_id,
            draft,
            ingredients,
        } = request;
        let dish = Dish::from_draft(owner_id, draft, Utc::now()).map_err(validation_error)?;
        let associations: Vec<DishIngredient> = IngredientPortion::validate_all(&ingredients)
            .map_err(validation_error)?
            .into_iter()
            .map(|portion| DishIngredient::new(dish.id, portion.ingredient_id, portion.quantity))
            .collect();

        self.dish_repo
            .create_with_ingredients(&dish, &associations)
            .await
            .map_err(map_dish_error)?;
        debug!(
            dish_id = %dish.id,
            ingredients = associations.len(),
            "dish created"
        );
        Ok(dish.id)
    }

    async fn add_association(
        &self,
        request: AddAssociationRequest,
    ) -> Result<DishIngredientId, Error> {
        let quantity = AssociationQuantity::new(request.quantity).map_err(validation_error)?;
        let association = DishIngredient::new(request.dish_id, request.ingredient_id, quantity);
        self.dish_repo
            .add_association(&association)
            .await
            .map_err(map_dish_error)?;
        Ok(association.id)
    }
}

#[async_trait]
impl<I, D> CatalogueQuery for CatalogueService<I, D>
where
    I: IngredientRepository,
    D: DishRepository,
{
    async fn list_dishes(&self) -> Result<Vec<DishWithIngredients>, Error> {
        let dishes = self.dish_repo.list_all().await.map_err(map_dish_error)?;
        load_dish_views(self.dish_repo.as_ref(), dishes).await
    }

    async fn list_dishes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<DishWithIngredients>, Error> {
        let category = Category::new(category).map_err(validation_error)?;
        let dishes = self
            .dish_repo
            .list_by_category(&category)
            .await
            .map_err(map_dish_error)?;
        load_dish_views(self.dish_repo.as_ref(), dishes).await
    }

    async fn search_dishes_by_name(&self, term: &str) -> Result<Vec<DishWithIngredients>, Error> {
        let term = SearchTerm::new(term).map_err(validation_error)?;
        let dishes = self
            .dish_repo
            .search_by_name(&term)
            .await
            .map_err(map_dish_error)?;
        load_dish_views(self.dish_repo.as_ref(), dishes).await
    }

    async fn get_dish(&self, dish_id: &DishId) -> Result<DishWithIngredients, Error> {
        self.load_dish(dish_id).await
    }

    async fn ingredients_for_dish(&self, dish_id: &DishId) -> Result<Vec<IngredientLine>, Error> {
        Ok(self.load_dish(dish_id).await?.ingredients)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
