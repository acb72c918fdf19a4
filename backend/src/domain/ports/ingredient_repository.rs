//! Port for ingredient persistence.

use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ingredient repository query failed: {message}",
    }
}

/// Port for storing and fetching catalogue ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Persist a new ingredient.
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError>;

    /// Fetch an ingredient by identifier.
    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;
}

/// Fixture implementation that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIngredientRepository;

#[async_trait]
impl IngredientRepository for FixtureIngredientRepository {
    async fn insert(&self, _ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_accepts_inserts_and_finds_nothing() {
        let repo = FixtureIngredientRepository;
        let ingredient = Ingredient::new("Saffron", None).expect("valid ingredient");

        repo.insert(&ingredient).await.expect("fixture insert");
        let found = repo
            .find_by_id(&ingredient.id)
            .await
            .expect("fixture lookup");
        assert!(found.is_none());
    }
}
