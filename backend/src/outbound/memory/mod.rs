//! In-process store implementing every driven port.
//!
//! [`InMemoryStore`] backs the server when no database is configured and
//! gives integration tests a real adapter without PostgreSQL. All tables sit
//! behind one mutex, so each port call is atomic with respect to the others,
//! mirroring the transactions and unique constraints of the Diesel adapters.
//! Foreign keys to dishes and ingredients are checked; users are not, so
//! seeded rows from [`InMemoryStore::insert_user`] and registered users are
//! interchangeable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CartRepository, CartRepositoryError, DishRepository, DishRepositoryError, FavouriteRepository,
    FavouriteRepositoryError, IngredientRepository, IngredientRepositoryError, UsageRepository,
    UsageRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::{
    AdjustOutcome, AdjustmentPlan, AssociatedLine, CartItem, CartItemId, CartLine,
    CartValidationError, Category, Dish, DishId, DishIngredient, EmailAddress, Favourite,
    Ingredient, IngredientId, IngredientLine, IngredientSummary, SearchTerm, UsageEvent,
    UsageEventId, User, UserId, merged_quantity, plan_adjustment,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    ingredients: HashMap<IngredientId, Ingredient>,
    dishes: Vec<Dish>,
    associations: Vec<DishIngredient>,
    cart: Vec<CartItem>,
    favourites: Vec<Favourite>,
    usage: Vec<UsageEvent>,
}

impl Tables {
    fn has_dish(&self, id: &DishId) -> bool {
        self.dishes.iter().any(|dish| dish.id == *id)
    }

    fn summary(&self, id: &IngredientId) -> Option<IngredientSummary> {
        self.ingredients.get(id).map(|ingredient| IngredientSummary {
            id: ingredient.id,
            name: ingredient.name.clone(),
            image: ingredient.image.clone(),
        })
    }

    fn dishes_where(&self, predicate: impl Fn(&Dish) -> bool) -> Vec<Dish> {
        let mut dishes: Vec<Dish> = self
            .dishes
            .iter()
            .filter(|dish| predicate(dish))
            .cloned()
            .collect();
        dishes.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        dishes
    }
}

/// Shared, cloneable in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user so e-mail lookups can resolve it.
    pub fn insert_user(&self, user: User) {
        let mut tables = self.lock();
        tables.users.retain(|existing| existing.id != user.id);
        tables.users.push(user);
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Every method validates before mutating, so poisoned state is whole.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        self.lock()
            .ingredients
            .insert(ingredient.id, ingredient.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        Ok(self.lock().ingredients.get(id).cloned())
    }
}

#[async_trait]
impl DishRepository for InMemoryStore {
    async fn create_with_ingredients(
        &self,
        dish: &Dish,
        associations: &[DishIngredient],
    ) -> Result<(), DishRepositoryError> {
        let mut tables = self.lock();
        if associations
            .iter()
            .any(|row| !tables.ingredients.contains_key(&row.ingredient_id))
        {
            return Err(DishRepositoryError::ingredient_not_found());
        }
        for (index, row) in associations.iter().enumerate() {
            if associations[..index]
                .iter()
                .any(|earlier| earlier.ingredient_id == row.ingredient_id)
            {
                return Err(DishRepositoryError::duplicate_association());
            }
        }
        tables.dishes.push(dish.clone());
        tables.associations.extend_from_slice(associations);
        Ok(())
    }

    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DishRepositoryError> {
        Ok(self
            .lock()
            .dishes
            .iter()
            .find(|dish| dish.id == *id)
            .cloned())
    }

    async fn find_many(&self, ids: &[DishId]) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(self.lock().dishes_where(|dish| ids.contains(&dish.id)))
    }

    async fn list_all(&self) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(self.lock().dishes_where(|_| true))
    }

    async fn list_by_category(&self, category: &Category) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(self
            .lock()
            .dishes_where(|dish| dish.category == category.as_str()))
    }

    async fn search_by_name(&self, term: &SearchTerm) -> Result<Vec<Dish>, DishRepositoryError> {
        Ok(self.lock().dishes_where(|dish| term.matches(&dish.name)))
    }

    async fn ingredient_lines_for(
        &self,
        ids: &[DishId],
    ) -> Result<Vec<AssociatedLine>, DishRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .associations
            .iter()
            .filter(|row| ids.contains(&row.dish_id))
            .filter_map(|row| {
                tables.summary(&row.ingredient_id).map(|ingredient| AssociatedLine {
                    dish_id: row.dish_id,
                    line: IngredientLine {
                        ingredient,
                        quantity: row.quantity,
                    },
                })
            })
            .collect())
    }

    async fn add_association(
        &self,
        association: &DishIngredient,
    ) -> Result<(), DishRepositoryError> {
        let mut tables = self.lock();
        if !tables.has_dish(&association.dish_id) {
            return Err(DishRepositoryError::dish_not_found());
        }
        if !tables.ingredients.contains_key(&association.ingredient_id) {
            return Err(DishRepositoryError::ingredient_not_found());
        }
        if tables.associations.iter().any(|row| {
            row.dish_id == association.dish_id && row.ingredient_id == association.ingredient_id
        }) {
            return Err(DishRepositoryError::duplicate_association());
        }
        tables.associations.push(*association);
        Ok(())
    }
}

fn map_cart_rule(error: CartValidationError) -> CartRepositoryError {
    match error {
        CartValidationError::Overflow => CartRepositoryError::quantity_overflow(),
        CartValidationError::NonPositiveAddition
        | CartValidationError::NonPositiveNewRow => CartRepositoryError::non_positive_quantity(),
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn add_or_merge(&self, item: &CartItem) -> Result<CartItemId, CartRepositoryError> {
        let mut tables = self.lock();
        if !tables.ingredients.contains_key(&item.ingredient_id) {
            return Err(CartRepositoryError::ingredient_not_found());
        }
        if item.quantity <= 0 {
            return Err(CartRepositoryError::non_positive_quantity());
        }
        if let Some(row) = tables
            .cart
            .iter_mut()
            .find(|row| row.user_id == item.user_id && row.ingredient_id == item.ingredient_id)
        {
            row.quantity = merged_quantity(row.quantity, item.quantity).map_err(map_cart_rule)?;
            return Ok(row.id);
        }
        tables.cart.push(*item);
        Ok(item.id)
    }

    async fn adjust_or_remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
        delta: i32,
        new_id: CartItemId,
    ) -> Result<AdjustOutcome, CartRepositoryError> {
        let mut tables = self.lock();
        let position = tables
            .cart
            .iter()
            .position(|row| row.user_id == *user_id && row.ingredient_id == *ingredient_id);
        let existing = position.and_then(|index| tables.cart.get(index).copied());
        let plan = plan_adjustment(existing.map(|row| row.quantity), delta).map_err(map_cart_rule)?;

        match (plan, position, existing) {
            (AdjustmentPlan::Insert { quantity }, _, _) => {
                if !tables.ingredients.contains_key(ingredient_id) {
                    return Err(CartRepositoryError::ingredient_not_found());
                }
                tables.cart.push(CartItem {
                    id: new_id,
                    user_id: *user_id,
                    ingredient_id: *ingredient_id,
                    quantity,
                });
                Ok(AdjustOutcome::Updated {
                    id: new_id,
                    quantity,
                })
            }
            (AdjustmentPlan::Update { quantity }, Some(index), Some(row)) => {
                if let Some(stored) = tables.cart.get_mut(index) {
                    stored.quantity = quantity;
                }
                Ok(AdjustOutcome::Updated {
                    id: row.id,
                    quantity,
                })
            }
            (AdjustmentPlan::Delete, Some(index), _) => {
                tables.cart.remove(index);
                Ok(AdjustOutcome::Removed)
            }
            _ => Err(CartRepositoryError::non_positive_quantity()),
        }
    }

    async fn remove(
        &self,
        user_id: &UserId,
        ingredient_id: &IngredientId,
    ) -> Result<bool, CartRepositoryError> {
        let mut tables = self.lock();
        let before = tables.cart.len();
        tables
            .cart
            .retain(|row| !(row.user_id == *user_id && row.ingredient_id == *ingredient_id));
        Ok(tables.cart.len() < before)
    }

    async fn clear(&self, user_id: &UserId) -> Result<usize, CartRepositoryError> {
        let mut tables = self.lock();
        let before = tables.cart.len();
        tables.cart.retain(|row| row.user_id != *user_id);
        Ok(before - tables.cart.len())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CartLine>, CartRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .cart
            .iter()
            .filter(|row| row.user_id == *user_id)
            .filter_map(|row| {
                tables.summary(&row.ingredient_id).map(|ingredient| CartLine {
                    item: *row,
                    ingredient,
                })
            })
            .collect())
    }
}

#[async_trait]
impl FavouriteRepository for InMemoryStore {
    async fn insert(&self, favourite: &Favourite) -> Result<bool, FavouriteRepositoryError> {
        let mut tables = self.lock();
        if !tables.has_dish(&favourite.dish_id) {
            return Err(FavouriteRepositoryError::dish_not_found());
        }
        if tables
            .favourites
            .iter()
            .any(|row| row.user_id == favourite.user_id && row.dish_id == favourite.dish_id)
        {
            return Ok(false);
        }
        tables.favourites.push(*favourite);
        Ok(true)
    }

    async fn remove(
        &self,
        user_id: &UserId,
        dish_id: &DishId,
    ) -> Result<bool, FavouriteRepositoryError> {
        let mut tables = self.lock();
        let before = tables.favourites.len();
        tables
            .favourites
            .retain(|row| !(row.user_id == *user_id && row.dish_id == *dish_id));
        Ok(tables.favourites.len() < before)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favourite>, FavouriteRepositoryError> {
        Ok(self
            .lock()
            .favourites
            .iter()
            .filter(|row| row.user_id == *user_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl UsageRepository for InMemoryStore {
    async fn record(&self, event: &UsageEvent) -> Result<(), UsageRepositoryError> {
        let mut tables = self.lock();
        if !tables.has_dish(&event.dish_id) {
            return Err(UsageRepositoryError::dish_not_found());
        }
        tables.usage.push(*event);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UsageEvent>, UsageRepositoryError> {
        Ok(self
            .lock()
            .usage
            .iter()
            .filter(|event| event.user_id == *user_id)
            .copied()
            .collect())
    }

    async fn remove(
        &self,
        event_id: &UsageEventId,
        user_id: &UserId,
    ) -> Result<bool, UsageRepositoryError> {
        let mut tables = self.lock();
        let before = tables.usage.len();
        tables
            .usage
            .retain(|event| !(event.id == *event_id && event.user_id == *user_id));
        Ok(tables.usage.len() < before)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn register(&self, user: &User) -> Result<(), UserDirectoryError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserDirectoryError::duplicate_email(user.email.as_ref()));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.lock().users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email == *email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssociationQuantity, DishDraft};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn ingredient(store: &InMemoryStore, name: &str) -> IngredientId {
        let ingredient = Ingredient::new(name, None).expect("valid ingredient");
        store
            .lock()
            .ingredients
            .insert(ingredient.id, ingredient.clone());
        ingredient.id
    }

    fn dish(name: &str) -> Dish {
        Dish::from_draft(
            UserId::random(),
            DishDraft {
                name: name.to_owned(),
                ..DishDraft::default()
            },
            Utc::now(),
        )
        .expect("valid dish")
    }

    fn quantity(value: f64) -> AssociationQuantity {
        AssociationQuantity::new(value).expect("positive")
    }

    #[rstest]
    #[tokio::test]
    async fn dish_creation_is_all_or_nothing(store: InMemoryStore) {
        let salt = ingredient(&store, "Salt");
        let soup = dish("Soup");
        let rows = [
            DishIngredient::new(soup.id, salt, quantity(1.0)),
            DishIngredient::new(soup.id, IngredientId::random(), quantity(2.0)),
        ];

        let error = store
            .create_with_ingredients(&soup, &rows)
            .await
            .expect_err("missing ingredient");

        assert_eq!(error, DishRepositoryError::ingredient_not_found());
        let tables = store.lock();
        assert!(tables.dishes.is_empty());
        assert!(tables.associations.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn merge_accumulates_into_one_row(store: InMemoryStore) {
        let rice = ingredient(&store, "Rice");
        let user = UserId::random();
        let first = CartItem {
            id: CartItemId::random(),
            user_id: user,
            ingredient_id: rice,
            quantity: 2,
        };
        let second = CartItem {
            id: CartItemId::random(),
            quantity: 3,
            ..first
        };

        let first_id = store.add_or_merge(&first).await.expect("first merge");
        let second_id = store.add_or_merge(&second).await.expect("second merge");

        assert_eq!(first_id, second_id);
        let lines = CartRepository::list_for_user(&store, &user)
            .await
            .expect("listing");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item.quantity, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn merge_reports_overflow(store: InMemoryStore) {
        let rice = ingredient(&store, "Rice");
        let item = CartItem {
            id: CartItemId::random(),
            user_id: UserId::random(),
            ingredient_id: rice,
            quantity: i32::MAX,
        };
        store.add_or_merge(&item).await.expect("first merge");

        let error = store
            .add_or_merge(&CartItem { quantity: 1, ..item })
            .await
            .expect_err("overflow");

        assert_eq!(error, CartRepositoryError::quantity_overflow());
    }

    #[rstest]
    #[tokio::test]
    async fn adjustment_below_zero_removes_row(store: InMemoryStore) {
        let rice = ingredient(&store, "Rice");
        let user = UserId::random();
        store
            .adjust_or_remove(&user, &rice, 2, CartItemId::random())
            .await
            .expect("insert");

        let outcome = store
            .adjust_or_remove(&user, &rice, -5, CartItemId::random())
            .await
            .expect("adjust");

        assert_eq!(outcome, AdjustOutcome::Removed);
        assert!(store.lock().cart.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_favourite_is_not_inserted(store: InMemoryStore) {
        let soup = dish("Soup");
        store
            .create_with_ingredients(&soup, &[])
            .await
            .expect("dish stored");
        let favourite = Favourite::new(UserId::random(), soup.id, Utc::now());

        let first = FavouriteRepository::insert(&store, &favourite)
            .await
            .expect("first insert");
        let again = Favourite::new(favourite.user_id, soup.id, Utc::now());
        let second = FavouriteRepository::insert(&store, &again)
            .await
            .expect("second insert");

        assert!(first);
        assert!(!second);
    }

    #[rstest]
    #[tokio::test]
    async fn usage_removal_is_scoped_to_owner(store: InMemoryStore) {
        let soup = dish("Soup");
        store
            .create_with_ingredients(&soup, &[])
            .await
            .expect("dish stored");
        let event = UsageEvent::new(UserId::random(), soup.id, Utc::now());
        store.record(&event).await.expect("recorded");

        let removed = UsageRepository::remove(&store, &event.id, &UserId::random())
            .await
            .expect("remove");

        assert!(!removed);
        assert_eq!(store.lock().usage.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn registering_a_taken_email_fails(store: InMemoryStore) {
        let email = EmailAddress::new("cook@example.com").expect("valid email");
        let first = User::register("Cook", email.clone()).expect("valid user");
        let second = User::register("Other cook", email).expect("valid user");
        store.register(&first).await.expect("first registration");

        let error = store.register(&second).await.expect_err("duplicate");

        assert_eq!(error, UserDirectoryError::duplicate_email("cook@example.com"));
        assert_eq!(store.lock().users.len(), 1);
    }
}
