//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    CartItem, CartItemId, Dish, DishId, DishIngredient, EmailAddress, Favourite, FavouriteId,
    Ingredient, IngredientId, IngredientSummary, Nutrients, UsageEvent, UsageEventId, User,
    UserId,
};

use super::schema::{
    cart_items, dish_ingredients, dishes, favourite_dishes, ingredients, usage_events, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
}

impl UserRow {
    /// Convert into a domain user, rejecting malformed stored e-mail.
    pub fn into_user(self) -> Result<User, String> {
        let email = EmailAddress::new(&self.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", self.id))?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            user_name: self.user_name,
            email,
        })
    }
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub user_name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            user_name: &user.user_name,
            email: user.email.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingredient models
// ---------------------------------------------------------------------------

/// Row struct for reading from the ingredients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub name: String,
    pub image: Option<Vec<u8>>,
}

impl IngredientRow {
    pub fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: IngredientId::from_uuid(self.id),
            name: self.name,
            image: self.image,
        }
    }

    pub fn into_summary(self) -> IngredientSummary {
        IngredientSummary {
            id: IngredientId::from_uuid(self.id),
            name: self.name,
            image: self.image,
        }
    }
}

/// Insertable struct for creating ingredient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub image: Option<&'a [u8]>,
}

impl<'a> From<&'a Ingredient> for NewIngredientRow<'a> {
    fn from(ingredient: &'a Ingredient) -> Self {
        Self {
            id: *ingredient.id.as_uuid(),
            name: &ingredient.name,
            image: ingredient.image.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dish models
// ---------------------------------------------------------------------------

/// Row struct for reading from the dishes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub preparation_minutes: i32,
    pub calories: i32,
    pub fats: f64,
    pub carbs: f64,
    pub proteins: f64,
    pub category: String,
    pub image: Option<Vec<u8>>,
    pub video_instructions: Option<Vec<u8>>,
    pub instruction: String,
    pub created_at: DateTime<Utc>,
}

impl DishRow {
    pub fn into_dish(self) -> Dish {
        Dish {
            id: DishId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.owner_id),
            name: self.name,
            preparation_minutes: self.preparation_minutes,
            calories: self.calories,
            nutrients: Nutrients {
                fats: self.fats,
                carbs: self.carbs,
                proteins: self.proteins,
            },
            category: self.category,
            image: self.image,
            video_instructions: self.video_instructions,
            instruction: self.instruction,
            created_at: self.created_at,
        }
    }
}

/// Insertable struct for creating dish records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dishes)]
pub(crate) struct NewDishRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub preparation_minutes: i32,
    pub calories: i32,
    pub fats: f64,
    pub carbs: f64,
    pub proteins: f64,
    pub category: &'a str,
    pub image: Option<&'a [u8]>,
    pub video_instructions: Option<&'a [u8]>,
    pub instruction: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Dish> for NewDishRow<'a> {
    fn from(dish: &'a Dish) -> Self {
        Self {
            id: *dish.id.as_uuid(),
            owner_id: *dish.owner_id.as_uuid(),
            name: &dish.name,
            preparation_minutes: dish.preparation_minutes,
            calories: dish.calories,
            fats: dish.nutrients.fats,
            carbs: dish.nutrients.carbs,
            proteins: dish.nutrients.proteins,
            category: &dish.category,
            image: dish.image.as_deref(),
            video_instructions: dish.video_instructions.as_deref(),
            instruction: &dish.instruction,
            created_at: dish.created_at,
        }
    }
}

/// Insertable struct for dish-to-ingredient links.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = dish_ingredients)]
pub(crate) struct NewDishIngredientRow {
    pub id: Uuid,
    pub dish_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: f64,
}

impl From<&DishIngredient> for NewDishIngredientRow {
    fn from(association: &DishIngredient) -> Self {
        Self {
            id: *association.id.as_uuid(),
            dish_id: *association.dish_id.as_uuid(),
            ingredient_id: *association.ingredient_id.as_uuid(),
            quantity: association.quantity.value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cart models
// ---------------------------------------------------------------------------

/// Row struct for reading from the cart_items table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CartItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: CartItemId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            ingredient_id: IngredientId::from_uuid(row.ingredient_id),
            quantity: row.quantity,
        }
    }
}

/// Insertable struct for cart rows.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = cart_items)]
pub(crate) struct NewCartItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: i32,
}

impl From<&CartItem> for NewCartItemRow {
    fn from(item: &CartItem) -> Self {
        Self {
            id: *item.id.as_uuid(),
            user_id: *item.user_id.as_uuid(),
            ingredient_id: *item.ingredient_id.as_uuid(),
            quantity: item.quantity,
        }
    }
}

// ---------------------------------------------------------------------------
// Favourites and usage models
// ---------------------------------------------------------------------------

/// Row struct for favourite bookmarks; also used for inserts.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = favourite_dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavouriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FavouriteRow> for Favourite {
    fn from(row: FavouriteRow) -> Self {
        Self {
            id: FavouriteId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            dish_id: DishId::from_uuid(row.dish_id),
            created_at: row.created_at,
        }
    }
}

impl From<&Favourite> for FavouriteRow {
    fn from(favourite: &Favourite) -> Self {
        Self {
            id: *favourite.id.as_uuid(),
            user_id: *favourite.user_id.as_uuid(),
            dish_id: *favourite.dish_id.as_uuid(),
            created_at: favourite.created_at,
        }
    }
}

/// Row struct for usage events; also used for inserts.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = usage_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UsageEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<UsageEventRow> for UsageEvent {
    fn from(row: UsageEventRow) -> Self {
        Self {
            id: UsageEventId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            dish_id: DishId::from_uuid(row.dish_id),
            created_at: row.created_at,
        }
    }
}

impl From<&UsageEvent> for UsageEventRow {
    fn from(event: &UsageEvent) -> Self {
        Self {
            id: *event.id.as_uuid(),
            user_id: *event.user_id.as_uuid(),
            dish_id: *event.dish_id.as_uuid(),
            created_at: event.created_at,
        }
    }
}
