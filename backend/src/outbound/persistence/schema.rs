//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        user_name -> Varchar,
        /// Stored lowercased; uniqueness is enforced on `lower(email)`.
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue ingredients.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
        image -> Nullable<Bytea>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes. Nutrients are stored in grams.
    dishes (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        preparation_minutes -> Int4,
        calories -> Int4,
        fats -> Float8,
        carbs -> Float8,
        proteins -> Float8,
        category -> Varchar,
        image -> Nullable<Bytea>,
        video_instructions -> Nullable<Bytea>,
        instruction -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Quantified dish-to-ingredient links, unique per `(dish_id, ingredient_id)`.
    dish_ingredients (id) {
        id -> Uuid,
        dish_id -> Uuid,
        ingredient_id -> Uuid,
        quantity -> Float8,
    }
}

diesel::table! {
    /// Cart ledger rows, unique per `(user_id, ingredient_id)`. Quantity is
    /// always positive.
    cart_items (id) {
        id -> Uuid,
        user_id -> Uuid,
        ingredient_id -> Uuid,
        quantity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favourite bookmarks, unique per `(user_id, dish_id)`.
    favourite_dishes (id) {
        id -> Uuid,
        user_id -> Uuid,
        dish_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only dish usage log.
    usage_events (id) {
        id -> Uuid,
        user_id -> Uuid,
        dish_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(dishes -> users (owner_id));
diesel::joinable!(dish_ingredients -> dishes (dish_id));
diesel::joinable!(dish_ingredients -> ingredients (ingredient_id));
diesel::joinable!(cart_items -> ingredients (ingredient_id));
diesel::joinable!(cart_items -> users (user_id));
diesel::joinable!(favourite_dishes -> dishes (dish_id));
diesel::joinable!(favourite_dishes -> users (user_id));
diesel::joinable!(usage_events -> dishes (dish_id));
diesel::joinable!(usage_events -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    dishes,
    dish_ingredients,
    cart_items,
    favourite_dishes,
    usage_events,
);
