//! Enriched dish views: a dish together with its quantified ingredients.
//!
//! [`DishWithIngredients::compose`] is the only place ingredient lines are
//! attached to a dish. Every read path (listing, category, search, single
//! dish, favourites, statistics) goes through it so a dish always renders the
//! same ingredient list in the same order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AssociationQuantity, Dish, DishId, IngredientId};

/// Minimal ingredient projection embedded in dish and cart views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummary {
    pub id: IngredientId,
    pub name: String,
    pub image: Option<Vec<u8>>,
}

/// One ingredient of a dish with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub ingredient: IngredientSummary,
    pub quantity: AssociationQuantity,
}

/// Ingredient line tagged with the dish it belongs to, as produced by batch
/// joins across many dishes.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociatedLine {
    pub dish_id: DishId,
    pub line: IngredientLine,
}

/// A dish enriched with its ingredient lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishWithIngredients {
    pub dish: Dish,
    pub ingredients: Vec<IngredientLine>,
}

/// Deterministic ordering for ingredient lines: by name, then identifier.
pub fn sort_lines(lines: &mut [IngredientLine]) {
    lines.sort_by(|left, right| {
        left.ingredient
            .name
            .cmp(&right.ingredient.name)
            .then_with(|| left.ingredient.id.cmp(&right.ingredient.id))
    });
}

impl DishWithIngredients {
    /// Attach ingredient lines to a dish.
    ///
    /// Lines are sorted by ingredient name then identifier so the result does
    /// not depend on the order the store returned them in.
    pub fn compose(dish: Dish, mut lines: Vec<IngredientLine>) -> Self {
        sort_lines(&mut lines);
        Self {
            dish,
            ingredients: lines,
        }
    }

    /// Compose views for many dishes from one batch of associated lines.
    ///
    /// Dish order is preserved; lines for dishes not in `dishes` are ignored.
    pub fn compose_all(dishes: Vec<Dish>, lines: Vec<AssociatedLine>) -> Vec<Self> {
        let mut by_dish: HashMap<DishId, Vec<IngredientLine>> = HashMap::new();
        for AssociatedLine { dish_id, line } in lines {
            by_dish.entry(dish_id).or_default().push(line);
        }
        dishes
            .into_iter()
            .map(|dish| {
                let lines = by_dish.remove(&dish.id).unwrap_or_default();
                Self::compose(dish, lines)
            })
            .collect()
    }
}
