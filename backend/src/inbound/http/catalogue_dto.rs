//! Response and request payloads shared by the dish, cart, favourites and
//! statistics endpoints.
//!
//! Identifiers are rendered as UUID strings, timestamps as RFC 3339 and
//! binary media as standard base64.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AdjustOutcome, CartLine, Dish, DishWithIngredients, IngredientLine, IngredientSummary,
    Nutrients, UsageEntry,
};
use crate::inbound::http::validation::encode_base64;

#[derive(Debug, Deserialize)]
pub(super) struct DishPath {
    pub(super) dish_id: String,
}

/// `?q=` filter used by the category and name search endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct TermQuery {
    pub(super) q: Option<String>,
}

/// `?email=` selector used by the listing endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct EmailQuery {
    pub(super) email: Option<String>,
}

/// Identifier of a newly created resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

impl CreatedResponse {
    pub(super) fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

/// Ingredient as embedded in dish and cart payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientSummaryResponse {
    pub id: String,
    #[schema(example = "Pecorino")]
    pub name: String,
    /// Base64 encoded image.
    pub image: Option<String>,
}

impl From<IngredientSummary> for IngredientSummaryResponse {
    fn from(summary: IngredientSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            image: encode_base64(summary.image.as_deref()),
        }
    }
}

/// One ingredient of a dish with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientLineResponse {
    pub ingredient: IngredientSummaryResponse,
    #[schema(example = 1.5)]
    pub quantity: f64,
}

impl From<IngredientLine> for IngredientLineResponse {
    fn from(line: IngredientLine) -> Self {
        Self {
            ingredient: line.ingredient.into(),
            quantity: line.quantity.value(),
        }
    }
}

/// Macronutrients in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct NutrientsBody {
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub proteins: f64,
}

impl From<Nutrients> for NutrientsBody {
    fn from(value: Nutrients) -> Self {
        Self {
            fats: value.fats,
            carbs: value.carbs,
            proteins: value.proteins,
        }
    }
}

impl From<NutrientsBody> for Nutrients {
    fn from(value: NutrientsBody) -> Self {
        Self {
            fats: value.fats,
            carbs: value.carbs,
            proteins: value.proteins,
        }
    }
}

/// Dish with its ingredient lines sorted by ingredient name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
    pub id: String,
    pub owner_id: String,
    #[schema(example = "Cacio e pepe")]
    pub name: String,
    /// Preparation time in minutes.
    pub preparation_time: i32,
    pub calories: i32,
    pub nutrients: NutrientsBody,
    pub category: String,
    pub image: Option<String>,
    pub video_instructions: Option<String>,
    pub instruction: String,
    #[schema(example = "2026-01-15T12:00:00Z")]
    pub created_at: String,
    pub ingredients: Vec<IngredientLineResponse>,
}

impl From<DishWithIngredients> for DishResponse {
    fn from(view: DishWithIngredients) -> Self {
        let DishWithIngredients { dish, ingredients } = view;
        let Dish {
            id,
            owner_id,
            name,
            preparation_minutes,
            calories,
            nutrients,
            category,
            image,
            video_instructions,
            instruction,
            created_at,
        } = dish;
        Self {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name,
            preparation_time: preparation_minutes,
            calories,
            nutrients: nutrients.into(),
            category,
            image: encode_base64(image.as_deref()),
            video_instructions: encode_base64(video_instructions.as_deref()),
            instruction,
            created_at: created_at.to_rfc3339(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

pub(super) fn dish_list(views: Vec<DishWithIngredients>) -> Vec<DishResponse> {
    views.into_iter().map(DishResponse::from).collect()
}

/// A cart row joined with its ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLineResponse {
    pub id: String,
    pub ingredient: IngredientSummaryResponse,
    pub quantity: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item.id.to_string(),
            ingredient: line.ingredient.into(),
            quantity: line.item.quantity,
        }
    }
}

/// Result of a signed cart adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustResponse {
    /// Either `updated` or `removed`.
    #[schema(example = "updated")]
    pub outcome: String,
    /// Row identifier; absent when the row was removed.
    pub id: Option<String>,
    /// New quantity; absent when the row was removed.
    pub quantity: Option<i32>,
}

impl From<AdjustOutcome> for AdjustResponse {
    fn from(outcome: AdjustOutcome) -> Self {
        match outcome {
            AdjustOutcome::Removed => Self {
                outcome: "removed".to_owned(),
                id: None,
                quantity: None,
            },
            AdjustOutcome::Updated { id, quantity } => Self {
                outcome: "updated".to_owned(),
                id: Some(id.to_string()),
                quantity: Some(quantity),
            },
        }
    }
}

/// A usage event joined with the dish it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntryResponse {
    pub event_id: String,
    #[schema(example = "2026-01-15T12:00:00Z")]
    pub used_at: String,
    pub dish: DishResponse,
}

impl From<UsageEntry> for UsageEntryResponse {
    fn from(entry: UsageEntry) -> Self {
        Self {
            event_id: entry.event.id.to_string(),
            used_at: entry.event.created_at.to_rfc3339(),
            dish: entry.dish.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssociationQuantity, CartItemId, IngredientId};
    use rstest::rstest;

    #[rstest]
    fn ingredient_images_are_base64_encoded() {
        let summary = IngredientSummary {
            id: IngredientId::random(),
            name: "Basil".to_owned(),
            image: Some(b"png".to_vec()),
        };

        let response = IngredientSummaryResponse::from(summary);

        assert_eq!(response.image.as_deref(), Some("cG5n"));
    }

    #[rstest]
    fn lines_expose_plain_quantities() {
        let line = IngredientLine {
            ingredient: IngredientSummary {
                id: IngredientId::random(),
                name: "Rice".to_owned(),
                image: None,
            },
            quantity: AssociationQuantity::new(0.25).expect("positive"),
        };

        let response = IngredientLineResponse::from(line);

        assert!(response.ingredient.image.is_none());
        assert!((response.quantity - 0.25).abs() < f64::EPSILON);
    }

    #[rstest]
    fn removed_adjustment_has_no_row() {
        let response = AdjustResponse::from(AdjustOutcome::Removed);
        assert_eq!(response.outcome, "removed");
        assert!(response.id.is_none());
    }

    #[rstest]
    fn updated_adjustment_carries_quantity() {
        let id = CartItemId::random();
        let response = AdjustResponse::from(AdjustOutcome::Updated { id, quantity: 4 });
        assert_eq!(response.id, Some(id.to_string()));
        assert_eq!(response.quantity, Some(4));
    }
}
