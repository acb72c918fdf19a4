//! Catalogue entities: ingredients, dishes, and their associations.
//!
//! Constructors validate every invariant up front so adapters only ever see
//! well-formed records. Binary fields are raw bytes here; encoding them for a
//! particular transport is an adapter concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DishId, DishIngredientId, IngredientId, UserId};

/// Validation failures raised while building catalogue records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogueValidationError {
    /// Ingredient names must contain visible characters.
    #[error("ingredient name must not be empty")]
    EmptyIngredientName,
    /// Dish names must contain visible characters.
    #[error("dish name must not be empty")]
    EmptyDishName,
    /// Preparation time is measured in whole minutes and cannot be negative.
    #[error("preparation time must not be negative")]
    NegativePreparationTime,
    /// Calories cannot be negative.
    #[error("calories must not be negative")]
    NegativeCalories,
    /// Macro-nutrient grams must be finite and non-negative.
    #[error("{nutrient} must be a finite, non-negative number of grams")]
    InvalidNutrient { nutrient: &'static str },
    /// Association quantities must be finite and strictly positive.
    #[error("ingredient quantity must be a finite number greater than zero")]
    InvalidQuantity { index: Option<usize> },
    /// A dish may reference each ingredient at most once.
    #[error("ingredient {ingredient_id} is listed more than once")]
    DuplicateIngredient {
        index: usize,
        ingredient_id: IngredientId,
    },
    /// Search terms must contain visible characters.
    #[error("search term must not be empty")]
    EmptySearchTerm,
    /// Category filters must contain visible characters.
    #[error("category must not be empty")]
    EmptyCategory,
}

impl CatalogueValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyIngredientName | Self::EmptyDishName => "name",
            Self::NegativePreparationTime => "preparationTime",
            Self::NegativeCalories => "calories",
            Self::InvalidNutrient { nutrient } => nutrient,
            Self::InvalidQuantity { .. } => "quantity",
            Self::DuplicateIngredient { .. } => "ingredients",
            Self::EmptySearchTerm | Self::EmptyCategory => "q",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyIngredientName
            | Self::EmptyDishName
            | Self::EmptySearchTerm
            | Self::EmptyCategory => "empty_value",
            Self::NegativePreparationTime | Self::NegativeCalories => "negative_value",
            Self::InvalidNutrient { .. } | Self::InvalidQuantity { .. } => "invalid_number",
            Self::DuplicateIngredient { .. } => "duplicate_ingredient",
        }
    }

    /// Position within a list payload, when the failure refers to one entry.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidQuantity { index } => *index,
            Self::DuplicateIngredient { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn trimmed_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// A reusable catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub image: Option<Vec<u8>>,
}

impl Ingredient {
    /// Build a new ingredient with a freshly generated identifier.
    ///
    /// # Examples
    /// ```
    /// use foodapp::domain::Ingredient;
    ///
    /// let basil = Ingredient::new("  Basil ", None).expect("valid name");
    /// assert_eq!(basil.name, "Basil");
    /// ```
    pub fn new(
        name: impl AsRef<str>,
        image: Option<Vec<u8>>,
    ) -> Result<Self, CatalogueValidationError> {
        let name = trimmed_non_empty(name.as_ref())
            .ok_or(CatalogueValidationError::EmptyIngredientName)?;
        Ok(Self {
            id: IngredientId::random(),
            name,
            image,
        })
    }
}

/// Macro-nutrient content of a dish in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    pub fats: f64,
    pub carbs: f64,
    pub proteins: f64,
}

impl Nutrients {
    fn validate(self) -> Result<Self, CatalogueValidationError> {
        for (nutrient, grams) in [
            ("fats", self.fats),
            ("carbs", self.carbs),
            ("proteins", self.proteins),
        ] {
            if !grams.is_finite() || grams < 0.0 {
                return Err(CatalogueValidationError::InvalidNutrient { nutrient });
            }
        }
        Ok(self)
    }
}

/// Caller-supplied dish attributes prior to validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DishDraft {
    pub name: String,
    pub preparation_minutes: i32,
    pub calories: i32,
    pub nutrients: Nutrients,
    pub category: String,
    pub image: Option<Vec<u8>>,
    pub video_instructions: Option<Vec<u8>>,
    pub instruction: String,
}

/// A recipe record owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub owner_id: UserId,
    pub name: String,
    pub preparation_minutes: i32,
    pub calories: i32,
    pub nutrients: Nutrients,
    pub category: String,
    pub image: Option<Vec<u8>>,
    pub video_instructions: Option<Vec<u8>>,
    pub instruction: String,
    pub created_at: DateTime<Utc>,
}

impl Dish {
    /// Validate a draft and stamp it with identity, owner, and creation time.
    pub fn from_draft(
        owner_id: UserId,
        draft: DishDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CatalogueValidationError> {
        let DishDraft {
            name,
            preparation_minutes,
            calories,
            nutrients,
            category,
            image,
            video_instructions,
            instruction,
        } = draft;

        let name = trimmed_non_empty(&name).ok_or(CatalogueValidationError::EmptyDishName)?;
        if preparation_minutes < 0 {
            return Err(CatalogueValidationError::NegativePreparationTime);
        }
        if calories < 0 {
            return Err(CatalogueValidationError::NegativeCalories);
        }
        let nutrients = nutrients.validate()?;

        Ok(Self {
            id: DishId::random(),
            owner_id,
            name,
            preparation_minutes,
            calories,
            nutrients,
            category: category.trim().to_owned(),
            image,
            video_instructions,
            instruction,
            created_at,
        })
    }
}

/// Unit-less quantity of an ingredient within a dish.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AssociationQuantity(f64);

impl AssociationQuantity {
    /// Accept finite values strictly greater than zero.
    pub fn new(value: f64) -> Result<Self, CatalogueValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CatalogueValidationError::InvalidQuantity { index: None })
        }
    }

    /// Raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AssociationQuantity {
    type Error = CatalogueValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssociationQuantity> for f64 {
    fn from(value: AssociationQuantity) -> Self {
        value.0
    }
}

/// One requested ingredient for a new dish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientPortion {
    pub ingredient_id: IngredientId,
    pub quantity: AssociationQuantity,
}

impl IngredientPortion {
    /// Validate raw `(ingredient, quantity)` pairs.
    ///
    /// Rejects non-positive or non-finite quantities and repeated
    /// ingredients, reporting the offending position.
    pub fn validate_all(
        pairs: &[(IngredientId, f64)],
    ) -> Result<Vec<Self>, CatalogueValidationError> {
        let mut portions: Vec<Self> = Vec::with_capacity(pairs.len());
        for (index, (ingredient_id, quantity)) in pairs.iter().copied().enumerate() {
            let quantity = AssociationQuantity::new(quantity)
                .map_err(|_| CatalogueValidationError::InvalidQuantity { index: Some(index) })?;
            if portions
                .iter()
                .any(|portion| portion.ingredient_id == ingredient_id)
            {
                return Err(CatalogueValidationError::DuplicateIngredient {
                    index,
                    ingredient_id,
                });
            }
            portions.push(Self {
                ingredient_id,
                quantity,
            });
        }
        Ok(portions)
    }
}

/// Persisted link between a dish and an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishIngredient {
    pub id: DishIngredientId,
    pub dish_id: DishId,
    pub ingredient_id: IngredientId,
    pub quantity: AssociationQuantity,
}

impl DishIngredient {
    /// Create a new association row with a fresh identifier.
    pub fn new(dish_id: DishId, ingredient_id: IngredientId, quantity: AssociationQuantity) -> Self {
        Self {
            id: DishIngredientId::random(),
            dish_id,
            ingredient_id,
            quantity,
        }
    }
}

/// Case-insensitive substring filter over dish names.
///
/// `"cut"` matches `"Coconut Curry"` and `"CUTLET"` but not `"Cabbage Soup"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Accept any term with visible characters.
    ///
    /// Surrounding whitespace is kept and takes part in the match, so
    /// `" Soup"` finds `"Tomato Soup"` but not `"TomatoSoup"`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogueValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(CatalogueValidationError::EmptySearchTerm);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the term as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` contains the term, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }

    /// SQL `LIKE` pattern with wildcard characters in the term escaped.
    ///
    /// The pattern uses `\` as the escape character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Exact-match category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    /// Accept any category with visible characters, trimming surrounding space.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogueValidationError> {
        trimmed_non_empty(raw.as_ref())
            .map(Self)
            .ok_or(CatalogueValidationError::EmptyCategory)
    }

    /// Borrow the trimmed category.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
