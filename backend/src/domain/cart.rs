//! Per-user cart ledger rules.
//!
//! A cart row exists for a `(user, ingredient)` pair only while its quantity
//! is strictly positive. Adapters execute the decisions computed here inside
//! an atomic statement or a row-locked transaction.

use serde::{Deserialize, Serialize};

use super::{CartItemId, IngredientId, IngredientSummary, UserId};

/// Validation failures for cart quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CartValidationError {
    /// Merging requires a positive amount.
    #[error("quantity to add must be greater than zero")]
    NonPositiveAddition,
    /// A new row cannot start at a non-positive quantity.
    #[error("cannot add non-positive quantity")]
    NonPositiveNewRow,
    /// The resulting quantity does not fit the ledger's integer range.
    #[error("cart quantity overflow")]
    Overflow,
}

/// A persisted cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub ingredient_id: IngredientId,
    pub quantity: i32,
}

/// A cart row joined with the ingredient it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: CartItem,
    pub ingredient: IngredientSummary,
}

/// Result of an adjust-or-remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum AdjustOutcome {
    /// The row dropped to zero or below and was deleted.
    Removed,
    /// The row now holds a positive quantity.
    Updated { id: CartItemId, quantity: i32 },
}

/// What an adapter must do to apply an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentPlan {
    /// Insert a new row with the given quantity.
    Insert { quantity: i32 },
    /// Overwrite the existing row's quantity.
    Update { quantity: i32 },
    /// Delete the existing row.
    Delete,
}

/// Check that an amount may be merged into a cart.
pub fn validate_addition(delta: i32) -> Result<i32, CartValidationError> {
    if delta > 0 {
        Ok(delta)
    } else {
        Err(CartValidationError::NonPositiveAddition)
    }
}

/// Quantity after merging `delta` into `existing`.
pub fn merged_quantity(existing: i32, delta: i32) -> Result<i32, CartValidationError> {
    existing
        .checked_add(delta)
        .ok_or(CartValidationError::Overflow)
}

/// Decide how to apply `delta` given the current row quantity, if any.
///
/// Any delta, zero included, is applied to an existing row; only a missing
/// row requires a positive delta.
///
/// # Examples
/// ```
/// use foodapp::domain::{AdjustmentPlan, plan_adjustment};
///
/// assert_eq!(plan_adjustment(Some(2), -5), Ok(AdjustmentPlan::Delete));
/// assert_eq!(plan_adjustment(Some(2), 3), Ok(AdjustmentPlan::Update { quantity: 5 }));
/// assert!(plan_adjustment(None, -1).is_err());
/// ```
pub fn plan_adjustment(
    existing: Option<i32>,
    delta: i32,
) -> Result<AdjustmentPlan, CartValidationError> {
    match existing {
        Some(current) => {
            let next = merged_quantity(current, delta)?;
            if next <= 0 {
                Ok(AdjustmentPlan::Delete)
            } else {
                Ok(AdjustmentPlan::Update { quantity: next })
            }
        }
        None if delta > 0 => Ok(AdjustmentPlan::Insert { quantity: delta }),
        None => Err(CartValidationError::NonPositiveNewRow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(2), -5, Ok(AdjustmentPlan::Delete))]
    #[case(Some(2), -2, Ok(AdjustmentPlan::Delete))]
    #[case(Some(2), -1, Ok(AdjustmentPlan::Update { quantity: 1 }))]
    #[case(Some(2), 0, Ok(AdjustmentPlan::Update { quantity: 2 }))]
    #[case(None, 0, Err(CartValidationError::NonPositiveNewRow))]
    #[case(Some(2), 4, Ok(AdjustmentPlan::Update { quantity: 6 }))]
    #[case(None, 3, Ok(AdjustmentPlan::Insert { quantity: 3 }))]
    #[case(None, -3, Err(CartValidationError::NonPositiveNewRow))]
    #[case(Some(i32::MAX), 1, Err(CartValidationError::Overflow))]
    fn plans_adjustments(
        #[case] existing: Option<i32>,
        #[case] delta: i32,
        #[case] expected: Result<AdjustmentPlan, CartValidationError>,
    ) {
        assert_eq!(plan_adjustment(existing, delta), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn additions_must_be_positive(#[case] delta: i32) {
        assert_eq!(
            validate_addition(delta),
            Err(CartValidationError::NonPositiveAddition)
        );
    }

    #[rstest]
    fn merge_detects_overflow() {
        assert_eq!(merged_quantity(2, 3), Ok(5));
        assert_eq!(
            merged_quantity(i32::MAX, 1),
            Err(CartValidationError::Overflow)
        );
    }
}
