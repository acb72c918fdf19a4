//! Shared Diesel error classification for the repository adapters.
//!
//! Each adapter turns a [`DieselFailure`] into its own port error, choosing
//! which foreign-key constraints mean "dish not found" or "ingredient not
//! found". Constraint names follow PostgreSQL's defaults for the columns
//! declared in the migrations (for example `dish_ingredients_dish_id_fkey`).

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failures, reduced to what the adapters need to decide on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A foreign-key constraint rejected the write.
    ForeignKey { constraint: Option<String> },
    /// A unique constraint rejected the write.
    Unique { constraint: Option<String> },
    /// A check constraint rejected the write.
    Check { constraint: Option<String> },
    /// A computed value did not fit its column type.
    OutOfRange,
    /// The connection was lost mid-operation.
    Connection(&'static str),
    /// Any other failure.
    Query(&'static str),
}

impl DieselFailure {
    /// Whether this is a foreign-key failure on a constraint naming `column`.
    pub fn is_foreign_key_on(&self, column: &str) -> bool {
        matches!(
            self,
            Self::ForeignKey { constraint: Some(name) } if name.contains(column)
        )
    }
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKey { constraint },
                DatabaseErrorKind::UniqueViolation => DieselFailure::Unique { constraint },
                DatabaseErrorKind::CheckViolation => DieselFailure::Check { constraint },
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error")
                }
                _ if info.message().contains("out of range") => DieselFailure::OutOfRange,
                _ => DieselFailure::Query("database error"),
            }
        }
        _ => DieselFailure::Query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::NotFound),
            DieselFailure::Query("record not found")
        );
    }

    #[rstest]
    #[case(Some("dish_ingredients_dish_id_fkey"), "dish_id", true)]
    #[case(Some("dish_ingredients_ingredient_id_fkey"), "dish_id", false)]
    #[case(None, "dish_id", false)]
    fn foreign_key_matching_uses_constraint_name(
        #[case] constraint: Option<&str>,
        #[case] column: &str,
        #[case] expected: bool,
    ) {
        let failure = DieselFailure::ForeignKey {
            constraint: constraint.map(str::to_owned),
        };
        assert_eq!(failure.is_foreign_key_on(column), expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        assert_eq!(pool_error_message(PoolError::checkout("timed out")), "timed out");
    }
}
