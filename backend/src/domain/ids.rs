//! Strongly typed surrogate identifiers.
//!
//! Every persisted record is keyed by a UUID v4 generated in the domain, so
//! identities never depend on the storage backend's sequence generators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a user known to the external authentication layer.
    UserId
);
uuid_identifier!(
    /// Identifier of a catalogue dish.
    DishId
);
uuid_identifier!(
    /// Identifier of a catalogue ingredient.
    IngredientId
);
uuid_identifier!(
    /// Identifier of a dish-to-ingredient association row.
    DishIngredientId
);
uuid_identifier!(
    /// Identifier of a cart ledger row.
    CartItemId
);
uuid_identifier!(
    /// Identifier of a favourite bookmark.
    FavouriteId
);
uuid_identifier!(
    /// Identifier of a usage statistics event.
    UsageEventId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn random_identifiers_are_distinct() {
        assert_ne!(DishId::random(), DishId::random());
    }

    #[rstest]
    fn parses_and_displays_uuid_text() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: IngredientId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn rejects_malformed_text() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[rstest]
    fn serialises_transparently() {
        let id = CartItemId::from_uuid(Uuid::nil());
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::json!(Uuid::nil().to_string()));
    }
}
