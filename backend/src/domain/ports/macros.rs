//! Helper macro for declaring repository port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `DishRepositoryError::query("boom")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum PantryPortError {
            Unavailable { message: String } => "pantry unavailable: {message}",
            Shortfall { missing: u32 } => "short by {missing}",
            Spoiled { item: String, days: u32 } => "{item} spoiled after {days} days",
            Empty => "pantry is empty",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = PantryPortError::unavailable("locked");
        assert_eq!(err.to_string(), "pantry unavailable: locked");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = PantryPortError::shortfall(3_u32);
        assert_eq!(err.to_string(), "short by 3");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = PantryPortError::spoiled("milk", 4_u32);
        assert_eq!(err.to_string(), "milk spoiled after 4 days");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(PantryPortError::empty(), PantryPortError::Empty);
    }
}
