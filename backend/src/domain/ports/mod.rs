//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UserDirectory`]) are implemented by the
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! the domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_command;
mod cart_query;
mod cart_repository;
mod catalogue_command;
mod catalogue_query;
mod dish_repository;
mod favourite_repository;
mod favourites_command;
mod favourites_query;
mod ingredient_repository;
mod statistics_command;
mod statistics_query;
mod usage_repository;
mod user_directory;

#[cfg(test)]
pub use cart_command::MockCartCommand;
pub use cart_command::{CartCommand, FixtureCartCommand};
#[cfg(test)]
pub use cart_query::MockCartQuery;
pub use cart_query::{CartQuery, FixtureCartQuery};
#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, CartRepositoryError, FixtureCartRepository};
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::{
    AddAssociationRequest, CatalogueCommand, CreateDishRequest, CreateIngredientRequest,
    FixtureCatalogueCommand,
};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{CatalogueQuery, FixtureCatalogueQuery};
#[cfg(test)]
pub use dish_repository::MockDishRepository;
pub use dish_repository::{DishRepository, DishRepositoryError, FixtureDishRepository};
#[cfg(test)]
pub use favourite_repository::MockFavouriteRepository;
pub use favourite_repository::{
    FavouriteRepository, FavouriteRepositoryError, FixtureFavouriteRepository,
};
#[cfg(test)]
pub use favourites_command::MockFavouritesCommand;
pub use favourites_command::{FavouritesCommand, FixtureFavouritesCommand};
#[cfg(test)]
pub use favourites_query::MockFavouritesQuery;
pub use favourites_query::{FavouritesQuery, FixtureFavouritesQuery};
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{
    FixtureIngredientRepository, IngredientRepository, IngredientRepositoryError,
};
#[cfg(test)]
pub use statistics_command::MockStatisticsCommand;
pub use statistics_command::{FixtureStatisticsCommand, StatisticsCommand};
#[cfg(test)]
pub use statistics_query::MockStatisticsQuery;
pub use statistics_query::{FixtureStatisticsQuery, StatisticsQuery};
#[cfg(test)]
pub use usage_repository::MockUsageRepository;
pub use usage_repository::{FixtureUsageRepository, UsageRepository, UsageRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
