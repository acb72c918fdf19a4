//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports backed by
//! PostgreSQL through `diesel-async` and a shared `bb8` pool.
//!
//! - Adapters only translate between row structs and domain types; the
//!   consistency rules live in the domain.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every Diesel error is classified once (`diesel_error_mapping.rs`) and
//!   turned into the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use foodapp::outbound::persistence::{DbPool, DieselDishRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/foodapp")).await?;
//! let dishes = DieselDishRepository::new(pool);
//! ```

mod diesel_cart_repository;
mod diesel_dish_repository;
mod diesel_error_mapping;
mod diesel_favourite_repository;
mod diesel_ingredient_repository;
mod diesel_usage_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_dish_repository::DieselDishRepository;
pub use diesel_favourite_repository::DieselFavouriteRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_usage_repository::DieselUsageRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
