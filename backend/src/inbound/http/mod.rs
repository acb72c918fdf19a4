//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cart;
pub mod catalogue_dto;
pub mod dishes;
pub mod error;
pub mod favourites;
pub mod health;
pub mod ingredients;
pub mod schemas;
pub mod session;
pub mod state;
pub mod statistics;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// The caller supplies the scope, the session middleware and
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use foodapp::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in)
        .service(auth::sign_out)
        .service(users::register)
        .service(users::profile)
        .service(ingredients::create_ingredient)
        .service(dishes::list_dishes)
        // Literal segments must precede `/dishes/{dish_id}`.
        .service(dishes::list_dishes_by_category)
        .service(dishes::search_dishes)
        .service(dishes::get_dish)
        .service(dishes::create_dish)
        .service(dishes::list_dish_ingredients)
        .service(dishes::add_dish_ingredient)
        .service(cart::list_cart)
        .service(cart::clear_cart)
        .service(cart::add_cart_item)
        .service(cart::adjust_cart_item)
        .service(cart::remove_cart_item)
        .service(favourites::list_favourites)
        .service(favourites::add_favourite)
        .service(favourites::remove_favourite)
        .service(statistics::list_usage)
        .service(statistics::record_usage)
        .service(statistics::remove_usage);
}
