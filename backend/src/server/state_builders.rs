//! Builders for HTTP state ports from a storage backend.

use std::sync::Arc;

use actix_web::web;

use foodapp::domain::ports::{
    CartRepository, DishRepository, FavouriteRepository, IngredientRepository, UsageRepository,
    UserDirectory,
};
use foodapp::domain::{CartService, CatalogueService, FavouritesService, StatisticsService};
use foodapp::inbound::http::state::{HttpState, HttpStatePorts};
use foodapp::outbound::memory::InMemoryStore;
use foodapp::outbound::persistence::{
    DbPool, DieselCartRepository, DieselDishRepository, DieselFavouriteRepository,
    DieselIngredientRepository, DieselUsageRepository, DieselUserDirectory,
};

use super::ServerConfig;

/// One adapter per driven port.
struct Repositories<I, D, C, F, S, U> {
    ingredients: Arc<I>,
    dishes: Arc<D>,
    cart: Arc<C>,
    favourites: Arc<F>,
    usage: Arc<S>,
    users: Arc<U>,
}

impl<I, D, C, F, S, U> Repositories<I, D, C, F, S, U>
where
    I: IngredientRepository + 'static,
    D: DishRepository + 'static,
    C: CartRepository + 'static,
    F: FavouriteRepository + 'static,
    S: UsageRepository + 'static,
    U: UserDirectory + 'static,
{
    /// Wrap the adapters in domain services and expose them as ports.
    fn into_ports(self) -> HttpStatePorts {
        let Self {
            ingredients,
            dishes,
            cart,
            favourites,
            usage,
            users,
        } = self;

        let catalogue = Arc::new(CatalogueService::new(ingredients, dishes.clone()));
        let cart = Arc::new(CartService::new(cart, users.clone()));
        let favourites = Arc::new(FavouritesService::new(
            favourites,
            dishes.clone(),
            users.clone(),
        ));
        let statistics = Arc::new(StatisticsService::new(usage, dishes));

        HttpStatePorts {
            catalogue: catalogue.clone(),
            catalogue_query: catalogue,
            cart: cart.clone(),
            cart_query: cart,
            favourites: favourites.clone(),
            favourites_query: favourites,
            statistics: statistics.clone(),
            statistics_query: statistics,
            users,
        }
    }
}

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    Repositories {
        ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        dishes: Arc::new(DieselDishRepository::new(pool.clone())),
        cart: Arc::new(DieselCartRepository::new(pool.clone())),
        favourites: Arc::new(DieselFavouriteRepository::new(pool.clone())),
        usage: Arc::new(DieselUsageRepository::new(pool.clone())),
        users: Arc::new(DieselUserDirectory::new(pool.clone())),
    }
    .into_ports()
}

/// Ports over a shared in-process store.
pub(crate) fn memory_ports(store: &InMemoryStore) -> HttpStatePorts {
    let store = Arc::new(store.clone());
    Repositories {
        ingredients: store.clone(),
        dishes: store.clone(),
        cart: store.clone(),
        favourites: store.clone(),
        usage: store.clone(),
        users: store,
    }
    .into_ports()
}

/// Build the shared HTTP state, backed by PostgreSQL when a pool is
/// configured and by the in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => memory_ports(&InMemoryStore::new()),
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use foodapp::domain::{EmailAddress, User, UserId};

    #[rstest]
    #[actix_web::test]
    async fn memory_ports_resolve_seeded_users() {
        let store = InMemoryStore::new();
        store.insert_user(User {
            id: UserId::random(),
            user_name: "cook".to_owned(),
            email: EmailAddress::new("cook@example.com").expect("valid email"),
        });
        let state = web::Data::new(HttpState::new(memory_ports(&store)));
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_secure(false)
            .build();
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .wrap(session)
                .service(web::scope("/api/v1").configure(foodapp::inbound::http::configure_api)),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/favourites?email=cook@example.com")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!([]));
    }
}
