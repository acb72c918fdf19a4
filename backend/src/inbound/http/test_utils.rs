//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, Resource, test, web};

use crate::domain::ports::{
    FixtureCartCommand, FixtureCartQuery, FixtureCatalogueCommand, FixtureCatalogueQuery,
    FixtureFavouritesCommand, FixtureFavouritesQuery, FixtureStatisticsCommand,
    FixtureStatisticsQuery, FixtureUserDirectory,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const TEST_LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation, names the cookie `session`, and disables
/// the `Secure` flag for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports bundle where every port is a no-op fixture; tests override the
/// ports they exercise.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        catalogue: Arc::new(FixtureCatalogueCommand),
        catalogue_query: Arc::new(FixtureCatalogueQuery),
        cart: Arc::new(FixtureCartCommand),
        cart_query: Arc::new(FixtureCartQuery),
        favourites: Arc::new(FixtureFavouritesCommand),
        favourites_query: Arc::new(FixtureFavouritesQuery),
        statistics: Arc::new(FixtureStatisticsCommand),
        statistics_query: Arc::new(FixtureStatisticsQuery),
        users: Arc::new(FixtureUserDirectory),
    }
}

/// Route that signs the given user in without touching the directory.
pub fn test_login_resource() -> Resource {
    web::resource(format!("{TEST_LOGIN_PATH}/{{user_id}}")).route(web::post().to(
        |session: SessionContext, path: web::Path<String>| async move {
            let user_id: UserId = path
                .into_inner()
                .parse()
                .map_err(|_| Error::invalid_request("bad test user id"))?;
            session.persist_user(&user_id)?;
            Ok::<_, Error>(HttpResponse::NoContent().finish())
        },
    ))
}

/// Application with the full `/api/v1` surface over `ports`, cookie
/// sessions, and [`test_login_resource`].
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(test_session_middleware())
        .service(test_login_resource())
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Sign in through [`test_login_resource`] and return the session cookie.
pub async fn login_as<S, B>(app: &S, user_id: UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("{TEST_LOGIN_PATH}/{user_id}"))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "test login failed");
    session_cookie(&response)
}
