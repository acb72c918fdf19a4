//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CartCommand, CartQuery, CatalogueCommand, CatalogueQuery, FavouritesCommand, FavouritesQuery,
    StatisticsCommand, StatisticsQuery, UserDirectory,
};

/// Parameter object bundling every port the HTTP handlers depend on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalogue: Arc<dyn CatalogueCommand>,
    pub catalogue_query: Arc<dyn CatalogueQuery>,
    pub cart: Arc<dyn CartCommand>,
    pub cart_query: Arc<dyn CartQuery>,
    pub favourites: Arc<dyn FavouritesCommand>,
    pub favourites_query: Arc<dyn FavouritesQuery>,
    pub statistics: Arc<dyn StatisticsCommand>,
    pub statistics_query: Arc<dyn StatisticsQuery>,
    /// Registers users and signs them in by e-mail.
    pub users: Arc<dyn UserDirectory>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueCommand>,
    pub catalogue_query: Arc<dyn CatalogueQuery>,
    pub cart: Arc<dyn CartCommand>,
    pub cart_query: Arc<dyn CartQuery>,
    pub favourites: Arc<dyn FavouritesCommand>,
    pub favourites_query: Arc<dyn FavouritesQuery>,
    pub statistics: Arc<dyn StatisticsCommand>,
    pub statistics_query: Arc<dyn StatisticsQuery>,
    pub users: Arc<dyn UserDirectory>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use foodapp::domain::ports::{
    ///     FixtureCartCommand, FixtureCartQuery, FixtureCatalogueCommand, FixtureCatalogueQuery,
    ///     FixtureFavouritesCommand, FixtureFavouritesQuery, FixtureStatisticsCommand,
    ///     FixtureStatisticsQuery, FixtureUserDirectory,
    /// };
    /// use foodapp::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     catalogue: Arc::new(FixtureCatalogueCommand),
    ///     catalogue_query: Arc::new(FixtureCatalogueQuery),
    ///     cart: Arc::new(FixtureCartCommand),
    ///     cart_query: Arc::new(FixtureCartQuery),
    ///     favourites: Arc::new(FixtureFavouritesCommand),
    ///     favourites_query: Arc::new(FixtureFavouritesQuery),
    ///     statistics: Arc::new(FixtureStatisticsCommand),
    ///     statistics_query: Arc::new(FixtureStatisticsQuery),
    ///     users: Arc::new(FixtureUserDirectory),
    /// });
    /// let _catalogue = state.catalogue_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            catalogue,
            catalogue_query,
            cart,
            cart_query,
            favourites,
            favourites_query,
            statistics,
            statistics_query,
            users,
        } = ports;
        Self {
            catalogue,
            catalogue_query,
            cart,
            cart_query,
            favourites,
            favourites_query,
            statistics,
            statistics_query,
            users,
        }
    }
}
