//! Driving port for reading a cart.

use async_trait::async_trait;

use crate::domain::{CartLine, Error, UserRef};

/// Driving port for cart reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartQuery: Send + Sync {
    /// List a user's cart joined with ingredient details.
    ///
    /// # Errors
    /// Not-found when an e-mail reference matches no user.
    async fn list_cart(&self, user: &UserRef) -> Result<Vec<CartLine>, Error>;
}

/// Fixture query returning an empty cart.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartQuery;

#[async_trait]
impl CartQuery for FixtureCartQuery {
    async fn list_cart(&self, _user: &UserRef) -> Result<Vec<CartLine>, Error> {
        Ok(Vec::new())
    }
}
