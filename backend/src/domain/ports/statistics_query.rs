//! Driving port for reading dish usage.

use async_trait::async_trait;

use crate::domain::{Error, UsageEntry, UserId};

/// Driving port for usage statistics reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsQuery: Send + Sync {
    /// The user's usage events joined with dish views, oldest first.
    ///
    /// # Errors
    /// Not-found when the user has never recorded usage.
    async fn list_usage(&self, user_id: &UserId) -> Result<Vec<UsageEntry>, Error>;
}

/// Fixture query for a user with no recorded usage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatisticsQuery;

#[async_trait]
impl StatisticsQuery for FixtureStatisticsQuery {
    async fn list_usage(&self, _user_id: &UserId) -> Result<Vec<UsageEntry>, Error> {
        Err(Error::not_found("no usage statistics recorded"))
    }
}
