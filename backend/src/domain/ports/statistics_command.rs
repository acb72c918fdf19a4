//! Driving port for recording and pruning dish usage.

use async_trait::async_trait;

use crate::domain::{DishId, Error, UsageEventId, UserId};

/// Driving port for usage statistics writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsCommand: Send + Sync {
    /// Append a usage event.
    ///
    /// # Errors
    /// Not-found when the dish does not exist.
    async fn record_usage(&self, user_id: &UserId, dish_id: &DishId)
    -> Result<UsageEventId, Error>;

    /// Delete one of the user's own events.
    ///
    /// # Errors
    /// Not-found when no event with this id belongs to the user.
    async fn remove_usage(&self, event_id: &UsageEventId, user_id: &UserId) -> Result<(), Error>;
}

/// Fixture command that accepts recordings and finds nothing to remove.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatisticsCommand;

#[async_trait]
impl StatisticsCommand for FixtureStatisticsCommand {
    async fn record_usage(
        &self,
        _user_id: &UserId,
        _dish_id: &DishId,
    ) -> Result<UsageEventId, Error> {
        Ok(UsageEventId::random())
    }

    async fn remove_usage(&self, _event_id: &UsageEventId, _user_id: &UserId) -> Result<(), Error> {
        Err(Error::not_found("usage event not found"))
    }
}
