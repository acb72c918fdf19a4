//! Append-only dish usage log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DishId, DishWithIngredients, UsageEventId, UserId};

/// One recorded use of a dish by a user. Events are never deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub id: UsageEventId,
    pub user_id: UserId,
    pub dish_id: DishId,
    pub created_at: DateTime<Utc>,
}

impl UsageEvent {
    /// Create a new event stamped with `created_at`.
    pub fn new(user_id: UserId, dish_id: DishId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UsageEventId::random(),
            user_id,
            dish_id,
            created_at,
        }
    }
}

/// A usage event joined with the dish it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub event: UsageEvent,
    pub dish: DishWithIngredients,
}

/// Join events with composed dish views, preserving event order.
///
/// Events whose dish is absent from `views` are skipped and logged rather
/// than failing the whole listing.
pub fn join_usage_entries(
    events: Vec<UsageEvent>,
    views: Vec<DishWithIngredients>,
) -> Vec<UsageEntry> {
    let by_dish: HashMap<DishId, DishWithIngredients> = views
        .into_iter()
        .map(|view| (view.dish.id, view))
        .collect();

    events
        .into_iter()
        .filter_map(|event| match by_dish.get(&event.dish_id) {
            Some(view) => Some(UsageEntry {
                event,
                dish: view.clone(),
            }),
            None => {
                warn!(
                    event_id = %event.id,
                    dish_id = %event.dish_id,
                    "skipping usage event for unresolvable dish"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dish, DishDraft};
    use rstest::rstest;

    fn view() -> DishWithIngredients {
        let dish = Dish::from_draft(
            UserId::random(),
            DishDraft {
                name: "Porridge".to_owned(),
                ..DishDraft::default()
            },
            Utc::now(),
        )
        .expect("valid dish");
        DishWithIngredients::compose(dish, Vec::new())
    }

    #[rstest]
    fn join_skips_events_for_missing_dishes() {
        let user = UserId::random();
        let known = view();
        let first = UsageEvent::new(user, known.dish.id, Utc::now());
        let orphan = UsageEvent::new(user, DishId::random(), Utc::now());
        let second = UsageEvent::new(user, known.dish.id, Utc::now());

        let entries = join_usage_entries(vec![first, orphan, second], vec![known.clone()]);

        let ids: Vec<UsageEventId> = entries.iter().map(|entry| entry.event.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(entries.iter().all(|entry| entry.dish == known));
    }
}
