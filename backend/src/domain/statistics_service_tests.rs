//! Tests for the statistics service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{FixtureDishRepository, MockDishRepository, MockUsageRepository};
use crate::domain::{Dish, DishDraft, ErrorCode};
use rstest::rstest;

fn dish(name: &str) -> Dish {
    Dish::from_draft(
        UserId::random(),
        DishDraft {
            name: name.to_owned(),
            ..DishDraft::default()
        },
        Utc::now(),
    )
    .expect("valid dish")
}

#[rstest]
#[case(UsageRepositoryError::dish_not_found(), ErrorCode::NotFound)]
#[case(UsageRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[tokio::test]
async fn record_maps_repository_errors(
    #[case] failure: UsageRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut usage = MockUsageRepository::new();
    usage
        .expect_record()
        .times(1)
        .return_once(move |_| Err(failure));
    let service = StatisticsService::new(Arc::new(usage), Arc::new(FixtureDishRepository));

    let error = service
        .record_usage(&UserId::random(), &DishId::random())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn removing_foreign_or_missing_event_is_not_found() {
    let mut usage = MockUsageRepository::new();
    usage.expect_remove().times(1).return_once(|_, _| Ok(false));
    let service = StatisticsService::new(Arc::new(usage), Arc::new(FixtureDishRepository));

    let error = service
        .remove_usage(&UsageEventId::random(), &UserId::random())
        .await
        .expect_err("no such event");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn listing_without_events_is_not_found() {
    let mut usage = MockUsageRepository::new();
    usage
        .expect_list_for_user()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = StatisticsService::new(Arc::new(usage), Arc::new(FixtureDishRepository));

    let error = service
        .list_usage(&UserId::random())
        .await
        .expect_err("no events");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn listing_keeps_repeated_events_and_skips_missing_dishes() {
    let user_id = UserId::random();
    let soup = dish("Soup");
    let soup_id = soup.id;
    let vanished = DishId::random();
    let now = Utc::now();
    let events = vec![
        UsageEvent::new(user_id, soup_id, now),
        UsageEvent::new(user_id, vanished, now),
        UsageEvent::new(user_id, soup_id, now),
    ];
    let mut usage = MockUsageRepository::new();
    usage
        .expect_list_for_user()
        .times(1)
        .return_once(move |_| Ok(events));
    let mut dishes = MockDishRepository::new();
    dishes
        .expect_find_many()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(move |_| Ok(vec![soup]));
    dishes
        .expect_ingredient_lines_for()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = StatisticsService::new(Arc::new(usage), Arc::new(dishes));

    let entries = service.list_usage(&user_id).await.expect("listing succeeds");

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.dish.dish.id == soup_id));
}
