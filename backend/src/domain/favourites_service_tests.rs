//! Tests for the favourites service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    FixtureDishRepository, FixtureUserDirectory, MockDishRepository, MockFavouriteRepository,
};
use crate::domain::{Dish, DishDraft, ErrorCode};
use chrono::Duration;

type Service = FavouritesService<MockFavouriteRepository, MockDishRepository, FixtureUserDirectory>;

fn make_service(favourites: MockFavouriteRepository, dishes: MockDishRepository) -> Service {
    FavouritesService::new(
        Arc::new(favourites),
        Arc::new(dishes),
        Arc::new(FixtureUserDirectory),
    )
}

fn dish(name: &str, age_minutes: i64) -> Dish {
    Dish::from_draft(
        UserId::random(),
        DishDraft {
            name: name.to_owned(),
            ..DishDraft::default()
        },
        Utc::now() - Duration::minutes(age_minutes),
    )
    .expect("valid dish")
}

#[tokio::test]
async fn adding_twice_is_a_conflict() {
    let mut favourites = MockFavouriteRepository::new();
    favourites
        .expect_insert()
        .times(1)
        .return_once(|_| Ok(false));
    let service = make_service(favourites, MockDishRepository::new());

    let error = service
        .add_favourite(&UserId::random(), &DishId::random())
        .await
        .expect_err("duplicate favourite");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn adding_missing_dish_is_not_found() {
    let mut favourites = MockFavouriteRepository::new();
    favourites
        .expect_insert()
        .times(1)
        .return_once(|_| Err(FavouriteRepositoryError::dish_not_found()));
    let service = make_service(favourites, MockDishRepository::new());

    let error = service
        .add_favourite(&UserId::random(), &DishId::random())
        .await
        .expect_err("missing dish");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn removing_absent_favourite_is_not_found() {
    let mut favourites = MockFavouriteRepository::new();
    favourites
        .expect_remove()
        .times(1)
        .return_once(|_, _| Ok(false));
    let service = make_service(favourites, MockDishRepository::new());

    let error = service
        .remove_favourite(&UserId::random(), &DishId::random())
        .await
        .expect_err("absent favourite");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn listing_follows_bookmark_order() {
    let user_id = UserId::random();
    let older = dish("Older dish", 60);
    let newer = dish("Newer dish", 5);
    let (older_id, newer_id) = (older.id, newer.id);
    let now = Utc::now();
    let bookmarks = vec![
        Favourite::new(user_id, newer_id, now - Duration::minutes(2)),
        Favourite::new(user_id, older_id, now - Duration::minutes(1)),
    ];
    let mut favourites = MockFavouriteRepository::new();
    favourites
        .expect_list_for_user()
        .times(1)
        .return_once(move |_| Ok(bookmarks));
    let mut dishes = MockDishRepository::new();
    dishes
        .expect_find_many()
        .times(1)
        .return_once(move |_| Ok(vec![older, newer]));
    dishes
        .expect_ingredient_lines_for()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = make_service(favourites, dishes);

    let views = service
        .list_favourites(&UserRef::Id(user_id))
        .await
        .expect("listing succeeds");

    let ids: Vec<_> = views.iter().map(|view| view.dish.id).collect();
    assert_eq!(ids, [newer_id, older_id]);
}

#[tokio::test]
async fn listing_without_favourites_skips_dish_lookup() {
    let mut favourites = MockFavouriteRepository::new();
    favourites
        .expect_list_for_user()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = FavouritesService::new(
        Arc::new(favourites),
        Arc::new(FixtureDishRepository),
        Arc::new(FixtureUserDirectory),
    );

    let views = service
        .list_favourites(&UserRef::Id(UserId::random()))
        .await
        .expect("listing succeeds");

    assert!(views.is_empty());
}
