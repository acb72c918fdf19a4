//! End-to-end behaviour of the domain services over the in-memory store.
//!
//! Every service shares one [`InMemoryStore`], so these tests observe the
//! same consistency rules the HTTP layer relies on without a database.

use std::sync::Arc;

use foodapp::domain::ports::{
    CartCommand, CartQuery, CatalogueCommand, CatalogueQuery, CreateDishRequest,
    CreateIngredientRequest, FavouritesCommand, FavouritesQuery, StatisticsCommand,
    StatisticsQuery,
};
use foodapp::domain::{
    AdjustOutcome, CartService, CatalogueService, DishDraft, DishId, DishWithIngredients,
    EmailAddress, ErrorCode, FavouritesService, IngredientId, StatisticsService, User, UserId,
    UserRef,
};
use foodapp::outbound::memory::InMemoryStore;
use rstest::{fixture, rstest};

type Catalogue = CatalogueService<InMemoryStore, InMemoryStore>;
type Cart = CartService<InMemoryStore, InMemoryStore>;
type Favourites = FavouritesService<InMemoryStore, InMemoryStore, InMemoryStore>;
type Statistics = StatisticsService<InMemoryStore, InMemoryStore>;

struct World {
    user: User,
    catalogue: Catalogue,
    cart: Cart,
    favourites: Favourites,
    statistics: Statistics,
}

#[fixture]
fn world() -> World {
    let store = Arc::new(InMemoryStore::new());
    let user = User {
        id: UserId::random(),
        user_name: "cook".to_owned(),
        email: EmailAddress::new("cook@example.com").expect("valid email"),
    };
    store.insert_user(user.clone());
    World {
        user,
        catalogue: CatalogueService::new(store.clone(), store.clone()),
        cart: CartService::new(store.clone(), store.clone()),
        favourites: FavouritesService::new(store.clone(), store.clone(), store.clone()),
        statistics: StatisticsService::new(store.clone(), store),
    }
}

impl World {
    async fn ingredient(&self, name: &str) -> IngredientId {
        self.catalogue
            .create_ingredient(CreateIngredientRequest {
                name: name.to_owned(),
                image: None,
            })
            .await
            .expect("ingredient created")
    }

    async fn dish(&self, name: &str, category: &str, lines: Vec<(IngredientId, f64)>) -> DishId {
        self.catalogue
            .create_dish_with_ingredients(CreateDishRequest {
                owner_id: self.user.id,
                draft: DishDraft {
                    name: name.to_owned(),
                    category: category.to_owned(),
                    ..DishDraft::default()
                },
                ingredients: lines,
            })
            .await
            .expect("dish created")
    }
}

fn names(views: &[DishWithIngredients]) -> Vec<&str> {
    views.iter().map(|view| view.dish.name.as_str()).collect()
}

#[rstest]
#[tokio::test]
async fn repeated_additions_merge_into_one_row(world: World) {
    let rice = world.ingredient("Rice").await;

    let first = world.cart.add_or_merge(&world.user.id, &rice, 2).await.expect("add");
    let second = world.cart.add_or_merge(&world.user.id, &rice, 3).await.expect("merge");

    assert_eq!(first, second);
    let lines = world
        .cart
        .list_cart(&UserRef::Id(world.user.id))
        .await
        .expect("cart listed");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| line.item.quantity), Some(5));
}

#[rstest]
#[tokio::test]
async fn decrement_past_zero_deletes_the_row(world: World) {
    let rice = world.ingredient("Rice").await;
    world.cart.add_or_merge(&world.user.id, &rice, 2).await.expect("add");

    let outcome = world
        .cart
        .adjust_or_remove(&world.user.id, &rice, -5)
        .await
        .expect("adjusted");

    assert_eq!(outcome, AdjustOutcome::Removed);
    let lines = world
        .cart
        .list_cart(&UserRef::Email(world.user.email.clone()))
        .await
        .expect("cart listed");
    assert!(lines.is_empty());
}

#[rstest]
#[tokio::test]
async fn zero_adjustment_keeps_existing_row(world: World) {
    let rice = world.ingredient("Rice").await;
    let id = world.cart.add_or_merge(&world.user.id, &rice, 2).await.expect("add");

    let outcome = world
        .cart
        .adjust_or_remove(&world.user.id, &rice, 0)
        .await
        .expect("adjusted");

    assert_eq!(outcome, AdjustOutcome::Updated { id, quantity: 2 });
    let missing = world.ingredient("Salt").await;
    let err = world
        .cart
        .adjust_or_remove(&world.user.id, &missing, 0)
        .await
        .expect_err("no row to adjust");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn second_identical_favourite_conflicts(world: World) {
    let dish = world.dish("Dal", "main", Vec::new()).await;

    world
        .favourites
        .add_favourite(&world.user.id, &dish)
        .await
        .expect("first bookmark");
    let err = world
        .favourites
        .add_favourite(&world.user.id, &dish)
        .await
        .expect_err("duplicate bookmark");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn failed_association_leaves_no_dish_behind(world: World) {
    let rice = world.ingredient("Rice").await;
    let missing = IngredientId::random();

    let err = world
        .catalogue
        .create_dish_with_ingredients(CreateDishRequest {
            owner_id: world.user.id,
            draft: DishDraft {
                name: "Pilaf".to_owned(),
                ..DishDraft::default()
            },
            ingredients: vec![(rice, 1.0), (missing, 2.0)],
        })
        .await
        .expect_err("unknown ingredient");

    assert_eq!(err.code(), ErrorCode::NotFound);
    let dishes = world.catalogue.list_dishes().await.expect("dishes listed");
    assert!(dishes.is_empty());
}

#[rstest]
#[case("cut")]
#[case("CUT")]
#[tokio::test]
async fn search_matches_substrings_case_insensitively(world: World, #[case] term: &str) {
    world.dish("Coconut Curry", "main", Vec::new()).await;
    world.dish("Cabbage Soup", "soup", Vec::new()).await;

    let found = world
        .catalogue
        .search_dishes_by_name(term)
        .await
        .expect("search ran");

    assert_eq!(names(&found), vec!["Coconut Curry"]);
}

#[rstest]
#[tokio::test]
async fn every_read_path_composes_the_same_lines(world: World) {
    let rice = world.ingredient("Rice").await;
    let lentils = world.ingredient("Lentils").await;
    let dish = world
        .dish("Kitchari", "main", vec![(rice, 2.0), (lentils, 1.5)])
        .await;
    world
        .favourites
        .add_favourite(&world.user.id, &dish)
        .await
        .expect("bookmarked");
    world
        .statistics
        .record_usage(&world.user.id, &dish)
        .await
        .expect("usage recorded");

    let reference = world.catalogue.get_dish(&dish).await.expect("dish found");
    let listed = world.catalogue.list_dishes().await.expect("listed");
    let by_category = world
        .catalogue
        .list_dishes_by_category("main")
        .await
        .expect("category listed");
    let searched = world
        .catalogue
        .search_dishes_by_name("kitch")
        .await
        .expect("searched");
    let favourites = world
        .favourites
        .list_favourites(&UserRef::Id(world.user.id))
        .await
        .expect("favourites listed");
    let usage = world
        .statistics
        .list_usage(&world.user.id)
        .await
        .expect("usage listed");
    let lines = world
        .catalogue
        .ingredients_for_dish(&dish)
        .await
        .expect("lines listed");

    let line_names: Vec<&str> = reference
        .ingredients
        .iter()
        .map(|line| line.ingredient.name.as_str())
        .collect();
    assert_eq!(line_names, vec!["Lentils", "Rice"]);
    assert_eq!(lines, reference.ingredients);
    for view in [&listed, &by_category, &searched, &favourites] {
        assert_eq!(view.as_slice(), std::slice::from_ref(&reference));
    }
    assert_eq!(
        usage.first().map(|entry| &entry.dish),
        Some(&reference)
    );
}

#[rstest]
#[tokio::test]
async fn usage_removal_needs_the_owner(world: World) {
    let dish = world.dish("Dal", "main", Vec::new()).await;
    let event = world
        .statistics
        .record_usage(&world.user.id, &dish)
        .await
        .expect("usage recorded");

    let err = world
        .statistics
        .remove_usage(&event, &UserId::random())
        .await
        .expect_err("someone else's event");
    assert_eq!(err.code(), ErrorCode::NotFound);

    world
        .statistics
        .remove_usage(&event, &world.user.id)
        .await
        .expect("owner removes event");
    let err = world
        .statistics
        .list_usage(&world.user.id)
        .await
        .expect_err("log is empty");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
