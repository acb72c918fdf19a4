//! Integration tests for the Diesel adapters against embedded PostgreSQL.
//!
//! Each test provisions a fresh migrated database on its own cluster and
//! drives the adapters through their port traits. Set
//! `SKIP_TEST_CLUSTER=1` to skip when the cluster cannot start.

use chrono::Utc;
use foodapp::domain::ports::{
    CartRepository, CartRepositoryError, DishRepository, DishRepositoryError,
    FavouriteRepository, IngredientRepository, UsageRepository, UserDirectory, UserDirectoryError,
};
use foodapp::domain::{
    AdjustOutcome, AssociationQuantity, CartItem, CartItemId, Category, Dish, DishDraft,
    DishIngredient, EmailAddress, Favourite, Ingredient, SearchTerm, UsageEvent, User, UserId,
};
use foodapp::outbound::persistence::{
    DbPool, DieselCartRepository, DieselDishRepository, DieselFavouriteRepository,
    DieselIngredientRepository, DieselUsageRepository, DieselUserDirectory, PoolConfig,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::pg_embed::test_cluster;
use support::{create_migrated_database, handle_cluster_setup_failure, seed_user};

struct Harness {
    runtime: Runtime,
    pool: DbPool,
    user: User,
    _cluster: TestCluster,
}

impl Harness {
    fn ingredients(&self) -> DieselIngredientRepository {
        DieselIngredientRepository::new(self.pool.clone())
    }

    fn dishes(&self) -> DieselDishRepository {
        DieselDishRepository::new(self.pool.clone())
    }

    fn ingredient(&self, name: &str) -> Ingredient {
        let ingredient = Ingredient::new(name, None).expect("valid ingredient");
        self.runtime
            .block_on(self.ingredients().insert(&ingredient))
            .expect("ingredient inserted");
        ingredient
    }

    fn dish(&self, name: &str, lines: &[(&Ingredient, f64)]) -> Dish {
        let dish = Dish::from_draft(
            self.user.id,
            DishDraft {
                name: name.to_owned(),
                category: "main".to_owned(),
                ..DishDraft::default()
            },
            Utc::now(),
        )
        .expect("valid dish");
        let associations: Vec<DishIngredient> = lines
            .iter()
            .map(|(ingredient, quantity)| {
                DishIngredient::new(
                    dish.id,
                    ingredient.id,
                    AssociationQuantity::new(*quantity).expect("positive quantity"),
                )
            })
            .collect();
        self.runtime
            .block_on(self.dishes().create_with_ingredients(&dish, &associations))
            .expect("dish created");
        dish
    }
}

fn setup() -> Result<Harness, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let user = User {
        id: UserId::random(),
        user_name: "cook".to_owned(),
        email: EmailAddress::new("cook@example.com").map_err(|err| err.to_string())?,
    };
    let pool = runtime.block_on(async {
        let url = create_migrated_database(&cluster).await?;
        seed_user(&url, &user).await?;
        DbPool::new(PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1)))
            .await
            .map_err(|err| err.to_string())
    })?;
    Ok(Harness {
        runtime,
        pool,
        user,
        _cluster: cluster,
    })
}

#[fixture]
fn harness() -> Option<Harness> {
    match setup() {
        Ok(harness) => Some(harness),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn cart_merge_accumulates_and_decrement_deletes(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let rice = h.ingredient("Rice");
    let cart = DieselCartRepository::new(h.pool.clone());
    let item = |quantity| CartItem {
        id: CartItemId::random(),
        user_id: h.user.id,
        ingredient_id: rice.id,
        quantity,
    };

    let first = h.runtime.block_on(cart.add_or_merge(&item(2))).expect("add");
    let second = h.runtime.block_on(cart.add_or_merge(&item(3))).expect("merge");
    assert_eq!(first, second);
    let lines = h
        .runtime
        .block_on(cart.list_for_user(&h.user.id))
        .expect("listed");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| line.item.quantity), Some(5));

    let outcome = h
        .runtime
        .block_on(cart.adjust_or_remove(&h.user.id, &rice.id, -9, CartItemId::random()))
        .expect("adjusted");
    assert_eq!(outcome, AdjustOutcome::Removed);
    assert_eq!(
        h.runtime.block_on(cart.clear(&h.user.id)).expect("cleared"),
        0
    );
}

#[rstest]
fn concurrent_first_adjustments_merge(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let rice = h.ingredient("Rice");
    let left = DieselCartRepository::new(h.pool.clone());
    let right = DieselCartRepository::new(h.pool.clone());

    let (first, second) = h.runtime.block_on(async {
        tokio::join!(
            left.adjust_or_remove(&h.user.id, &rice.id, 2, CartItemId::random()),
            right.adjust_or_remove(&h.user.id, &rice.id, 3, CartItemId::random()),
        )
    });

    let first = first.expect("first adjustment");
    let second = second.expect("second adjustment");
    assert!(matches!(first, AdjustOutcome::Updated { .. }));
    assert!(matches!(second, AdjustOutcome::Updated { .. }));
    let lines = h
        .runtime
        .block_on(left.list_for_user(&h.user.id))
        .expect("listed");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| line.item.quantity), Some(5));
}

#[rstest]
fn zero_adjustment_leaves_row_untouched(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let rice = h.ingredient("Rice");
    let cart = DieselCartRepository::new(h.pool.clone());
    let item = CartItem {
        id: CartItemId::random(),
        user_id: h.user.id,
        ingredient_id: rice.id,
        quantity: 2,
    };
    let id = h.runtime.block_on(cart.add_or_merge(&item)).expect("add");

    let outcome = h
        .runtime
        .block_on(cart.adjust_or_remove(&h.user.id, &rice.id, 0, CartItemId::random()))
        .expect("adjusted");

    assert_eq!(outcome, AdjustOutcome::Updated { id, quantity: 2 });
}

#[rstest]
fn cart_rejects_unknown_ingredient(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let cart = DieselCartRepository::new(h.pool.clone());
    let item = CartItem {
        id: CartItemId::random(),
        user_id: h.user.id,
        ingredient_id: foodapp::domain::IngredientId::random(),
        quantity: 1,
    };

    let err = h
        .runtime
        .block_on(cart.add_or_merge(&item))
        .expect_err("foreign key violation");
    assert!(matches!(err, CartRepositoryError::IngredientNotFound));
}

#[rstest]
fn dish_creation_rolls_back_on_missing_ingredient(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let rice = h.ingredient("Rice");
    let ghost = Ingredient::new("Ghost", None).expect("valid ingredient");
    let dish = Dish::from_draft(
        h.user.id,
        DishDraft {
            name: "Pilaf".to_owned(),
            ..DishDraft::default()
        },
        Utc::now(),
    )
    .expect("valid dish");
    let quantity = AssociationQuantity::new(1.0).expect("positive quantity");
    let associations = [
        DishIngredient::new(dish.id, rice.id, quantity),
        DishIngredient::new(dish.id, ghost.id, quantity),
    ];

    let err = h
        .runtime
        .block_on(h.dishes().create_with_ingredients(&dish, &associations))
        .expect_err("second association fails");
    assert!(matches!(err, DishRepositoryError::IngredientNotFound));
    let remaining = h.runtime.block_on(h.dishes().list_all()).expect("listed");
    assert!(remaining.is_empty());
}

#[rstest]
fn search_and_category_filters(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    h.dish("Coconut Curry", &[]);
    h.dish("Cabbage Soup", &[]);
    h.dish("100%_Cut", &[]);

    let search = |raw: &str| {
        let term = SearchTerm::new(raw).expect("valid term");
        h.runtime
            .block_on(h.dishes().search_by_name(&term))
            .expect("searched")
            .into_iter()
            .map(|dish| dish.name)
            .collect::<Vec<_>>()
    };
    assert_eq!(search("CUT"), vec!["Coconut Curry", "100%_Cut"]);
    assert_eq!(search("%_"), vec!["100%_Cut"]);
    assert_eq!(search(" Soup"), vec!["Cabbage Soup"]);

    let category = Category::new("main").expect("valid category");
    let in_category = h
        .runtime
        .block_on(h.dishes().list_by_category(&category))
        .expect("listed");
    assert_eq!(in_category.len(), 3);
}

#[rstest]
fn ingredient_lines_are_batched_and_sorted(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let rice = h.ingredient("Rice");
    let lentils = h.ingredient("Lentils");
    let kitchari = h.dish("Kitchari", &[(&rice, 2.0), (&lentils, 1.5)]);
    let plain = h.dish("Plain Rice", &[(&rice, 1.0)]);

    let lines = h
        .runtime
        .block_on(h.dishes().ingredient_lines_for(&[kitchari.id, plain.id]))
        .expect("lines loaded");
    assert_eq!(lines.len(), 3);

    let duplicate = DishIngredient::new(
        plain.id,
        rice.id,
        AssociationQuantity::new(3.0).expect("positive quantity"),
    );
    let err = h
        .runtime
        .block_on(h.dishes().add_association(&duplicate))
        .expect_err("pair already linked");
    assert!(matches!(err, DishRepositoryError::DuplicateAssociation));
}

#[rstest]
fn favourites_and_usage_round_trip(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let dish = h.dish("Dal", &[]);
    let favourites = DieselFavouriteRepository::new(h.pool.clone());
    let usage = DieselUsageRepository::new(h.pool.clone());
    let bookmark = Favourite::new(h.user.id, dish.id, Utc::now());

    assert!(h.runtime.block_on(favourites.insert(&bookmark)).expect("inserted"));
    let again = Favourite::new(h.user.id, dish.id, Utc::now());
    assert!(!h.runtime.block_on(favourites.insert(&again)).expect("ignored"));

    let event = UsageEvent::new(h.user.id, dish.id, Utc::now());
    h.runtime.block_on(usage.record(&event)).expect("recorded");
    h.runtime.block_on(usage.record(&UsageEvent::new(h.user.id, dish.id, Utc::now())))
        .expect("recorded twice");
    let stranger = UserId::random();
    assert!(!h
        .runtime
        .block_on(usage.remove(&event.id, &stranger))
        .expect("scoped delete"));
    assert!(h
        .runtime
        .block_on(usage.remove(&event.id, &h.user.id))
        .expect("owner delete"));
    let remaining = h
        .runtime
        .block_on(usage.list_for_user(&h.user.id))
        .expect("listed");
    assert_eq!(remaining.len(), 1);
}

#[rstest]
fn directory_matches_email_case_insensitively(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let directory = DieselUserDirectory::new(h.pool.clone());
    let email = EmailAddress::new("COOK@example.com").expect("valid email");

    let found = h
        .runtime
        .block_on(directory.find_by_email(&email))
        .expect("lookup ran");
    assert_eq!(found.map(|user| user.id), Some(h.user.id));
    let missing = h
        .runtime
        .block_on(directory.find_by_id(&UserId::random()))
        .expect("lookup ran");
    assert!(missing.is_none());
}

#[rstest]
fn registration_stores_user_and_rejects_taken_email(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let directory = DieselUserDirectory::new(h.pool.clone());
    let baker = User::register(
        "Baker",
        EmailAddress::new("baker@example.com").expect("valid email"),
    )
    .expect("valid user");

    h.runtime
        .block_on(directory.register(&baker))
        .expect("registered");
    let found = h
        .runtime
        .block_on(directory.find_by_id(&baker.id))
        .expect("lookup ran");
    assert_eq!(found, Some(baker));

    let imposter = User::register(
        "Imposter",
        EmailAddress::new("Cook@Example.com").expect("valid email"),
    )
    .expect("valid user");
    let error = h
        .runtime
        .block_on(directory.register(&imposter))
        .expect_err("email taken");
    assert_eq!(error, UserDirectoryError::duplicate_email("cook@example.com"));
}
