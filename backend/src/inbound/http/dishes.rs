//! Dish catalogue endpoints.
//!
//! ```text
//! GET  /api/v1/dishes
//! GET  /api/v1/dishes/category?q=
//! GET  /api/v1/dishes/search?q=
//! GET  /api/v1/dishes/{dish_id}
//! POST /api/v1/dishes
//! GET  /api/v1/dishes/{dish_id}/ingredients
//! POST /api/v1/dishes/{dish_id}/ingredients
//! ```
//!
//! `category` and `search` are registered ahead of `{dish_id}` so the literal
//! segments win.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AddAssociationRequest, CreateDishRequest};
use crate::domain::{DishDraft, DishId, Error, IngredientId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::{
    CreatedResponse, DishPath, DishResponse, IngredientLineResponse, NutrientsBody, TermQuery,
    dish_list,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, decode_base64, missing_field_error, parse_id, parse_id_at,
};

const DISH_ID: FieldName = FieldName::new("dishId");
const INGREDIENT_ID: FieldName = FieldName::new("ingredientId");

/// One requested ingredient of a new dish.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientQuantityBody {
    pub ingredient_id: String,
    #[schema(example = 2.0)]
    pub quantity: f64,
}

/// Request payload for creating a dish with its ingredients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishBody {
    #[schema(example = "Cacio e pepe")]
    pub name: String,
    /// Preparation time in minutes.
    #[serde(default)]
    pub preparation_time: i32,
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub nutrients: NutrientsBody,
    #[serde(default)]
    pub category: String,
    /// Base64 encoded image.
    pub image: Option<String>,
    /// Base64 encoded video.
    pub video_instructions: Option<String>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantityBody>,
}

impl CreateDishBody {
    fn into_request(self, owner_id: UserId) -> Result<CreateDishRequest, Error> {
        let ingredients = self
            .ingredients
            .iter()
            .enumerate()
            .map(|(index, item)| {
                parse_id_at::<IngredientId>(&item.ingredient_id, INGREDIENT_ID, index)
                    .map(|id| (id, item.quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let draft = DishDraft {
            name: self.name,
            preparation_minutes: self.preparation_time,
            calories: self.calories,
            nutrients: self.nutrients.into(),
            category: self.category,
            image: decode_base64(self.image.as_deref(), FieldName::new("image"))?,
            video_instructions: decode_base64(
                self.video_instructions.as_deref(),
                FieldName::new("videoInstructions"),
            )?,
            instruction: self.instruction,
        };
        Ok(CreateDishRequest {
            owner_id,
            draft,
            ingredients,
        })
    }
}

/// Request payload for linking an ingredient to an existing dish.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAssociationBody {
    pub ingredient_id: String,
    #[schema(example = 0.5)]
    pub quantity: f64,
}

fn required_term(query: TermQuery) -> Result<String, Error> {
    query.q.ok_or_else(|| missing_field_error(FieldName::new("q")))
}

/// List every dish with its ingredients.
#[utoipa::path(
    get,
    path = "/api/v1/dishes",
    responses(
        (status = 200, description = "All dishes", body = [DishResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "listDishes",
    security([])
)]
#[get("/dishes")]
pub async fn list_dishes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<DishResponse>>> {
    let views = state.catalogue_query.list_dishes().await?;
    Ok(web::Json(dish_list(views)))
}

/// List dishes whose category equals `q` exactly.
#[utoipa::path(
    get,
    path = "/api/v1/dishes/category",
    params(("q" = String, Query, description = "Category name")),
    responses(
        (status = 200, description = "Dishes in the category", body = [DishResponse]),
        (status = 400, description = "Missing or blank category", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "listDishesByCategory",
    security([])
)]
#[get("/dishes/category")]
pub async fn list_dishes_by_category(
    state: web::Data<HttpState>,
    query: web::Query<TermQuery>,
) -> ApiResult<web::Json<Vec<DishResponse>>> {
    let category = required_term(query.into_inner())?;
    let views = state
        .catalogue_query
        .list_dishes_by_category(&category)
        .await?;
    Ok(web::Json(dish_list(views)))
}

/// Case-insensitive substring search over dish names.
#[utoipa::path(
    get,
    path = "/api/v1/dishes/search",
    params(("q" = String, Query, description = "Fragment of the dish name")),
    responses(
        (status = 200, description = "Matching dishes", body = [DishResponse]),
        (status = 400, description = "Missing or blank search term", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "searchDishes",
    security([])
)]
#[get("/dishes/search")]
pub async fn search_dishes(
    state: web::Data<HttpState>,
    query: web::Query<TermQuery>,
) -> ApiResult<web::Json<Vec<DishResponse>>> {
    let term = required_term(query.into_inner())?;
    let views = state.catalogue_query.search_dishes_by_name(&term).await?;
    Ok(web::Json(dish_list(views)))
}

/// Fetch one dish with its ingredients.
#[utoipa::path(
    get,
    path = "/api/v1/dishes/{dish_id}",
    params(("dish_id" = String, Path, description = "Dish identifier")),
    responses(
        (status = 200, description = "Dish", body = DishResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown dish", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "getDish",
    security([])
)]
#[get("/dishes/{dish_id}")]
pub async fn get_dish(
    state: web::Data<HttpState>,
    path: web::Path<DishPath>,
) -> ApiResult<web::Json<DishResponse>> {
    let dish_id: DishId = parse_id(&path.dish_id, DISH_ID)?;
    let view = state.catalogue_query.get_dish(&dish_id).await?;
    Ok(web::Json(view.into()))
}

/// Create a dish and its ingredient list in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/dishes",
    request_body = CreateDishBody,
    responses(
        (status = 201, description = "Dish created", body = CreatedResponse),
        (status = 400, description = "Invalid dish or quantities", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "createDish",
    security(("SessionCookie" = []))
)]
#[post("/dishes")]
pub async fn create_dish(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateDishBody>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let request = payload.into_inner().into_request(owner_id)?;
    let dish_id = state.catalogue.create_dish_with_ingredients(request).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(dish_id)))
}

/// List a dish's ingredient lines.
#[utoipa::path(
    get,
    path = "/api/v1/dishes/{dish_id}/ingredients",
    params(("dish_id" = String, Path, description = "Dish identifier")),
    responses(
        (status = 200, description = "Ingredient lines", body = [IngredientLineResponse]),
        (status = 404, description = "Unknown dish", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "listDishIngredients",
    security([])
)]
#[get("/dishes/{dish_id}/ingredients")]
pub async fn list_dish_ingredients(
    state: web::Data<HttpState>,
    path: web::Path<DishPath>,
) -> ApiResult<web::Json<Vec<IngredientLineResponse>>> {
    let dish_id: DishId = parse_id(&path.dish_id, DISH_ID)?;
    let lines = state.catalogue_query.ingredients_for_dish(&dish_id).await?;
    Ok(web::Json(lines.into_iter().map(Into::into).collect()))
}

/// Link one more ingredient to an existing dish.
#[utoipa::path(
    post,
    path = "/api/v1/dishes/{dish_id}/ingredients",
    params(("dish_id" = String, Path, description = "Dish identifier")),
    request_body = AddAssociationBody,
    responses(
        (status = 201, description = "Association created", body = CreatedResponse),
        (status = 400, description = "Invalid quantity", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown dish or ingredient", body = ErrorSchema),
        (status = 409, description = "Ingredient already linked", body = ErrorSchema)
    ),
    tags = ["dishes"],
    operation_id = "addDishIngredient",
    security(("SessionCookie" = []))
)]
#[post("/dishes/{dish_id}/ingredients")]
pub async fn add_dish_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DishPath>,
    payload: web::Json<AddAssociationBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let request = AddAssociationRequest {
        dish_id: parse_id(&path.dish_id, DISH_ID)?,
        ingredient_id: parse_id(&payload.ingredient_id, INGREDIENT_ID)?,
        quantity: payload.quantity,
    };
    let association_id = state.catalogue.add_association(request).await?;
    Ok(HttpResponse::Created().json(CreatedResponse::new(association_id)))
}

#[cfg(test)]
#[path = "dishes_tests.rs"]
mod tests;
