//! Meal HTTP handlers.
//!
//! ```text
//! POST /api/v1/meals {"caption":"Porridge","mealType":"breakfast","mealDate":"2024-01-01"}
//! GET /api/v1/meals
//! GET /api/v1/meals/{id}
//! PATCH /api/v1/meals/{id} {"caption":"Oat porridge"}
//! DELETE /api/v1/meals/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateMealRequest, DeleteMealRequest, UpdateMealRequest};
use crate::domain::{
    ApiResult, Caption, Error, Meal, MealChanges, MealType, normalize, parse_meal_date,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CAPTION, map_meal_validation_error, missing_field_error, parse_meal_id,
};

/// Body for `POST /api/v1/meals`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealBody {
    #[schema(example = "Porridge with berries")]
    pub caption: Option<String>,
    /// One of breakfast, lunch, dinner, snack, other. Defaults to other.
    #[schema(example = "breakfast")]
    pub meal_type: Option<String>,
    #[schema(format = "date", example = "2024-01-01")]
    pub meal_date: Option<String>,
}

/// Body for `PATCH /api/v1/meals/{id}`. At least one field is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealBody {
    pub caption: Option<String>,
    pub meal_type: Option<String>,
    /// New `YYYY-MM-DD` date. A blank value leaves the stored date as is,
    /// so a date once set cannot be cleared through this endpoint.
    #[schema(format = "date")]
    pub meal_date: Option<String>,
}

/// Meal as returned to clients. Likes and comments are exposed as counts.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    #[schema(example = "65b000000000000000000001")]
    pub id: String,
    /// Canonical owner id; absent when the stored reference is malformed.
    pub owner_id: Option<String>,
    pub caption: String,
    #[schema(example = "breakfast")]
    pub meal_type: String,
    pub meal_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: usize,
    pub comment_count: usize,
}

impl From<&Meal> for MealResponse {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            owner_id: normalize(meal.owner()).ok().map(|id| id.to_string()),
            caption: meal.caption().to_owned(),
            meal_type: meal.meal_type().to_string(),
            meal_date: meal.meal_date(),
            created_at: meal.created_at(),
            like_count: meal.likes().len(),
            comment_count: meal.comments().len(),
        }
    }
}

fn parse_meal_type(raw: Option<String>) -> Result<Option<MealType>, Error> {
    raw.map(|value| value.parse::<MealType>())
        .transpose()
        .map_err(map_meal_validation_error)
}

/// Blank dates are treated as absent.
fn parse_optional_meal_date(raw: Option<String>) -> Result<Option<NaiveDate>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| parse_meal_date(&value))
        .transpose()
        .map_err(map_meal_validation_error)
}

fn parse_caption(raw: String) -> Result<Caption, Error> {
    Caption::new(raw).map_err(map_meal_validation_error)
}

/// Log a meal for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/meals",
    request_body = CreateMealBody,
    responses(
        (status = 201, description = "Meal created", body = MealResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "createMeal",
    security(("SessionCookie" = []))
)]
#[post("/meals")]
pub async fn create_meal(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateMealBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let CreateMealBody {
        caption,
        meal_type,
        meal_date,
    } = payload.into_inner();
    let caption = parse_caption(caption.ok_or_else(|| missing_field_error(CAPTION))?)?;
    let request = CreateMealRequest {
        owner,
        caption,
        meal_type: parse_meal_type(meal_type)?.unwrap_or(MealType::Other),
        meal_date: parse_optional_meal_date(meal_date)?,
    };
    let meal = state.meals.create_meal(request).await?;
    Ok(HttpResponse::Created().json(MealResponse::from(&meal)))
}

/// Meals owned by the signed-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/meals",
    responses(
        (status = 200, description = "Owned meals", body = [MealResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "listMeals",
    security(("SessionCookie" = []))
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MealResponse>>> {
    let user_id = session.require_user_id()?;
    let meals = state.meals_query.list_meals(&user_id).await?;
    Ok(web::Json(meals.iter().map(MealResponse::from).collect()))
}

/// A single meal by id.
#[utoipa::path(
    get,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal id")),
    responses(
        (status = 200, description = "Meal", body = MealResponse),
        (status = 400, description = "Invalid meal id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Meal not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "getMeal",
    security(("SessionCookie" = []))
)]
#[get("/meals/{id}")]
pub async fn get_meal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MealResponse>> {
    session.require_user_id()?;
    let meal_id = parse_meal_id(path.into_inner())?;
    let meal = state.meals_query.get_meal(&meal_id).await?;
    Ok(web::Json(MealResponse::from(&meal)))
}

/// Edit a meal's caption, type, or date. Owner only.
///
/// Absent and blank fields are left unchanged; an existing `mealDate` cannot
/// be removed.
#[utoipa::path(
    patch,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal id")),
    request_body = UpdateMealBody,
    responses(
        (status = 200, description = "Updated meal", body = MealResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the meal's owner", body = Error),
        (status = 404, description = "Meal not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "updateMeal",
    security(("SessionCookie" = []))
)]
#[patch("/meals/{id}")]
pub async fn update_meal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateMealBody>,
) -> ApiResult<web::Json<MealResponse>> {
    let requester = session.require_user_id()?;
    let meal_id = parse_meal_id(path.into_inner())?;
    let UpdateMealBody {
        caption,
        meal_type,
        meal_date,
    } = payload.into_inner();
    let changes = MealChanges {
        caption: caption.map(parse_caption).transpose()?,
        meal_type: parse_meal_type(meal_type)?,
        meal_date: parse_optional_meal_date(meal_date)?,
    }
    .validate()
    .map_err(map_meal_validation_error)?;
    let meal = state
        .meals
        .update_meal(UpdateMealRequest {
            requester,
            meal_id,
            changes,
        })
        .await?;
    Ok(web::Json(MealResponse::from(&meal)))
}

/// Delete a meal. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal id")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 400, description = "Invalid meal id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the meal's owner", body = Error),
        (status = 404, description = "Meal not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal",
    security(("SessionCookie" = []))
)]
#[delete("/meals/{id}")]
pub async fn delete_meal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let meal_id = parse_meal_id(path.into_inner())?;
    state
        .meals
        .delete_meal(DeleteMealRequest { requester, meal_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
