//! Feed endpoint: meals across all users, newest first.

use actix_web::{get, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, FeedItem};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemResponse {
    pub meal_id: String,
    pub owner_id: Option<String>,
    /// Poster's username, or `Unknown User` when the owner cannot be resolved.
    pub username: String,
    pub avatar: String,
    pub caption: String,
    pub meal_type: String,
    pub meal_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: usize,
    pub comment_count: usize,
}

impl From<FeedItem> for FeedItemResponse {
    fn from(item: FeedItem) -> Self {
        Self {
            meal_id: item.meal_id.to_string(),
            owner_id: item.owner_id.map(|id| id.to_string()),
            username: item.username,
            avatar: item.avatar,
            caption: item.caption,
            meal_type: item.meal_type.to_string(),
            meal_date: item.meal_date,
            created_at: item.created_at,
            like_count: item.like_count,
            comment_count: item.comment_count,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Feed items", body = [FeedItemResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "feed",
    security(("SessionCookie" = []))
)]
#[get("/feed")]
pub async fn feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FeedItemResponse>>> {
    session.require_user_id()?;
    let items = state.meals_query.feed().await?;
    Ok(web::Json(items.into_iter().map(FeedItemResponse::from).collect()))
}
