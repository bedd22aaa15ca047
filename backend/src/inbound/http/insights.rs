//! Insights endpoint: aggregated statistics over the requester's meals.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, LabelCount, MealStats};
use crate::inbound::http::meals::MealResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Statistics for the signed-in user. Favourites read `N/A` with no meals;
/// breakdowns keep first-seen order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub total_count: u64,
    pub favorite_caption: String,
    pub favorite_meal_type: String,
    pub most_active_weekday: String,
    pub meals_by_month: Vec<LabelCount>,
    pub meals_by_meal_type: Vec<LabelCount>,
    pub meals_by_weekday: Vec<LabelCount>,
    pub recent_meals: Vec<MealResponse>,
}

impl From<MealStats> for InsightsResponse {
    fn from(stats: MealStats) -> Self {
        Self {
            total_count: stats.total_count,
            favorite_caption: stats.favorite_caption,
            favorite_meal_type: stats.favorite_meal_type,
            most_active_weekday: stats.most_active_weekday,
            meals_by_month: stats.meals_by_month,
            meals_by_meal_type: stats.meals_by_meal_type,
            meals_by_weekday: stats.meals_by_weekday,
            recent_meals: stats.recent_meals.iter().map(MealResponse::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/insights",
    responses(
        (status = 200, description = "Meal statistics", body = InsightsResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "insights",
    security(("SessionCookie" = []))
)]
#[get("/insights")]
pub async fn insights(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<InsightsResponse>> {
    let user_id = session.require_user_id()?;
    let stats = state.meals_query.insights(&user_id).await?;
    Ok(web::Json(InsightsResponse::from(stats)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{NOT_AVAILABLE, UserId, summarize};
    use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_app};

    const ALICE: &str = "65a1f0c2b3d4e5f60718293a";

    #[rstest]
    #[actix_web::test]
    async fn empty_stats_render_placeholders() {
        let alice = UserId::new(ALICE).expect("valid id");
        let mut ports = TestPorts::default();
        ports
            .meals_query
            .expect_insights()
            .withf(move |user| *user == alice)
            .return_once(|_| Ok(summarize(&[], Utc::now())));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, ALICE).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/insights")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["totalCount"], 0);
        assert_eq!(body["favoriteCaption"], NOT_AVAILABLE);
        assert_eq!(body["mostActiveWeekday"], NOT_AVAILABLE);
        assert_eq!(body["mealsByMonth"], Value::Array(Vec::new()));
        assert_eq!(body["recentMeals"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_is_service_unavailable() {
        let mut ports = TestPorts::default();
        ports
            .meals_query
            .expect_insights()
            .return_once(|_| Err(Error::service_unavailable("meal store unavailable")));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, ALICE).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/insights")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
