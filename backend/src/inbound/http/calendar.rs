//! Calendar projection endpoint.
//!
//! ```text
//! GET /api/v1/calendar/events
//! ```

use actix_web::{get, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, CalendarEvent, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One all-day calendar entry.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub id: String,
    pub title: String,
    #[schema(format = "date", example = "2024-01-01")]
    pub start: NaiveDate,
    pub meal_type: String,
    pub all_day: bool,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title,
            start: event.start,
            meal_type: event.meal_type.to_string(),
            all_day: true,
        }
    }
}

/// Calendar events for the signed-in user's dated meals.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/events",
    responses(
        (status = 200, description = "Calendar events", body = [CalendarEventResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "calendarEvents",
    security(("SessionCookie" = []))
)]
#[get("/calendar/events")]
pub async fn calendar_events(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CalendarEventResponse>>> {
    let user_id = session.require_user_id()?;
    let events = state.meals_query.calendar_events(&user_id).await?;
    Ok(web::Json(
        events.into_iter().map(CalendarEventResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{MealId, MealType, UserId};
    use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_app};

    const ALICE: &str = "65a1f0c2b3d4e5f60718293a";

    #[rstest]
    #[actix_web::test]
    async fn renders_date_only_events() {
        let alice = UserId::new(ALICE).expect("valid id");
        let mut ports = TestPorts::default();
        ports
            .meals_query
            .expect_calendar_events()
            .withf(move |user| *user == alice)
            .return_once(|_| {
                Ok(vec![CalendarEvent {
                    id: MealId::new("65b000000000000000000001").expect("valid meal id"),
                    title: "Ramen".to_owned(),
                    start: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                    meal_type: MealType::Dinner,
                }])
            });
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&app, ALICE).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/calendar/events")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["title"], "Ramen");
        assert_eq!(body[0]["start"], "2024-01-01");
        assert_eq!(body[0]["mealType"], "dinner");
        assert_eq!(body[0]["allDay"], true);
    }

    #[rstest]
    #[actix_web::test]
    async fn requires_session() {
        let app = actix_test::init_service(test_app(TestPorts::default())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/calendar/events")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
