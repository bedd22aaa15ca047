//! Tests for meal handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{MealDraft, MealId, OwnerRef, UserId};
use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_app};

const ALICE: &str = "65a1f0c2b3d4e5f60718293a";
const MEAL: &str = "65b000000000000000000001";

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn alice() -> UserId {
    UserId::new(ALICE).expect("valid id")
}

#[fixture]
fn porridge() -> Meal {
    Meal::new(MealDraft {
        id: MealId::new(MEAL).expect("valid meal id"),
        owner: OwnerRef::text(ALICE.to_uppercase()),
        caption: "Porridge".to_owned(),
        meal_type: MealType::Breakfast,
        meal_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        created_at: Some(created_at()),
        likes: vec![OwnerRef::typed(ALICE)],
        comments: Vec::new(),
    })
}

#[rstest]
#[actix_web::test]
async fn create_requires_session() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/meals")
            .set_json(json!({ "caption": "Porridge" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn create_defaults_type_and_uses_session_owner(alice: UserId) {
    let mut ports = TestPorts::default();
    ports
        .meals
        .expect_create_meal()
        .withf(move |req| {
            req.owner == alice
                && req.caption.as_ref() == "Porridge"
                && req.meal_type == MealType::Other
                && req.meal_date.is_none()
        })
        .times(1)
        .returning(|req| {
            Ok(Meal::create(
                MealId::new(MEAL).expect("valid meal id"),
                &req.owner,
                req.caption,
                req.meal_type,
                req.meal_date,
                created_at(),
            ))
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/meals")
            .cookie(cookie)
            .set_json(json!({ "caption": "  Porridge  ", "mealDate": "" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: MealResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.id, MEAL);
    assert_eq!(body.owner_id.as_deref(), Some(ALICE));
    assert_eq!(body.meal_type, "other");
    assert_eq!(body.like_count, 0);
}

#[rstest]
#[case(json!({ "mealType": "lunch" }), "caption", "missing_field")]
#[case(json!({ "caption": "   " }), "caption", "empty_caption")]
#[case(json!({ "caption": "x".repeat(501) }), "caption", "caption_too_long")]
#[case(json!({ "caption": "soup", "mealType": "brunch" }), "mealType", "invalid_meal_type")]
#[case(json!({ "caption": "soup", "mealDate": "15/03/2024" }), "mealDate", "invalid_meal_date")]
#[actix_web::test]
async fn create_rejects_invalid_fields(#[case] body: Value, #[case] field: &str, #[case] code: &str) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/meals")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn list_renders_canonical_owner_and_counts(alice: UserId, porridge: Meal) {
    let mut ports = TestPorts::default();
    ports
        .meals_query
        .expect_list_meals()
        .withf(move |user| *user == alice)
        .times(1)
        .return_once(move |_| Ok(vec![porridge]));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/meals")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["ownerId"], ALICE);
    assert_eq!(body[0]["mealType"], "breakfast");
    assert_eq!(body[0]["mealDate"], "2024-03-15");
    assert_eq!(body[0]["likeCount"], 1);
    assert_eq!(body[0]["commentCount"], 0);
}

#[rstest]
#[actix_web::test]
async fn get_rejects_malformed_id() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/meals/not-a-meal")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[rstest]
#[actix_web::test]
async fn get_reports_missing_meal() {
    let mut ports = TestPorts::default();
    ports
        .meals_query
        .expect_get_meal()
        .return_once(|_| Err(Error::not_found("meal not found")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/meals/{MEAL}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_passes_parsed_changes(alice: UserId, porridge: Meal) {
    let mut ports = TestPorts::default();
    ports
        .meals
        .expect_update_meal()
        .withf(move |req| {
            req.requester == alice
                && req.meal_id.to_string() == MEAL
                && req.changes.caption.is_none()
                && req.changes.meal_type == Some(MealType::Lunch)
                && req.changes.meal_date.is_none()
        })
        .times(1)
        .return_once(move |req| {
            let mut meal = porridge;
            meal.apply(req.changes);
            Ok(meal)
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/meals/{MEAL}"))
            .cookie(cookie)
            .set_json(json!({ "mealType": "LUNCH" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: MealResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.meal_type, "lunch");
    assert_eq!(body.caption, "Porridge");
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "mealDate": "" }))]
#[case(json!({ "mealDate": "   " }))]
#[actix_web::test]
async fn update_without_changes_is_rejected(#[case] patch: Value) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/meals/{MEAL}"))
            .cookie(cookie)
            .set_json(patch)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "no_changes");
}

#[rstest]
#[actix_web::test]
async fn update_by_non_owner_is_forbidden() {
    let mut ports = TestPorts::default();
    ports
        .meals
        .expect_update_meal()
        .return_once(|_| Err(Error::forbidden("you do not own this meal")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, "65a1f0c2b3d4e5f60718293f").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/meals/{MEAL}"))
            .cookie(cookie)
            .set_json(json!({ "caption": "mine now" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(Ok(()), StatusCode::NO_CONTENT)]
#[case(Err(Error::not_found("meal not found")), StatusCode::NOT_FOUND)]
#[case(Err(Error::forbidden("you do not own this meal")), StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn delete_maps_outcome(
    alice: UserId,
    #[case] outcome: Result<(), Error>,
    #[case] expected: StatusCode,
) {
    let mut ports = TestPorts::default();
    ports
        .meals
        .expect_delete_meal()
        .withf(move |req| req.requester == alice && req.meal_id.to_string() == MEAL)
        .times(1)
        .return_once(move |_| outcome);
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = session_cookie(&app, ALICE).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/meals/{MEAL}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}
