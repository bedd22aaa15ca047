//! OpenAPI documentation for the meal logging API.
//!
//! Registers every `/api/v1` handler, the health probes, and the session
//! cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::RepairReport;
use crate::domain::{Error, ErrorCode, LabelCount};
use crate::inbound::http::calendar::CalendarEventResponse;
use crate::inbound::http::feed::FeedItemResponse;
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::insights::InsightsResponse;
use crate::inbound::http::meals::{CreateMealBody, MealResponse, UpdateMealBody};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mealbook API",
        description = "Meal logging: accounts, meals, calendar, insights, and the shared feed."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::update_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::calendar::calendar_events,
        crate::inbound::http::insights::insights,
        crate::inbound::http::feed::feed,
        crate::inbound::http::admin::repair_owner_refs,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        CreateMealBody,
        UpdateMealBody,
        MealResponse,
        CalendarEventResponse,
        InsightsResponse,
        LabelCount,
        FeedItemResponse,
        RepairReport,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Registration, login, and profiles"),
        (name = "meals", description = "Meal logging and derived views"),
        (name = "admin", description = "Maintenance operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "traceId")]
    #[case("MealResponse", "ownerId")]
    #[case("InsightsResponse", "recentMeals")]
    #[case("LabelCount", "count")]
    #[case("FeedItemResponse", "username")]
    #[case("RepairReport", "rewritten")]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    fn meal_item_path_has_all_methods() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/meals/{id}")
            .expect("meal item path");

        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
