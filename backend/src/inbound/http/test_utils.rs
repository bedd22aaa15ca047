//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test as actix_test;
use actix_web::{App, HttpResponse, web};

use super::error::json_config;
use super::session::SessionContext;
use super::state::HttpState;
use super::api_routes;
use crate::domain::ports::{MockAccounts, MockMealCommand, MockMealQuery, MockOwnerRefRepair};
use crate::domain::{Error, UserId};

/// Cookie name used by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

const SIGN_IN_PATH: &str = "/__test/sign-in/{user_id}";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

async fn sign_in(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register a route that signs in as the user named in the path, so handler
/// tests can obtain a session cookie without going through `/login`.
pub fn sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(SIGN_IN_PATH, web::post().to(sign_in));
}

/// Sign in as `user_id` through [`sign_in_route`] and return the cookie.
pub async fn session_cookie<S>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/__test/sign-in/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// Mock ports backing an [`HttpState`] in handler tests.
///
/// Unconfigured mocks panic when called, so each test only sets expectations
/// on the port its handler should reach.
#[derive(Default)]
pub struct TestPorts {
    pub accounts: MockAccounts,
    pub meals: MockMealCommand,
    pub meals_query: MockMealQuery,
    pub repair: MockOwnerRefRepair,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.accounts),
            Arc::new(self.meals),
            Arc::new(self.meals_query),
            Arc::new(self.repair),
        )
    }
}

/// Build an app with the full `/api/v1` surface, session middleware, JSON
/// error handling, and the test sign-in route.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .wrap(test_session_middleware())
        .configure(sign_in_route)
        .service(web::scope("/api/v1").configure(api_routes))
}
