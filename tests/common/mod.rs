#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use qcm::router::init_router;
use qcm::state::AppState;
use qcm_auth::{Identity, Role, issue_token};
use qcm_config::{AccountConfig, CookieConfig, CorsConfig, JwtConfig};
use qcm_core::hash_password;
use qcm_db::{MemoryStore, UserStore};
use qcm_models::NewUser;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

pub fn test_state(store: Arc<MemoryStore>, account_config: AccountConfig) -> AppState {
    AppState {
        store,
        jwt_config: JwtConfig::new(TEST_SECRET).unwrap(),
        cookie_config: CookieConfig { production: false },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        account_config,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(AccountConfig::default())
}

pub fn setup_test_app_with(account_config: AccountConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = test_state(store.clone(), account_config);
    TestApp {
        router: init_router(state.clone()),
        store,
        state,
    }
}

impl TestApp {
    /// Inserts a user whose password is [`TEST_PASSWORD`].
    pub async fn create_user(&self, username: &str, role: Role) -> TestUser {
        let email = format!("{username}@example.com");
        let id = self
            .store
            .insert_user(&NewUser {
                username: username.to_string(),
                email: email.clone(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role,
            })
            .await
            .unwrap();

        TestUser {
            id,
            username: username.to_string(),
            email,
            role,
        }
    }

    /// A `Cookie` header value carrying a fresh token for `user`.
    pub fn cookie_for(&self, user: &TestUser) -> String {
        let token = issue_token(
            &Identity {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                role: user.role,
            },
            &self.state.jwt_config,
        )
        .unwrap();
        format!("token={token}")
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    /// `token=<jwt>` part of the `Set-Cookie` header.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|cookie| cookie.split(';').next())
            .map(str::to_string)
    }
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
