//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use r2d2::Pool;
use rusqlite::{Connection, params};
use serde_json::Value;
use tower::ServiceExt;

pub use realty::db::{AppState, DbPool, queries};
pub use realty::models::*;

use realty::config::TokenConfig;
use realty::jwt::TokenKeys;

pub const TEST_SECRET: &str = "test-token-secret";

pub fn test_token_keys(secret: &str) -> TokenKeys {
    TokenKeys::new(&TokenConfig {
        secret: secret.to_string(),
        ttl_hours: 1,
    })
}

/// Single-connection in-memory pool, so every checkout sees the same database.
pub fn test_pool() -> DbPool {
    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(realty::db::connection_manager(":memory:"))
        .unwrap();
    {
        let conn = pool.get().unwrap();
        realty::db::init_db(&conn).unwrap();
    }
    pool
}

pub fn create_test_app_state() -> AppState {
    AppState::new(
        test_pool(),
        test_token_keys(TEST_SECRET),
        realty::policy::route_table(),
    )
}

pub fn test_app(state: AppState) -> Router {
    realty::handlers::app(state)
}

pub fn create_test_user(conn: &Connection, name: &str, user_type: UserType) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0100".to_string(),
        user_type,
    };
    queries::create_user(conn, &input).unwrap()
}

/// Insert a user with a fixed id.
pub fn create_test_user_with_id(conn: &Connection, id: i64, name: &str, user_type: UserType) -> User {
    conn.execute(
        "INSERT INTO users (id, name, email, phone, user_type, created_at, updated_at)
         VALUES (?1, ?2, ?3, '555-0100', ?4, 0, 0)",
        params![id, name, format!("user{}@example.com", id), user_type.as_ref()],
    )
    .unwrap();
    queries::get_user_by_id(conn, id).unwrap().unwrap()
}

pub fn home_input(city: &str, price: f64, images: &[&str]) -> CreateHome {
    CreateHome {
        address: "1 Main St".to_string(),
        number_of_bedrooms: 3,
        number_of_bathrooms: 2.0,
        city: city.to_string(),
        price,
        land_size: 1000.0,
        property_type: PropertyType::Residential,
        images: images
            .iter()
            .map(|url| CreateImage {
                url: url.to_string(),
            })
            .collect(),
    }
}

pub fn create_test_home(
    conn: &mut Connection,
    realtor_id: i64,
    city: &str,
    price: f64,
    images: &[&str],
) -> Home {
    queries::create_home(conn, &home_input(city, price, images), realtor_id).unwrap()
}

pub fn token_for(state: &AppState, user: &User) -> String {
    state.tokens.issue(user.id, &user.name).unwrap()
}

/// Send a request through the app and decode the JSON body (`Null` when empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
