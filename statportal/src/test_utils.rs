//! Test utilities for integration testing.

use crate::{
    AppState,
    api::models::users::{Identity, Role},
    auth::{password, token},
    config::Config,
    db::{
        handlers::{Repository, Users},
        models::users::{UserCreateDBRequest, UserDBResponse},
    },
};
use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

/// Config with a fixed secret and cheap Argon2 parameters so hashing does
/// not dominate test time.
pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_email: "admin@test.com".to_string(),
        admin_password: Some("superadmin-password".to_string()),
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    };
    config.auth.password.argon2_memory_kib = 1024;
    config.auth.password.argon2_iterations = 1;
    config
}

pub fn create_test_app_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        config: create_test_config(),
    }
}

/// Full application over the given pool, as a test server. Runs migrations
/// and seeds the `admin@test.com` superadmin from the test config.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

pub async fn create_test_user(pool: &PgPool, role: Role) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users_repo = Users::new(&mut conn);
    let unique = Uuid::new_v4().simple().to_string();

    users_repo
        .create(&UserCreateDBRequest {
            email: format!("testuser_{unique}@example.com"),
            full_name: Some("Test User".to_string()),
            role,
            password_hash: None,
            is_active: true,
        })
        .await
        .expect("Failed to create test user")
}

/// Create a user with a real (hashed) password, for login-flow tests.
pub async fn create_test_user_with_password(pool: &PgPool, role: Role, plaintext: &str) -> UserDBResponse {
    let config = create_test_config();
    let params = password::Argon2Params::from(&config.auth.password);
    let password_hash = password::hash_string_with_params(plaintext, Some(params)).expect("Failed to hash test password");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users_repo = Users::new(&mut conn);
    let unique = Uuid::new_v4().simple().to_string();

    users_repo
        .create(&UserCreateDBRequest {
            email: format!("testuser_{unique}@example.com"),
            full_name: Some("Test User".to_string()),
            role,
            password_hash: Some(password_hash),
            is_active: true,
        })
        .await
        .expect("Failed to create test user")
}

pub async fn deactivate_user(pool: &PgPool, id: Uuid) {
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to deactivate test user");
}

/// Issue a token for the user with the test config secret and return it as
/// an `Authorization` header value.
pub fn test_bearer_header(user: &UserDBResponse, config: &Config) -> (Identity, String) {
    let identity = Identity {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
        full_name: user.full_name.clone(),
        is_active: user.is_active,
    };
    let token = token::issue_token(&identity, config).expect("Failed to issue test token");
    (identity, format!("Bearer {token}"))
}
