use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        auth::{AuthSuccessResponse, ChangePasswordRequest, LoginRequest, LoginResponse, LogoutResponse},
        users::{Identity, UserResponse},
    },
    auth::{password, password::StoredCredential, token},
    db::{
        handlers::{Repository, Users},
        models::{activity_log::ActivityCreateDBRequest, users::UserUpdateDBRequest},
    },
    errors::Error,
};

/// Login with email and password
#[utoipa::path(
    post,
    path = "/authentication/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    // Missing fields are a validation error, caught before touching data
    let email = match request.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => {
            return Err(Error::BadRequest {
                message: "email is required".to_string(),
            });
        }
    };
    let password = match request.password {
        Some(password) if !password.is_empty() => password,
        _ => {
            return Err(Error::BadRequest {
                message: "password is required".to_string(),
            });
        }
    };

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    // Every failure leg below returns the identical InvalidCredentials
    // response: an unknown address must not read differently from a wrong
    // password or a deactivated account.
    let user = match user_repo.get_user_by_email(&email).await? {
        Some(user) if user.is_active => user,
        _ => return Err(Error::InvalidCredentials),
    };

    let stored = user.password_hash.clone().ok_or(Error::InvalidCredentials)?;

    // Verify on a blocking thread to avoid stalling the async runtime
    let allow_legacy = state.config.auth.allow_legacy_plaintext;
    let is_valid = tokio::task::spawn_blocking(move || match StoredCredential::parse(&stored, allow_legacy) {
        Some(credential) => credential.verify(&password),
        None => Ok(false),
    })
    .await
    .map_err(|e| Error::Internal {
        operation: format!("spawn password verification task: {e}"),
    })??;

    if !is_valid {
        return Err(Error::InvalidCredentials);
    }

    user_repo.touch_last_login(user.id).await?;

    let identity = Identity::from(user.clone());
    let token = token::issue_token(&identity, &state.config)?;

    Ok(Json(LoginResponse {
        success: true,
        user: UserResponse::from(user),
        token,
    }))
}

/// Logout
///
/// Tokens are stateless: there is nothing to revoke server-side, and the
/// client discards its copy. Deactivating the account is the
/// immediate-revocation path. The endpoint authenticates so a stale token
/// "logging out" still surfaces as a 401 to the client.
#[utoipa::path(
    post,
    path = "/authentication/logout",
    tag = "authentication",
    responses(
        (status = 200, description = "Logout acknowledged", body = LogoutResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn logout(identity: Identity) -> Result<Json<LogoutResponse>, Error> {
    tracing::debug!("Logout acknowledged for {}", identity.email);
    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out; discard the token".to_string(),
    }))
}

/// Change password for the authenticated user
#[utoipa::path(
    post,
    path = "/authentication/password-change",
    request_body = ChangePasswordRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Password changed successfully", body = AuthSuccessResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Current password is incorrect"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<AuthSuccessResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    // Re-read the stored credential; the Identity extractor does not carry it
    let user = user_repo.get_by_id(identity.id).await?.ok_or(Error::UserNotFound)?;
    let stored = user.password_hash.clone().ok_or_else(|| Error::BadRequest {
        message: "Account has no password credential".to_string(),
    })?;

    // Verify current password
    let allow_legacy = state.config.auth.allow_legacy_plaintext;
    let current_password = request.current_password.clone();
    let is_valid = tokio::task::spawn_blocking(move || match StoredCredential::parse(&stored, allow_legacy) {
        Some(credential) => credential.verify(&current_password),
        None => Ok(false),
    })
    .await
    .map_err(|e| Error::Internal {
        operation: format!("spawn password verification task: {e}"),
    })??;

    if !is_valid {
        return Err(Error::InvalidCredentials);
    }

    // Validate new password length
    let password_config = &state.config.auth.password;
    if request.new_password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.new_password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    // Hash the new password on a blocking thread. Always Argon2: this is
    // also the upgrade path for legacy plaintext credentials.
    let params = password::Argon2Params::from(password_config);
    let new_password_hash = tokio::task::spawn_blocking({
        let password = request.new_password.clone();
        move || password::hash_string_with_params(&password, Some(params))
    })
    .await
    .map_err(|e| Error::Internal {
        operation: format!("spawn password hashing task: {e}"),
    })??;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut user_repo = Users::new(&mut tx);
        user_repo
            .update(
                identity.id,
                &UserUpdateDBRequest {
                    password_hash: Some(new_password_hash),
                    ..Default::default()
                },
            )
            .await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(identity.id, "password-change", "user", Some(identity.id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(AuthSuccessResponse {
        success: true,
        message: "Password changed successfully".to_string(),
    }))
}
