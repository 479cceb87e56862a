use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    api::models::users::{Identity, ListUsersQuery, UserCreate, UserResponse, UserUpdate},
    auth::{
        password,
        permissions::{RequiresPermission, operation, resource},
    },
    db::{
        handlers::{Repository, Users, users::UserFilter},
        models::{
            activity_log::ActivityCreateDBRequest,
            users::{UserCreateDBRequest, UserUpdateDBRequest},
        },
    },
    errors::{Error, Result},
    types::UserId,
};

/// Current authenticated identity
#[utoipa::path(
    get,
    path = "/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated identity", body = Identity),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn me(identity: Identity) -> Result<Json<Identity>> {
    Ok(Json(identity))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    summary = "List users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    params(ListUsersQuery),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
    _: RequiresPermission<resource::Users, operation::Read>,
) -> Result<Json<Vec<UserResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let users = repo.list(&UserFilter::new(skip, limit).with_search(query.search)).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    summary = "Create user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already in use"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    current_user: RequiresPermission<resource::Users, operation::Create>,
    Json(create): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if create.email.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "email is required".to_string(),
        });
    }

    let password_config = &state.config.auth.password;
    if create.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if create.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    // Hash on a blocking thread to avoid blocking the async runtime
    let params = password::Argon2Params::from(password_config);
    let password = create.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let created;
    {
        let mut repo = Users::new(&mut tx);
        created = repo.create(&UserCreateDBRequest::from_api(create, password_hash)).await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "create", "user", Some(created.id)).with_detail(json!({"email": created.email})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    summary = "Get user",
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "User ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    _: RequiresPermission<resource::Users, operation::Read>,
) -> Result<Json<UserResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "User ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    current_user: RequiresPermission<resource::Users, operation::Update>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    // A superadmin cannot lock themselves out
    if id == current_user.id && update.is_active == Some(false) {
        return Err(Error::BadRequest {
            message: "Cannot deactivate your own account".to_string(),
        });
    }

    // Hash a password reset if requested
    let password_hash = match &update.password {
        Some(new_password) => {
            let password_config = &state.config.auth.password;
            if new_password.len() < password_config.min_length {
                return Err(Error::BadRequest {
                    message: format!("Password must be at least {} characters", password_config.min_length),
                });
            }
            let params = password::Argon2Params::from(password_config);
            let password = new_password.clone();
            Some(
                tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
                    .await
                    .map_err(|e| Error::Internal {
                        operation: format!("spawn password hashing task: {e}"),
                    })??,
            )
        }
        None => None,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let updated;
    {
        let mut repo = Users::new(&mut tx);
        updated = repo.update(id, &UserUpdateDBRequest::from_api(update, password_hash)).await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "update", "user", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(UserResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    summary = "Delete user",
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "User ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    current_user: RequiresPermission<resource::Users, operation::Delete>,
) -> Result<StatusCode> {
    if id == current_user.id {
        return Err(Error::BadRequest {
            message: "Cannot delete your own account".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let deleted;
    {
        let mut repo = Users::new(&mut tx);
        deleted = repo.delete(id).await?;
    }
    if !deleted {
        return Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        });
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "delete", "user", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
