use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::faqs::{FaqCreate, FaqResponse, FaqStatus, FaqUpdate, ListFaqsQuery},
    auth::permissions::{RequiresPermission, operation, resource},
    db::{
        handlers::{Faqs, Repository, faqs::FaqFilter},
        models::{
            activity_log::ActivityCreateDBRequest,
            faqs::{FaqCreateDBRequest, FaqUpdateDBRequest},
        },
    },
    errors::{Error, Result},
    types::FaqId,
};

#[utoipa::path(
    get,
    path = "/faqs",
    tag = "faqs",
    summary = "List FAQ entries",
    responses(
        (status = 200, description = "FAQ entries, optionally filtered by status", body = Vec<FaqResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    params(ListFaqsQuery),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<ListFaqsQuery>,
    _: RequiresPermission<resource::Faqs, operation::Read>,
) -> Result<Json<Vec<FaqResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Faqs::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let faqs = repo.list(&FaqFilter::new(skip, limit).with_status(query.status)).await?;

    Ok(Json(faqs.into_iter().map(FaqResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/faqs",
    tag = "faqs",
    summary = "Create FAQ entry",
    request_body = FaqCreate,
    responses(
        (status = 201, description = "FAQ entry created successfully", body = FaqResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_faq(
    State(state): State<AppState>,
    current_user: RequiresPermission<resource::Faqs, operation::Create>,
    Json(create): Json<FaqCreate>,
) -> Result<(StatusCode, Json<FaqResponse>)> {
    if create.question.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "question is required".to_string(),
        });
    }

    // An entry born with an answer is already answered
    let (status, answered_by) = if create.answer.is_some() {
        (FaqStatus::Answered, Some(current_user.id))
    } else {
        (FaqStatus::Pending, None)
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let faq;
    {
        let mut repo = Faqs::new(&mut tx);
        faq = repo
            .create(&FaqCreateDBRequest {
                question: create.question,
                answer: create.answer,
                status,
                submitted_by_email: create.submitted_by_email,
                answered_by,
            })
            .await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "create", "faq", Some(faq.id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(FaqResponse::from(faq))))
}

#[utoipa::path(
    get,
    path = "/faqs/{id}",
    tag = "faqs",
    summary = "Get FAQ entry",
    responses(
        (status = 200, description = "FAQ entry details", body = FaqResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "FAQ entry not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "FAQ ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<FaqId>,
    _: RequiresPermission<resource::Faqs, operation::Read>,
) -> Result<Json<FaqResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Faqs::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(faq) => Ok(Json(FaqResponse::from(faq))),
        None => Err(Error::NotFound {
            resource: "FAQ".to_string(),
            id: id.to_string(),
        }),
    }
}

/// Update a FAQ entry: edit the question, answer it, or move it through
/// triage (`pending → answered → published`).
#[utoipa::path(
    patch,
    path = "/faqs/{id}",
    tag = "faqs",
    summary = "Update FAQ entry",
    request_body = FaqUpdate,
    responses(
        (status = 200, description = "FAQ entry updated successfully", body = FaqResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "FAQ entry not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "FAQ ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<FaqId>,
    current_user: RequiresPermission<resource::Faqs, operation::Update>,
    Json(update): Json<FaqUpdate>,
) -> Result<Json<FaqResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let faq;
    {
        let mut repo = Faqs::new(&mut tx);

        let existing = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "FAQ".to_string(),
            id: id.to_string(),
        })?;

        // Publishing requires an answer to publish
        let target_status = update.status.or({
            // Supplying an answer to a pending entry advances it
            if update.answer.is_some() && existing.status == FaqStatus::Pending {
                Some(FaqStatus::Answered)
            } else {
                None
            }
        });
        if target_status == Some(FaqStatus::Published) && update.answer.is_none() && existing.answer.is_none() {
            return Err(Error::BadRequest {
                message: "Cannot publish a FAQ entry without an answer".to_string(),
            });
        }

        let answered_by = update.answer.as_ref().map(|_| current_user.id);
        faq = repo
            .update(
                id,
                &FaqUpdateDBRequest {
                    question: update.question,
                    answer: update.answer,
                    status: target_status,
                    answered_by,
                },
            )
            .await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "update", "faq", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(FaqResponse::from(faq)))
}

#[utoipa::path(
    delete,
    path = "/faqs/{id}",
    tag = "faqs",
    summary = "Delete FAQ entry",
    responses(
        (status = 204, description = "FAQ entry deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "FAQ entry not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "FAQ ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<FaqId>,
    current_user: RequiresPermission<resource::Faqs, operation::Delete>,
) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let deleted;
    {
        let mut repo = Faqs::new(&mut tx);
        deleted = repo.delete(id).await?;
    }
    if !deleted {
        return Err(Error::NotFound {
            resource: "FAQ".to_string(),
            id: id.to_string(),
        });
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "delete", "faq", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
