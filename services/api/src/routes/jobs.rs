//! Job posting routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use common::models::{CreateJobRequest, Identity, JobFilter, MessageResponse, SearchQuery, User};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::protected,
    repositories::ApplyOutcome,
    state::AppState,
    validation::validate_new_job,
};

/// Job routes, relative to the API prefix
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).merge(protected(post(create_job))))
        .route("/jobs/search", get(search_jobs))
        .route("/jobs/user/:id", protected(get(jobs_by_user)))
        .route("/jobs/apply/:id", protected(put(apply_job)))
        .route("/jobs/like/:id", protected(put(like_job)))
        .route("/jobs/:id", protected(get(get_job).delete(delete_job)))
}

/// Parse a path id; ids that cannot exist are reported as not found
fn parse_id(raw: &str, not_found: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(not_found.to_string()))
}

/// Local user for the caller's identity, if one was provisioned
async fn caller(state: &AppState, identity: &Identity) -> ApiResult<Option<User>> {
    state
        .user_repository
        .find_by_auth0_id(&identity.sub)
        .await
        .map_err(internal("Failed to resolve user"))
}

/// Ensure the job exists before touching anything else
async fn require_job(state: &AppState, id: Uuid) -> ApiResult<()> {
    state
        .job_repository
        .get(id)
        .await
        .map_err(internal("Failed to get job"))?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(())
}

/// Create a new job
pub async fn create_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let user = caller(&state, &identity)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new_job = validate_new_job(&payload).map_err(ApiError::BadRequest)?;

    let job = state
        .job_repository
        .create(user.id, &new_job)
        .await
        .map_err(internal("Failed to create job"))?;

    info!("Job {} created by {}", job.id, user.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// Get all jobs, newest first
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let jobs = state
        .job_repository
        .list()
        .await
        .map_err(internal("Failed to list jobs"))?;

    Ok(Json(jobs))
}

/// Get the jobs posted by a user
pub async fn jobs_by_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_id(&id, "User not found")?;

    let user = state
        .user_repository
        .find_by_id(user_id)
        .await
        .map_err(internal("Failed to get user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let jobs = state
        .job_repository
        .list_by_creator(user.id)
        .await
        .map_err(internal("Failed to list user jobs"))?;

    Ok(Json(jobs))
}

/// Search jobs by tags, location and title
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = JobFilter::from_query(&query);

    let jobs = state
        .job_repository
        .search(&filter)
        .await
        .map_err(internal("Failed to search jobs"))?;

    Ok(Json(jobs))
}

/// Get a job by ID
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let job_id = parse_id(&id, "Job not found")?;

    let job = state
        .job_repository
        .get(job_id)
        .await
        .map_err(internal("Failed to get job"))?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(job))
}

/// Like a job, or unlike it if the caller already does
pub async fn like_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let job_id = parse_id(&id, "Job not found")?;
    require_job(&state, job_id).await?;

    let user = caller(&state, &identity)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let job = state
        .job_repository
        .toggle_like(job_id, user.id)
        .await
        .map_err(internal("Failed to toggle like"))?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(job))
}

/// Apply to a job
pub async fn apply_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let job_id = parse_id(&id, "Job not found")?;
    require_job(&state, job_id).await?;

    let user = caller(&state, &identity)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    match state
        .job_repository
        .add_applicant(job_id, user.id)
        .await
        .map_err(internal("Failed to apply to job"))?
    {
        ApplyOutcome::Applied(job) => {
            info!("User {} applied to job {}", user.id, job_id);
            Ok(Json(job))
        }
        ApplyOutcome::AlreadyApplied => Err(ApiError::BadRequest(
            "Already applied for this job".to_string(),
        )),
        ApplyOutcome::JobNotFound => Err(ApiError::NotFound("Job not found".to_string())),
    }
}

/// Delete a job
///
/// Any caller with a local user record may delete any job; there is no
/// check against the job's creator.
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let job_id = parse_id(&id, "Job not found")?;
    require_job(&state, job_id).await?;

    let user = caller(&state, &identity)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Unauthorized".to_string()))?;

    let deleted = state
        .job_repository
        .delete(job_id)
        .await
        .map_err(internal("Failed to delete job"))?;

    if !deleted {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    info!("Job {} deleted by {}", job_id, user.id);
    Ok(Json(MessageResponse {
        message: "Job deleted".to_string(),
    }))
}
