use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::db::job_queries;
use crate::errors::AppError;
use crate::models::{CreateJob, Job, JobFilter, UpdateJob};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/:id", get(get_job).patch(update_job).delete(delete_job))
}

#[derive(Debug, Serialize)]
struct JobResponse {
    job: Job,
}

#[derive(Debug, Serialize)]
struct JobsResponse {
    jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: i32,
}

/// POST /jobs - Create a job posting. Requires an admin caller.
async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateJob>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    auth.require_admin()?;
    input.validate()?;
    info!(
        "POST /jobs - Creating job '{}' for company {}",
        input.title, input.company_handle
    );
    let job = job_queries::create(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs - List jobs. Accepts optional `title`, `minSalary` and
/// `hasEquity` query filters; a filtered request with no matches is a 404.
async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<JobsResponse>, AppError> {
    if filter.is_empty() {
        info!("GET /jobs - Fetching all jobs");
        let jobs = job_queries::fetch_all(&state.pool).await?;
        return Ok(Json(JobsResponse { jobs }));
    }

    info!("GET /jobs - Filtering jobs");
    let jobs = job_queries::filter(&state.pool, &filter).await?;
    if jobs.is_empty() {
        return Err(AppError::NotFound(
            "No jobs matching that filter".to_string(),
        ));
    }
    Ok(Json(JobsResponse { jobs }))
}

/// GET /jobs/:id - Fetch one job. Requires a logged-in caller.
async fn get_job(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<JobResponse>, AppError> {
    info!("GET /jobs/{} - Fetching job", id);
    let job = job_queries::fetch_one(&state.pool, id).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/:id - Partial update over title/salary/equity.
async fn update_job(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    Json(input): Json<UpdateJob>,
) -> Result<Json<JobResponse>, AppError> {
    input.validate()?;
    info!("PATCH /jobs/{} - Updating job", id);
    let job = job_queries::update(&state.pool, id, input).await?;
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/:id - Remove a job. Requires a logged-in caller.
async fn delete_job(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    info!("DELETE /jobs/{} - Deleting job", id);
    job_queries::delete(&state.pool, id).await?;
    Ok(Json(DeletedResponse { deleted: id }))
}
