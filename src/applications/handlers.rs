use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateApplicationRequest, Pagination, UpdateApplicationRequest},
    repo,
    repo_types::JobApplication,
};
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/applications/:id",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_application(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<CreateApplicationRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<JobApplication>), AppError> {
    let fields = payload.validate()?;
    let app = repo::create(&state.db, user.id, &fields).await?;
    info!(application_id = app.id, "job application created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/applications/{}", app.id))],
        Json(app),
    ))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    let (limit, offset) = p.clamped();
    let apps = repo::list_by_user(&state.db, user.id, limit, offset).await?;
    Ok(Json(apps))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_application(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<JobApplication>, AppError> {
    repo::get_for_user(&state.db, user.id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn update_application(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateApplicationRequest>,
) -> Result<Json<JobApplication>, AppError> {
    let patch = payload.validate()?;
    let app = repo::update_for_user(&state.db, user.id, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(application_id = app.id, "job application updated");
    Ok(Json(app))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_application(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    if !repo::delete_for_user(&state.db, user.id, id).await? {
        return Err(AppError::NotFound);
    }
    info!(application_id = id, "job application deleted");
    Ok(StatusCode::NO_CONTENT)
}
