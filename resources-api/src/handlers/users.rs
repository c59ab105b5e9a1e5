use crate::{
    dto::{CreatedUserResponse, UserRequest, UserResponse},
    error::{AppError, AppResult},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use resources_domain::{application::ports::auth::AuthorizationContext, domain::entities::NewUser};
use uuid::Uuid;

/// Name of the authenticated principal, as plain text
pub async fn hello(Extension(context): Extension<AuthorizationContext>) -> String {
    context.principal_name().to_string()
}

pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<UserResponse>> {
    let Path(user_id) = user_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let profile = state.user_service.get_user_by_id(user_id).await?;
    Ok(Json(profile.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<CreatedUserResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let new_user = NewUser::from(request);

    let user_id = state.user_service.create_user(&new_user).await?;
    Ok(Json(CreatedUserResponse::new(user_id.to_string())))
}
