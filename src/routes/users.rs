use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::extract::{ApiJson, ApiPath};
use crate::auth::password::hash_password_blocking;
use crate::error::{validation, AppError, AppResult, OptionExt};
use crate::state::AppState;
use crate::store::{
    users::{self, UserChanges, DEFAULT_ROLE_ID},
    Field, Table,
};
use crate::types::{MessageResponse, NewUser, User, UserPatch};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(Table::<User>::list(&state.db).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewUser>,
) -> AppResult<impl IntoResponse> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("Username, email and password are required".to_string()));
    }
    validation::max_len(&req.username, validation::MAX_TEXT_LEN, "username")?;
    validation::validate_email(&req.email)?;
    validation::max_len(&req.email, validation::MAX_TEXT_LEN, "email")?;

    let hash = hash_password_blocking(req.password).await?;
    let changes = UserChanges(vec![
        ("username", Field::Text(req.username.trim().to_string())),
        ("email", Field::Text(req.email.trim().to_string())),
        ("password", Field::Text(hash)),
        ("role_id", Field::Integer(req.role_id.unwrap_or(DEFAULT_ROLE_ID))),
    ]);

    let user = users::create(&state.db, &changes).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UserPatch>,
) -> AppResult<Json<User>> {
    let mut fields = Vec::new();
    if let Some(username) = req.username {
        validation::require_non_empty(&username, "username")?;
        validation::max_len(&username, validation::MAX_TEXT_LEN, "username")?;
        fields.push(("username", Field::Text(username.trim().to_string())));
    }
    if let Some(email) = req.email {
        validation::validate_email(&email)?;
        validation::max_len(&email, validation::MAX_TEXT_LEN, "email")?;
        fields.push(("email", Field::Text(email.trim().to_string())));
    }
    if let Some(role_id) = req.role_id {
        fields.push(("role_id", Field::Integer(role_id)));
    }
    if let Some(password) = req.password {
        validation::require_non_empty(&password, "password")?;
        fields.push(("password", Field::Text(hash_password_blocking(password).await?)));
    }

    let user = users::update(&state.db, id, &UserChanges(fields)).await?.ok_or_not_found("User")?;
    tracing::info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !Table::<User>::delete(&state.db, id).await? {
        return Err(AppError::NotFound("User".to_string()));
    }
    tracing::info!(user_id = id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
