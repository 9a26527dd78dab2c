use axum::{extract::State, Json};

use super::extract::ApiJson;
use crate::auth::password::verify_password_blocking;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::users;
use crate::types::{LoginRequest, LoginResponse, LoginUser};

/// `POST /api/auth/login`: exchanges username and password for a bearer token.
///
/// Unknown users and wrong passwords produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("Username and password are required".to_string()));
    }

    let Some(user) = users::find_by_username(&state.db, &req.username).await? else {
        tracing::info!(username = %req.username, "login failed: unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password_blocking(req.password, user.password.clone()).await? {
        tracing::info!(username = %user.username, "login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, &user.username, user.role_id)?;
    tracing::info!(user_id = user.id, username = %user.username, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        user: LoginUser { id: user.id, username: user.username, role_id: user.role_id },
    }))
}
