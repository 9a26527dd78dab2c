//! Generic handlers for the content entities.
//!
//! Collections (products, services) get list/create/update/delete, the
//! one-row tables (about, contact, hero, footer) get get/put. Routes pick
//! the entity with a turbofish, e.g. `get(list::<Product>)`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};

use super::extract::{ApiJson, ApiPath};
use crate::auth::Claims;
use crate::error::{validation, AppError, AppResult, OptionExt};
use crate::state::AppState;
use crate::store::{Draft, Singleton, Table};
use crate::types::{ContactMessage, Editable, MessageResponse};

pub async fn list<R: Editable>(State(state): State<AppState>) -> AppResult<Json<Vec<R>>> {
    let rows = Table::<R>::list(&state.db).await?;
    Ok(Json(rows))
}

pub async fn create<R: Editable>(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(input): ApiJson<R::Input>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let row = Table::<R>::insert(&state.db, &input).await?;
    tracing::info!(table = R::TABLE, by = %claims.username, "{} created", R::LABEL);
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update<R: Editable>(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<R::Input>,
) -> AppResult<Json<R>> {
    input.validate()?;
    let row = Table::<R>::update(&state.db, id, &input).await?.ok_or_not_found(R::LABEL)?;
    tracing::info!(table = R::TABLE, id, by = %claims.username, "{} updated", R::LABEL);
    Ok(Json(row))
}

pub async fn delete<R: Editable>(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !Table::<R>::delete(&state.db, id).await? {
        return Err(AppError::NotFound(R::LABEL.to_string()));
    }
    tracing::info!(table = R::TABLE, id, by = %claims.username, "{} deleted", R::LABEL);
    Ok(Json(MessageResponse::new(format!("{} deleted", R::LABEL))))
}

pub async fn get_singleton<R: Editable + Default>(State(state): State<AppState>) -> AppResult<Json<R>> {
    let row = Singleton::<R>::get(&state.db).await?;
    Ok(Json(row))
}

pub async fn put_singleton<R: Editable + Default>(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(input): ApiJson<R::Input>,
) -> AppResult<Json<R>> {
    input.validate()?;
    let row = Singleton::<R>::put(&state.db, &input).await?;
    tracing::info!(table = R::TABLE, by = %claims.username, "{} saved", R::LABEL);
    Ok(Json(row))
}

/// Public contact form. Messages are validated and logged, not stored.
pub async fn submit_contact_message(
    ApiJson(msg): ApiJson<ContactMessage>,
) -> AppResult<Json<MessageResponse>> {
    validation::require_non_empty(&msg.name, "name")?;
    validation::validate_email(&msg.email)?;
    validation::require_non_empty(&msg.message, "message")?;
    tracing::info!(
        name = %msg.name,
        email = %msg.email,
        phone = msg.phone.as_deref().unwrap_or(""),
        "contact form message: {}",
        msg.message
    );
    Ok(Json(MessageResponse::new("Your message has been sent")))
}
