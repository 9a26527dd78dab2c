use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::token::token_from_header;
use crate::error::AppError;
use crate::state::AppState;

/// Gate in front of every admin route.
///
/// Requires an `Authorization` header holding a token signed with the server
/// secret (`Bearer ` prefix optional). On success the decoded
/// [`Claims`](crate::auth::Claims) are stored in the request extensions so
/// handlers can take `Extension<Claims>`. On failure the request is answered
/// with 401 and never reaches the handler.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthenticated)?
        .to_str()
        .map_err(|_| AppError::InvalidToken)?;

    let token = token_from_header(header_value);
    if token.is_empty() {
        return Err(AppError::Unauthenticated);
    }

    let claims = state.tokens.verify(token)?;
    tracing::debug!(user = %claims.username, path = %req.uri().path(), "admin request authorized");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
