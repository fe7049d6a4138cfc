//! Bearer-token middleware
//!
//! Guards the photo upload side-channel. GraphQL operations themselves are
//! not token-gated, matching the public signup/login surface.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Account identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: String,
}

/// Reject requests without a valid `Authorization: Bearer <token>` header
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = JwtService::extract_from_header(header).ok_or(AppError::Unauthorized)?;

    let claims = state.jwt.verify(token).map_err(|e| match e {
        JwtError::ExpiredToken => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    req.extensions_mut().insert(CurrentAccount { id: claims.sub });
    Ok(next.run(req).await)
}
