use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use encore_core::AppError;
use sha2::{Digest, Sha256};

use crate::error::ApiResult;
use crate::state::AppState;

/// Hashes a bearer token for storage in application state.
pub fn internal_token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

pub async fn require_internal_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("internal api token required".to_owned()))?;

    // Digests have a fixed length, so the comparison does not leak the token length.
    if !digests_match(&internal_token_digest(token), &state.internal_api_token_digest) {
        return Err(AppError::Unauthorized("invalid internal api token".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn digests_match(left: &[u8; 32], right: &[u8; 32]) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}
