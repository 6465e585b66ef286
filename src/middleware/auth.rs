use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::ADMIN_ROLE;
use crate::error::ApiError;
use crate::state::AppState;

/// Request header carrying the signed role token
pub const TOKEN_HEADER: &str = "token";

const NOT_LOGGED_IN: &str = "The user is not logged in";
const NO_ACCESS: &str = "The user does not have access";

/// Authenticated caller extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Rejects requests without a valid, unexpired token and injects [`AuthUser`]
pub async fn require_authentication(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::debug!("Request without {} header", TOKEN_HEADER);
        ApiError::unauthorized(NOT_LOGGED_IN)
    })?;

    let role = state.tokens.verify(token).map_err(ApiError::from)?;

    request.extensions_mut().insert(AuthUser { role });
    Ok(next.run(request).await)
}

/// Admin-only gate. Must run inside [`require_authentication`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized(NOT_LOGGED_IN))?;

    if !auth_user.is_admin() {
        tracing::warn!("Role '{}' denied access to {}", auth_user.role, request.uri().path());
        return Err(ApiError::forbidden(NO_ACCESS));
    }

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
