use axum::extract::{rejection::QueryRejection, Extension, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::handlers::utils::{parse_flag, parse_positive, query_rejection};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserBannerQuery {
    pub tag_id: Option<String>,
    pub feature_id: Option<String>,
    /// Accepted for compatibility; banners carry no revision history.
    pub use_last_revision: Option<String>,
}

/// GET /user_banner - content of the banner for a tag/feature pair
///
/// Admin callers also see inactive banners.
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<UserBannerQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query.map_err(query_rejection)?;

    let tag_id = parse_positive("tag_id", query.tag_id.as_deref())?;
    let feature_id = parse_positive("feature_id", query.feature_id.as_deref())?;
    let _use_last_revision = parse_flag(query.use_last_revision.as_deref());

    let content = state
        .banners
        .user_banner(tag_id, feature_id, auth_user.is_admin())
        .await?;

    Ok(ApiResponse::success(content))
}
