use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::BannerFilter;
use crate::handlers::utils::{json_rejection, parse_optional, parse_positive, query_rejection, BannerBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub tag_id: Option<String>,
    pub feature_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// GET /banner - list banner contents, optionally filtered and paginated
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    let Query(query) = query.map_err(query_rejection)?;

    let filter = BannerFilter::new(
        parse_optional("tag_id", query.tag_id.as_deref())?,
        parse_optional("feature_id", query.feature_id.as_deref())?,
        parse_optional("limit", query.limit.as_deref())?,
        parse_optional("offset", query.offset.as_deref())?,
    );

    let banners = state.banners.list_banners(&filter).await?;
    Ok(ApiResponse::success(banners))
}

/// POST /banner - create a banner with its tag/feature associations
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<BannerBody>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = body.map_err(json_rejection)?;
    let banner = body.into_input()?;

    let banner_id = state.banners.create_banner(&banner).await?;
    tracing::info!("Created banner {} with {} tag(s)", banner_id, banner.tag_ids.len());

    Ok(ApiResponse::created(json!({ "banner_id": banner_id })))
}

/// PATCH /banner/:id - replace content, flag and associations of a banner
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BannerBody>, JsonRejection>,
) -> ApiResult<Value> {
    let id = parse_positive("id", Some(id.as_str()))?;
    let Json(body) = body.map_err(json_rejection)?;
    let banner = body.into_input()?;

    state.banners.patch_banner(id, &banner).await?;
    tracing::info!("Patched banner {}", id);

    Ok(ApiResponse::success(json!({ "description": "OK" })))
}

/// DELETE /banner/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_positive("id", Some(id.as_str()))?;

    state.banners.delete_banner(id).await?;
    tracing::info!("Deleted banner {}", id);

    Ok(ApiResponse::no_content())
}
