use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::Deserialize;
use serde_json::Value;

use crate::database::BannerInput;
use crate::error::ApiError;

/// Required query/path id: a strictly positive integer.
pub fn parse_positive(name: &str, raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Missing required parameter: {}", name)))?;

    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::bad_request(format!("Parameter {} must be a positive integer", name))),
    }
}

/// Optional numeric filter. Absent or empty is `None`; negatives are rejected.
pub fn parse_optional(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(ApiError::bad_request(format!("Parameter {} must be a non-negative integer", name))),
    }
}

/// Lenient boolean: only the exact value `true` is true, anything else is false.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

pub fn query_rejection(rejection: QueryRejection) -> ApiError {
    tracing::debug!("Rejected query string: {}", rejection);
    ApiError::bad_request("Invalid query parameters")
}

pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection);
    ApiError::invalid_json("Invalid request body")
}

/// Body accepted by banner create and patch
#[derive(Debug, Deserialize)]
pub struct BannerBody {
    pub tag_ids: Vec<i64>,
    pub feature_id: i64,
    pub content: Value,
    pub is_active: bool,
}

impl BannerBody {
    /// Checks ids and collapses repeated tag ids, keeping first-seen order.
    pub fn into_input(self) -> Result<BannerInput, ApiError> {
        if self.feature_id <= 0 {
            return Err(ApiError::bad_request("feature_id must be a positive integer"));
        }
        if self.tag_ids.iter().any(|id| *id <= 0) {
            return Err(ApiError::bad_request("tag_ids must contain positive integers"));
        }
        if self.content.is_null() {
            return Err(ApiError::bad_request("content must not be null"));
        }

        let mut tag_ids = Vec::with_capacity(self.tag_ids.len());
        for id in self.tag_ids {
            if !tag_ids.contains(&id) {
                tag_ids.push(id);
            }
        }

        Ok(BannerInput {
            tag_ids,
            feature_id: self.feature_id,
            content: self.content,
            is_active: self.is_active,
        })
    }
}
