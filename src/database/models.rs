use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Banner content plus its tag/feature associations, as written by create and patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerInput {
    pub tag_ids: Vec<i64>,
    pub feature_id: i64,
    pub content: Value,
    pub is_active: bool,
}

/// Optional filters for banner listing. `None` means unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BannerFilter {
    pub tag_id: Option<i64>,
    pub feature_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl BannerFilter {
    /// Zero counts as "not supplied", same as an absent parameter.
    pub fn new(tag_id: Option<i64>, feature_id: Option<i64>, limit: Option<i64>, offset: Option<i64>) -> Self {
        let supplied = |v: Option<i64>| v.filter(|n| *n > 0);
        Self {
            tag_id: supplied(tag_id),
            feature_id: supplied(feature_id),
            limit: supplied(limit),
            offset: supplied(offset),
        }
    }
}
