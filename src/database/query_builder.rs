use crate::database::models::BannerFilter;

/// SQL text plus positional arguments, `params[i]` binds to `$(i + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<i64>,
}

/// Builds the admin listing query from whichever filters were supplied.
///
/// Tag and feature filters match through the association table, so a banner
/// is listed once even when several of its rows match. Placeholders are
/// numbered in the order they are appended; the bound argument vector is
/// built in the same pass so the two cannot drift apart.
pub struct BannerListQuery {
    conditions: Vec<String>,
    tail: Vec<String>,
    params: Vec<i64>,
}

impl BannerListQuery {
    const SELECT: &'static str = "SELECT b.content FROM banners b";

    pub fn new() -> Self {
        Self {
            conditions: vec![],
            tail: vec![],
            params: vec![],
        }
    }

    pub fn from_filter(filter: &BannerFilter) -> Self {
        let mut query = Self::new();
        if let Some(tag_id) = filter.tag_id {
            query = query.tag_id(tag_id);
        }
        if let Some(feature_id) = filter.feature_id {
            query = query.feature_id(feature_id);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        query
    }

    pub fn tag_id(mut self, tag_id: i64) -> Self {
        let placeholder = self.push_param(tag_id);
        self.conditions.push(format!("btf.tag_id = {}", placeholder));
        self
    }

    pub fn feature_id(mut self, feature_id: i64) -> Self {
        let placeholder = self.push_param(feature_id);
        self.conditions.push(format!("btf.feature_id = {}", placeholder));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        let placeholder = self.push_param(limit);
        self.tail.push(format!("LIMIT {}", placeholder));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        let placeholder = self.push_param(offset);
        self.tail.push(format!("OFFSET {}", placeholder));
        self
    }

    fn push_param(&mut self, value: i64) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub fn build(self) -> SqlResult {
        let mut query = String::from(Self::SELECT);

        if !self.conditions.is_empty() {
            query.push_str(
                " WHERE EXISTS (SELECT 1 FROM banner_tag_feature btf WHERE btf.banner_id = b.id AND ",
            );
            query.push_str(&self.conditions.join(" AND "));
            query.push(')');
        }

        query.push_str(" ORDER BY b.id");

        // LIMIT must precede OFFSET in the final text whatever order they were added in.
        let mut tail = self.tail;
        tail.sort_by_key(|clause| !clause.starts_with("LIMIT"));
        for clause in tail {
            query.push(' ');
            query.push_str(&clause);
        }

        SqlResult {
            query,
            params: self.params,
        }
    }
}

impl Default for BannerListQuery {
    fn default() -> Self {
        Self::new()
    }
}
