use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{self, TokenService};
use crate::config::AppConfig;
use crate::database::{BannerFilter, BannerInput, BannerStore, DatabaseError};
use crate::middleware::TOKEN_HEADER;
use crate::router;
use crate::state::AppState;

pub const TEST_SECRET: &[u8] = b"test-secret";

#[derive(Debug, Clone)]
struct StoredBanner {
    content: Value,
    is_active: bool,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    banners: BTreeMap<i64, StoredBanner>,
    // (banner_id, tag_id, feature_id)
    associations: Vec<(i64, i64, i64)>,
}

/// In-memory stand-in for the PostgreSQL repository
#[derive(Default)]
pub struct MemoryBannerStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryBannerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails as if the database were unreachable
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn association_count(&self, banner_id: i64) -> usize {
        let tables = self.tables.lock().unwrap();
        tables.associations.iter().filter(|(b, _, _)| *b == banner_id).count()
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl BannerStore for MemoryBannerStore {
    async fn user_banner(&self, tag_id: i64, feature_id: i64, is_admin: bool) -> Result<Value, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        tables
            .banners
            .iter()
            .filter(|(id, banner)| {
                (is_admin || banner.is_active)
                    && tables
                        .associations
                        .iter()
                        .any(|(b, t, f)| b == *id && *t == tag_id && *f == feature_id)
            })
            .map(|(_, banner)| banner.content.clone())
            .next()
            .ok_or_else(|| DatabaseError::NotFound(format!("banner for tag {} and feature {}", tag_id, feature_id)))
    }

    async fn list_banners(&self, filter: &BannerFilter) -> Result<Vec<Value>, DatabaseError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let matching = tables.banners.iter().filter(|(id, _)| {
            if filter.tag_id.is_none() && filter.feature_id.is_none() {
                return true;
            }
            tables.associations.iter().any(|(b, t, f)| {
                b == *id
                    && filter.tag_id.map_or(true, |tag| tag == *t)
                    && filter.feature_id.map_or(true, |feature| feature == *f)
            })
        });

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);
        Ok(matching
            .skip(offset)
            .take(limit)
            .map(|(_, banner)| banner.content.clone())
            .collect())
    }

    async fn create_banner(&self, banner: &BannerInput) -> Result<i64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        tables.banners.insert(
            id,
            StoredBanner {
                content: banner.content.clone(),
                is_active: banner.is_active,
            },
        );
        for tag_id in &banner.tag_ids {
            tables.associations.push((id, *tag_id, banner.feature_id));
        }
        Ok(id)
    }

    async fn patch_banner(&self, id: i64, banner: &BannerInput) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .banners
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("banner {}", id)))?;
        stored.content = banner.content.clone();
        stored.is_active = banner.is_active;

        tables.associations.retain(|(b, _, _)| *b != id);
        for tag_id in &banner.tag_ids {
            tables.associations.push((id, *tag_id, banner.feature_id));
        }
        Ok(())
    }

    async fn delete_banner(&self, id: i64) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.associations.retain(|(b, _, _)| *b != id);
        tables
            .banners
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("banner {}", id)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}

/// Router over a fresh in-memory store, plus a handle to that store
pub fn test_app() -> (Router, Arc<MemoryBannerStore>) {
    let store = Arc::new(MemoryBannerStore::new());
    let state = AppState::new(store.clone(), TokenService::new(TEST_SECRET, 24));
    let mut config = AppConfig::default();
    config.api.enable_request_logging = false;
    (router::app(state, &config), store)
}

pub fn token_for(role: &str) -> String {
    auth::issue(role, TEST_SECRET).unwrap()
}

/// Sends one request through the router, returning status and parsed body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
