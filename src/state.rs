use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::BannerStore;

/// Shared, read-only handles available to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub banners: Arc<dyn BannerStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(banners: Arc<dyn BannerStore>, tokens: TokenService) -> Self {
        Self {
            banners,
            tokens: Arc::new(tokens),
        }
    }
}
