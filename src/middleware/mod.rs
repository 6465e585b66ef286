pub mod auth;
pub mod response;

pub use auth::{require_admin, require_authentication, AuthUser, TOKEN_HEADER};
pub use response::{json_content_type, ApiResponse, ApiResult};
