use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::auth::JwtManager;
use crate::infrastructure::config::Config;

/// Caller identity injected into request extensions when a valid token is present
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Raw `sub` claim; format checks belong to the consumers
    pub user_id: String,
}

/// Optional authentication middleware.
///
/// Never rejects a request: without a usable bearer token the request simply
/// continues without an `AuthUser` extension.
pub async fn optional_auth_middleware(
    State(config): State<Arc<Config>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    if let Some(token) = token {
        let jwt_manager = JwtManager::new(config.jwt_secret.clone());
        match jwt_manager.validate_token(&token) {
            Ok(claims) => {
                request
                    .extensions_mut()
                    .insert(AuthUser { user_id: claims.sub });
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable bearer token");
            }
        }
    }

    next.run(request).await
}
