//! Bearer token gates.
//!
//! Both middlewares read `Authorization: Bearer <token>`, verify it and insert
//! the caller's [`Identity`] into the request extensions, so handlers can take
//! `Extension<Identity>`.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::AppState;
use crate::{
    auth::Identity,
    errors::{Error, Result},
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies the request's token.
///
/// A missing header, a wrong scheme, a bad signature and an expired token are
/// all [`Error::Unauthorized`].
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity> {
    let token = bearer_token(headers).ok_or_else(|| {
        debug!("Request without bearer token");
        Error::Unauthorized
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        warn!("Rejected token: {}", e);
        Error::Unauthorized
    })?;

    Ok(Identity::from(&claims))
}

/// Requires any valid token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let identity = authenticate(&state, request.headers())?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Requires a valid admin token; other roles get [`Error::AdminOnly`].
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let identity = authenticate(&state, request.headers())?;
    if !identity.is_admin() {
        warn!("User {} tried to reach {}", identity.id, request.uri().path());
        return Err(Error::AdminOnly);
    }
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::auth::{Claims, TokenKeys};
    use axum::{
        Extension, Json, Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt; // For oneshot()

    const SECRET: &[u8] = b"test-secret-key";

    async fn whoami(Extension(identity): Extension<Identity>) -> Json<Identity> {
        Json(identity)
    }

    fn create_test_app() -> Router {
        let state = Arc::new(AppState {
            db: MockDatabase::new(DatabaseBackend::Sqlite).into_connection(),
            tokens: TokenKeys::new(SECRET, Duration::hours(1)),
        });

        let user_routes = Router::new()
            .route("/protected", get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
        let admin_routes = Router::new()
            .route("/admin", get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

        user_routes.merge(admin_routes).with_state(state)
    }

    fn token_for(identity: Identity) -> String {
        TokenKeys::new(SECRET, Duration::hours(1))
            .issue(identity)
            .unwrap()
    }

    async fn call(app: Router, uri: &str, auth: Option<String>) -> StatusCode {
        let mut request = Request::builder().uri(uri);
        if let Some(auth) = auth {
            request = request.header("Authorization", auth);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_valid_token_passes_identity() {
        let app = create_test_app();
        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", format!("Bearer {}", token_for(Identity::user(7))))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let identity: Identity = serde_json::from_slice(&body).unwrap();
        assert_eq!(identity, Identity::user(7));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_token() {
        assert_eq!(
            call(create_test_app(), "/protected", None).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(create_test_app(), "/protected", Some("Basic abc".to_string())).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(create_test_app(), "/protected", Some("Bearer garbage".to_string())).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let foreign = TokenKeys::new(b"another-secret", Duration::hours(1))
            .issue(Identity::admin(1))
            .unwrap();
        assert_eq!(
            call(create_test_app(), "/admin", Some(format!("Bearer {foreign}"))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_expired_token() {
        let keys = TokenKeys::new(SECRET, Duration::hours(1));
        let expired = keys
            .encode(&Claims::new(Identity::user(1), Duration::hours(-2)))
            .unwrap();
        assert_eq!(
            call(create_test_app(), "/protected", Some(format!("Bearer {expired}"))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let user = format!("Bearer {}", token_for(Identity::user(1)));
        let admin = format!("Bearer {}", token_for(Identity::admin(1)));

        assert_eq!(
            call(create_test_app(), "/admin", Some(user)).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            call(create_test_app(), "/admin", Some(admin)).await,
            StatusCode::OK
        );
        assert_eq!(
            call(create_test_app(), "/admin", None).await,
            StatusCode::UNAUTHORIZED
        );
    }
}
