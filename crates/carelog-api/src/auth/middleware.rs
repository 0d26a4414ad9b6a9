//! Bearer-token authentication middleware.
//!
//! Verifies a JWT issued by the external auth service, resolves the user it
//! names, and stores a [`CurrentUser`] in request extensions for handlers
//! and extractors downstream.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use carelog_core::AppError;
use carelog_db::UserRepository;
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::sync::Arc;

use crate::auth::models::{CurrentUser, JwtClaims};
use crate::error::HttpAppError;

/// State for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub users: UserRepository,
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(auth_state.jwt_secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!(error = %e, "JWT validation failed");
            return HttpAppError(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ))
            .into_response();
        }
    };

    // The token may outlive the account; resolve the user on every request.
    let user = match auth_state.users.get_by_id(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(user_id = %claims.sub, "Token subject no longer exists");
            return HttpAppError(AppError::Unauthorized("Unknown user".to_string()))
                .into_response();
        }
        Err(e) => {
            return HttpAppError(e).into_response();
        }
    };

    request.extensions_mut().insert(CurrentUser {
        user_id: user.id,
        email: user.email,
        name: user.name,
    });

    next.run(request).await
}
