//! Caller identity extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use boom_core::error::CoreError;
use boom_core::types::DbId;

use crate::auth::jwt::JwtConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Caller named by the `Authorization: Bearer <token>` header.
///
/// Rejects with 401 when the header is absent or the token does not verify.
/// Whether the user row still exists is left to the handler.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Unauthorized"))?;

        authenticate(header, &state.config.jwt)
    }
}

/// Caller identity for endpoints that also serve anonymous users.
///
/// A missing header yields `None`. So does a malformed or expired token:
/// it is logged and otherwise treated like no token at all.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeAuthUser(None));
        };

        let user = header
            .to_str()
            .map_err(|_| unauthorized("Authorization header is not valid UTF-8"))
            .and_then(|h| authenticate(h, &state.config.jwt));

        match user {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unusable credentials on optional-auth route");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.map(|u| u.user_id)
    }
}

fn authenticate(header: &str, jwt: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;

    let user_id = jwt.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        unauthorized("Invalid or expired token")
    })?;

    Ok(AuthUser { user_id })
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}
