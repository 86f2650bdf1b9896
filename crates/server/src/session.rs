// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token extraction for authenticated routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use bunte_liga_api::AuthenticatedActor;
use std::fmt;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::HttpError;

/// Extractor for the caller behind an `Authorization: Bearer <token>` header.
///
/// The token is resolved through the configured identity provider. Routes
/// that take this extractor reject anonymous requests with 401 before the
/// handler runs.
pub struct SessionActor(pub AuthenticatedActor);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let actor = state
            .identity
            .resolve(token.trim())
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        debug!(
            subject = %actor.subject,
            is_admin = actor.is_admin,
            team_id = ?actor.team_id,
            "Caller authenticated"
        );
        Ok(Self(actor))
    }
}

/// Why a request could not be authenticated.
#[derive(Debug)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidToken(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuthorizationHeader => write!(f, "Missing Authorization header"),
            Self::InvalidAuthorizationHeader => write!(
                f,
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            ),
            Self::InvalidToken(reason) => write!(f, "{reason}"),
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        HttpError::unauthenticated(self.to_string()).into_response()
    }
}
