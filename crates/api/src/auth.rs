// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Authentication itself is delegated: a bearer token is resolved to an
//! identity by an [`IdentityProvider`]. The shipped provider reads a static
//! token table from JSON.

use std::collections::HashMap;
use std::path::Path;

use bunte_liga::ActingParty;
use bunte_liga_audit::Actor;
use bunte_liga_domain::TeamId;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::AuthError;

/// An authenticated caller.
///
/// A caller is an admin, a representative of exactly one team, or both.
/// Admin rights take precedence when deciding the acting party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Stable identifier of the caller at the identity provider.
    pub subject: String,
    /// Whether the caller holds league admin rights.
    pub is_admin: bool,
    /// The team the caller represents, if any.
    pub team_id: Option<TeamId>,
}

impl AuthenticatedActor {
    /// Creates an admin caller.
    #[must_use]
    pub const fn admin(subject: String) -> Self {
        Self {
            subject,
            is_admin: true,
            team_id: None,
        }
    }

    /// Creates a team representative.
    #[must_use]
    pub const fn team(subject: String, team_id: TeamId) -> Self {
        Self {
            subject,
            is_admin: false,
            team_id: Some(team_id),
        }
    }

    /// The party this caller acts as in state transitions.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the caller is neither an admin
    /// nor bound to a team.
    pub fn acting_party(&self) -> Result<ActingParty, AuthError> {
        if self.is_admin {
            return Ok(ActingParty::Admin);
        }
        self.team_id
            .map(ActingParty::Team)
            .ok_or_else(|| AuthError::Unauthorized {
                action: String::from("act in the league"),
                required_role: String::from("a team or an admin"),
            })
    }

    /// Converts this caller into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        match (self.is_admin, self.team_id) {
            (false, Some(team_id)) => Actor::team(self.subject.clone(), team_id),
            _ => Actor::admin(self.subject.clone()),
        }
    }
}

/// Resolves bearer tokens to callers.
pub trait IdentityProvider: Send + Sync {
    /// Resolves a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` for unknown tokens.
    fn resolve(&self, token: &str) -> Result<AuthenticatedActor, AuthError>;
}

/// Errors while loading a token table.
#[derive(Debug, Error)]
pub enum IdentityFileError {
    /// The file could not be read.
    #[error("Failed to read identity file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not a valid token table.
    #[error("Failed to parse identity file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry grants neither admin rights nor a team.
    #[error("Identity '{subject}' is neither an admin nor bound to a team")]
    Unbound { subject: String },

    /// An entry has an empty token.
    #[error("Identity '{subject}' has an empty token")]
    EmptyToken { subject: String },
}

#[derive(Debug, Clone, Deserialize)]
struct IdentityRecord {
    subject: String,
    #[serde(default)]
    is_admin: bool,
    #[serde(default)]
    team_id: Option<TeamId>,
}

/// Identity provider backed by a fixed token table.
///
/// The JSON format maps each token to its identity:
///
/// ```json
/// {
///   "s3cr3t": { "subject": "liga-admin", "is_admin": true },
///   "t0k3n": { "subject": "captain-blau", "team_id": 7 }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIdentityProvider {
    tokens: HashMap<String, AuthenticatedActor>,
}

impl StaticTokenIdentityProvider {
    /// A provider that knows no tokens. Only public routes are usable.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a token.
    #[must_use]
    pub fn with_token(mut self, token: &str, actor: AuthenticatedActor) -> Self {
        self.tokens.insert(token.to_string(), actor);
        self
    }

    /// Parses a token table.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a token is empty, or an
    /// identity has no role.
    pub fn from_json(json: &str) -> Result<Self, IdentityFileError> {
        let records: HashMap<String, IdentityRecord> = serde_json::from_str(json)?;
        let mut tokens = HashMap::with_capacity(records.len());
        for (token, record) in records {
            if token.trim().is_empty() {
                return Err(IdentityFileError::EmptyToken {
                    subject: record.subject,
                });
            }
            if !record.is_admin && record.team_id.is_none() {
                return Err(IdentityFileError::Unbound {
                    subject: record.subject,
                });
            }
            tokens.insert(
                token,
                AuthenticatedActor {
                    subject: record.subject,
                    is_admin: record.is_admin,
                    team_id: record.team_id,
                },
            );
        }
        debug!(count = tokens.len(), "Loaded identity tokens");
        Ok(Self { tokens })
    }

    /// Reads and parses a token table file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IdentityFileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of known tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityProvider for StaticTokenIdentityProvider {
    fn resolve(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
        self.tokens.get(token).cloned().ok_or_else(|| {
            warn!("Rejected unknown bearer token");
            AuthError::AuthenticationFailed {
                reason: String::from("Unknown or expired token"),
            }
        })
    }
}

/// Authorization checks made before any state is loaded.
///
/// The core re-checks the acting party on every transition; these checks
/// only reject obviously unauthorized calls early.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Requires admin rights.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin {
            Ok(())
        } else {
            warn!(subject = %actor.subject, action, "Admin action refused");
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("an admin"),
            })
        }
    }

    /// Requires the caller to be an admin or a representative of `team_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller represents another team or none.
    pub fn authorize_team_access(
        actor: &AuthenticatedActor,
        team_id: TeamId,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.is_admin || actor.team_id == Some(team_id) {
            Ok(())
        } else {
            warn!(subject = %actor.subject, action, %team_id, "Team action refused");
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: format!("a representative of team {team_id} or an admin"),
            })
        }
    }

    /// Resolves the team a team-scoped read is for.
    ///
    /// Team callers get their own team; admins must name one.
    ///
    /// # Errors
    ///
    /// Returns an error if no team can be determined or a team caller asks
    /// for another team.
    pub fn resolve_team_scope(
        actor: &AuthenticatedActor,
        requested: Option<TeamId>,
        action: &str,
    ) -> Result<TeamId, AuthError> {
        match (requested, actor.team_id) {
            (Some(team_id), _) => {
                Self::authorize_team_access(actor, team_id, action)?;
                Ok(team_id)
            }
            (None, Some(own)) => Ok(own),
            (None, None) => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("a team representative (admins must name a team)"),
            }),
        }
    }
}
