// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bunte_liga::CoreError;
use bunte_liga_domain::DomainError;
use bunte_liga_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is not the party allowed to perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The entity's current state does not permit the operation.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A league rule forbids the operation.
    EligibilityViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The error kind label used in response bodies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "authentication",
            Self::Unauthorized { .. } => "authorization",
            Self::InvalidInput { .. } => "validation",
            Self::Conflict { .. } => "conflict",
            Self::EligibilityViolation { .. } => "eligibility",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Internal { .. } => "internal",
        }
    }

    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => write!(f, "Conflict ({rule}): {message}"),
            Self::EligibilityViolation { rule, message } => {
                write!(f, "Not eligible ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn conflict(rule: &str, message: String) -> ApiError {
    ApiError::Conflict {
        rule: rule.to_string(),
        message,
    }
}

fn ineligible(rule: &str, message: String) -> ApiError {
    ApiError::EligibilityViolation {
        rule: rule.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message = err.to_string();
    match err {
        DomainError::InvalidName { field, .. } | DomainError::InvalidSeasonSetting { field, .. } => {
            ApiError::invalid_input(field, message)
        }
        DomainError::SameTeam(_) => ApiError::invalid_input("away_team_id", message),
        DomainError::InvalidDuration { .. } => ApiError::invalid_input("duration_minutes", message),
        DomainError::InvalidScore { .. } => ApiError::invalid_input("home_score", message),
        DomainError::InvalidStatus { .. } => ApiError::invalid_input("status", message),
        DomainError::InvalidPlayMode(_) => ApiError::invalid_input("play_mode", message),
        DomainError::InvalidRankingCriterion(_) => {
            ApiError::invalid_input("ranking_criteria", message)
        }
        DomainError::InvalidTimestamp { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::invalid_input("timestamp", message)
        }
        DomainError::InvalidSchedule { .. } => ApiError::invalid_input("template", message),
        DomainError::MissingTeams { .. } => ApiError::invalid_input("home_team_id", message),
        DomainError::InvalidBookingTransition { .. }
        | DomainError::InvalidResultTransition { .. }
        | DomainError::InvalidSeasonTransition { .. } => conflict("status_transition", message),
        DomainError::SlotNotAvailable { .. } => conflict("slot_available", message),
        DomainError::SlotCollision { .. } => conflict("no_overlap", message),
        DomainError::ResultAlreadyExists { .. } => conflict("one_active_result", message),
        DomainError::BookingNotConfirmed { .. } => conflict("booking_confirmed", message),
        DomainError::PitchArchived(_) => conflict("pitch_active", message),
        DomainError::DuplicateTeamRegistration { .. } => {
            conflict("unique_registration", message)
        }
        DomainError::RematchLimitReached { .. } => ineligible("rematch_limit", message),
        DomainError::FriendlyWindowNotOpen { .. } => ineligible("friendly_release", message),
        DomainError::FriendlySlotForLeagueGame { .. } => ineligible("friendly_slot", message),
        DomainError::SlotInPast { .. } => ineligible("slot_in_future", message),
        DomainError::MatchNotStarted { .. } => ineligible("match_started", message),
        DomainError::TeamNotActiveInSeason { .. } => ineligible("team_active", message),
        DomainError::SeasonNotOpen { .. } => ineligible("season_open", message),
        DomainError::SeasonNotFound(_) | DomainError::NoCurrentSeason => {
            not_found("Season", message)
        }
        DomainError::TeamNotFound(_) => not_found("Team", message),
        DomainError::PitchNotFound(_) => not_found("Pitch", message),
        DomainError::BookingNotFound(_) => not_found("Booking", message),
        DomainError::ResultNotFound(_) => not_found("Result", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthorized { action, required } => ApiError::Unauthorized {
            action,
            required_role: required,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lost compare-and-swap races and re-checked invariants become conflicts;
/// storage failures are logged and reported as internal errors.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::StaleTransition { .. } => conflict("concurrent_update", err.to_string()),
        PersistenceError::SlotCollision { .. } => conflict("no_overlap", err.to_string()),
        PersistenceError::DuplicateResult { .. } => {
            conflict("one_active_result", err.to_string())
        }
        PersistenceError::RuleViolation(domain) => translate_domain_error(domain),
        PersistenceError::NotFound(message) => not_found("Resource", message),
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
