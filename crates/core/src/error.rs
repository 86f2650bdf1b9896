// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{DomainError, ErrorKind};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The acting party is not allowed to perform the action.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// Who may perform it.
        required: String,
    },
}

impl CoreError {
    pub(crate) fn unauthorized(action: &str, required: &str) -> Self {
        Self::Unauthorized {
            action: action.to_string(),
            required: required.to_string(),
        }
    }

    /// The error kind, for mapping to transport status codes.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DomainViolation(err) => err.kind(),
            Self::Unauthorized { .. } => ErrorKind::Authorization,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Unauthorized { action, required } => {
                write!(f, "Not allowed to {action}: requires {required}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
