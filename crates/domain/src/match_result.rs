// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match results and their confirmation lifecycle.

use crate::error::DomainError;
use crate::types::{BookingId, ResultId, SeasonId, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Points awarded for a win.
pub const POINTS_WIN: u32 = 2;
/// Points awarded for a draw.
pub const POINTS_DRAW: u32 = 1;
/// Points awarded for a loss.
pub const POINTS_LOSS: u32 = 0;

/// Result status domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// Reported by one team, awaiting the other.
    Pending,
    /// Accepted by the opposing team.
    Confirmed,
    /// Rejected by the opposing team.
    Rejected,
    /// Withdrawn by the reporter.
    Withdrawn,
}

impl ResultStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Pending and confirmed results block re-reporting and count as fixtures.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Negotiated transitions: `pending → confirmed | rejected | withdrawn`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Rejected | Self::Withdrawn)
        )
    }
}

impl FromStr for ResultStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::InvalidStatus {
                entity: "result",
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a match from the home team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    #[must_use]
    pub const fn from_scores(home_score: u32, away_score: u32) -> Self {
        if home_score > away_score {
            Self::HomeWin
        } else if away_score > home_score {
            Self::AwayWin
        } else {
            Self::Draw
        }
    }

    /// Points for `(home, away)`.
    #[must_use]
    pub const fn points(&self) -> (u32, u32) {
        match self {
            Self::HomeWin => (POINTS_WIN, POINTS_LOSS),
            Self::AwayWin => (POINTS_LOSS, POINTS_WIN),
            Self::Draw => (POINTS_DRAW, POINTS_DRAW),
        }
    }
}

/// A reported match result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// `None` until persisted.
    pub result_id: Option<ResultId>,
    pub season_id: SeasonId,
    /// Admin-created results may exist without a booking.
    pub booking_id: Option<BookingId>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub status: ResultStatus,
    pub reported_by: Option<TeamId>,
    pub played_at: OffsetDateTime,
    pub is_valid: bool,
    /// Carried over from the booking; friendly results never count.
    pub is_friendly: bool,
    pub reported_at: OffsetDateTime,
    /// Last reject reason.
    pub status_reason: Option<String>,
}

impl MatchResult {
    #[must_use]
    pub const fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.home_score, self.away_score)
    }

    /// Whether the result counts toward standings.
    #[must_use]
    pub fn counts_for_standings(&self) -> bool {
        self.status == ResultStatus::Confirmed && self.is_valid && !self.is_friendly
    }

    /// The team on the result that did not report it.
    #[must_use]
    pub fn opposing_team(&self) -> Option<TeamId> {
        match self.reported_by {
            Some(reporter) if reporter == self.home_team_id => Some(self.away_team_id),
            Some(reporter) if reporter == self.away_team_id => Some(self.home_team_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Validates a negotiated transition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResultTransition` if not permitted.
    pub const fn validate_transition(&self, target: ResultStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidResultTransition {
                result_id: self.result_id,
                from: self.status,
                to: target,
            })
        }
    }
}
