// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{
    BookingStatus, ContactInfo, PitchId, PlayMode, RankingCriterion, ResultStatus, SeasonStatus,
    TeamId,
};
use time::OffsetDateTime;

/// The identity an operation is performed as.
///
/// Passed explicitly to every transition; there is no ambient session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActingParty {
    /// A representative of the given team.
    Team(TeamId),
    /// A league administrator.
    Admin,
}

impl ActingParty {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The represented team, if acting for one.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        match self {
            Self::Team(team_id) => Some(*team_id),
            Self::Admin => None,
        }
    }

    /// True for admins and for the given team.
    #[must_use]
    pub fn is_admin_or(&self, team_id: Option<TeamId>) -> bool {
        match self {
            Self::Admin => true,
            Self::Team(own) => team_id == Some(*own),
        }
    }
}

/// Answer of the away team (or an admin) to a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Confirm,
    Deny,
}

/// Answer of the opposing team to a reported result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultDecision {
    Confirm,
    Reject,
}

/// What happens to a confirmed booking when it is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelDisposition {
    /// The slot becomes available again.
    #[default]
    Release,
    /// The match is withdrawn and the slot stays closed (admin only).
    Withdraw,
}

/// Intent to change a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCommand {
    /// Request an available slot for a match.
    Request {
        home_team_id: TeamId,
        away_team_id: TeamId,
        is_friendly: bool,
        contact: Option<ContactInfo>,
    },
    /// Confirm or deny a pending request.
    Respond {
        decision: RequestDecision,
        reason: Option<String>,
    },
    /// Cancel a pending request or a confirmed match.
    Cancel {
        reason: Option<String>,
        disposition: CancelDisposition,
    },
    /// Close a slot.
    Block { reason: Option<String> },
    /// Reopen a blocked slot.
    Unblock,
    /// Change the slot's time, place or flags.
    UpdateSlot {
        pitch_id: Option<PitchId>,
        starts_at: Option<OffsetDateTime>,
        duration_minutes: Option<u32>,
        is_friendly: Option<bool>,
        contact: Option<ContactInfo>,
    },
    /// Set any status, bypassing the negotiation table.
    AdminOverride {
        status: BookingStatus,
        home_team_id: Option<TeamId>,
        away_team_id: Option<TeamId>,
        is_friendly: Option<bool>,
        reason: Option<String>,
    },
}

/// Intent to change an existing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCommand {
    /// Confirm or reject a pending result.
    Respond {
        decision: ResultDecision,
        reason: Option<String>,
    },
    /// Withdraw one's own pending report.
    CancelReport,
    /// Unconstrained correction by an admin.
    AdminUpdate {
        home_score: Option<u32>,
        away_score: Option<u32>,
        status: Option<ResultStatus>,
        is_valid: Option<bool>,
        reason: Option<String>,
    },
}

/// Intent to change a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonCommand {
    /// Move one step forward in the lifecycle.
    Transition { target: SeasonStatus },
    /// Make this the current season.
    SetCurrent,
    RegisterTeam { team_id: TeamId },
    WithdrawTeam { team_id: TeamId },
    /// Change league settings.
    UpdateSettings {
        name: Option<String>,
        play_mode: Option<PlayMode>,
        ranking_criteria: Option<Vec<RankingCriterion>>,
        request_expiry_days: Option<u32>,
        friendly_games_release_hours: Option<u32>,
    },
}
