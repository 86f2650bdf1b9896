// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking (pitch slot) status and lifecycle table.
//!
//! A booking is a time slot on a pitch. It starts `available`, is requested
//! by a home team against an away team, and is confirmed or denied by the
//! away team. Admins may block slots or override any status.

use crate::collision::TimeInterval;
use crate::error::DomainError;
use crate::types::{BookingId, ContactInfo, PitchId, SeasonId, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Longest permitted slot.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Booking status domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Open for requests, no teams attached.
    Available,
    /// Requested by the home team, waiting for the away team.
    PendingAwayConfirm,
    /// Both teams agreed; the match takes place.
    Confirmed,
    /// A confirmed match that was withdrawn by an admin.
    Cancelled,
    /// Closed by an admin.
    Blocked,
}

impl BookingStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Available,
        Self::PendingAwayConfirm,
        Self::Confirmed,
        Self::Cancelled,
        Self::Blocked,
    ];

    /// Returns the string representation used in storage and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::PendingAwayConfirm => "pending_away_confirm",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Blocked => "blocked",
        }
    }

    /// Pending and confirmed bookings occupy the pitch.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::PendingAwayConfirm | Self::Confirmed)
    }

    /// Whether a booking in this status must carry both team ids.
    #[must_use]
    pub const fn requires_teams(&self) -> bool {
        self.is_active()
    }

    /// Negotiated (non-override) transitions.
    ///
    /// - available → `pending_away_confirm`
    /// - `pending_away_confirm` → confirmed | available
    /// - confirmed → available | cancelled
    /// - any except blocked → blocked
    /// - blocked → available
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Available, Self::PendingAwayConfirm)
                | (Self::PendingAwayConfirm, Self::Confirmed | Self::Available)
                | (Self::Confirmed, Self::Available | Self::Cancelled)
                | (
                    Self::Available | Self::PendingAwayConfirm | Self::Confirmed | Self::Cancelled,
                    Self::Blocked
                )
                | (Self::Blocked, Self::Available)
        )
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "pending_away_confirm" => Ok(Self::PendingAwayConfirm),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "blocked" => Ok(Self::Blocked),
            _ => Err(DomainError::InvalidStatus {
                entity: "booking",
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A slot on a pitch, possibly negotiated into a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// `None` until persisted.
    pub booking_id: Option<BookingId>,
    pub season_id: SeasonId,
    pub pitch_id: PitchId,
    pub starts_at: OffsetDateTime,
    pub duration_minutes: u32,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub is_friendly: bool,
    pub status: BookingStatus,
    pub created_at: OffsetDateTime,
    pub requested_at: Option<OffsetDateTime>,
    /// Last deny/cancel reason.
    pub status_reason: Option<String>,
    pub contact: ContactInfo,
}

impl Booking {
    /// Creates an unsaved `available` slot without teams.
    #[must_use]
    pub fn new_slot(
        season_id: SeasonId,
        pitch_id: PitchId,
        starts_at: OffsetDateTime,
        duration_minutes: u32,
        is_friendly: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            booking_id: None,
            season_id,
            pitch_id,
            starts_at,
            duration_minutes,
            home_team_id: None,
            away_team_id: None,
            is_friendly,
            status: BookingStatus::Available,
            created_at,
            requested_at: None,
            status_reason: None,
            contact: ContactInfo::default(),
        }
    }

    #[must_use]
    pub fn ends_at(&self) -> OffsetDateTime {
        self.interval().end
    }

    /// The half-open occupation interval `[start, start + duration)`.
    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.starts_at, self.duration_minutes)
    }

    #[must_use]
    pub fn has_started(&self, now: OffsetDateTime) -> bool {
        self.starts_at <= now
    }

    /// Both team ids, if set.
    #[must_use]
    pub const fn teams(&self) -> Option<(TeamId, TeamId)> {
        match (self.home_team_id, self.away_team_id) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// Whether the team plays in this booking.
    #[must_use]
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == Some(team_id) || self.away_team_id == Some(team_id)
    }

    /// Drops both team ids and the request timestamp.
    pub const fn clear_teams(&mut self) {
        self.home_team_id = None;
        self.away_team_id = None;
        self.requested_at = None;
    }

    /// Checks the status/teams invariant.
    ///
    /// # Errors
    ///
    /// - `DomainError::MissingTeams` if an active booking lacks a team
    /// - `DomainError::SameTeam` if home and away are equal
    /// - `DomainError::InvalidStatus` if an inactive booking carries teams
    pub fn check_team_invariant(&self) -> Result<(), DomainError> {
        if self.status.requires_teams() {
            let (home, away) = self.teams().ok_or(DomainError::MissingTeams {
                booking_id: self.booking_id,
            })?;
            if home == away {
                return Err(DomainError::SameTeam(home));
            }
        } else if self.home_team_id.is_some() || self.away_team_id.is_some() {
            return Err(DomainError::InvalidStatus {
                entity: "booking",
                status: format!("{} with teams attached", self.status),
            });
        }
        Ok(())
    }
}
