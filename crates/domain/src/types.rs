// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a database-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a season.
    SeasonId
);
entity_id!(
    /// Identifier of a team.
    TeamId
);
entity_id!(
    /// Identifier of a pitch.
    PitchId
);
entity_id!(
    /// Identifier of a booking (a pitch slot).
    BookingId
);
entity_id!(
    /// Identifier of a match result.
    ResultId
);

/// Contact fields of an anonymous slot requester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Returns true if no contact field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Aggregated statistics of a team across all seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllTimeStats {
    pub games: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl AllTimeStats {
    /// Adds one counted game. Totals saturate instead of wrapping.
    pub const fn record(&mut self, scored: u32, conceded: u32, points: u32) {
        self.games = self.games.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.points = self.points.saturating_add(points);
    }
}

/// A team taking part in the league.
///
/// Teams are referenced everywhere else by [`TeamId`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// `None` until persisted.
    pub team_id: Option<TeamId>,
    pub name: String,
    pub short_name: Option<String>,
    pub colors: Option<String>,
    pub logo_ref: Option<String>,
    pub contact: ContactInfo,
    pub all_time: AllTimeStats,
}

impl Team {
    /// Creates a new, unsaved team with empty statistics.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            team_id: None,
            name: name.trim().to_string(),
            short_name: None,
            colors: None,
            logo_ref: None,
            contact: ContactInfo::default(),
            all_time: AllTimeStats::default(),
        }
    }

    /// Builder-style helper used when loading from storage.
    #[must_use]
    pub const fn with_id(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// A physical pitch on which slots are booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pitch {
    /// `None` until persisted.
    pub pitch_id: Option<PitchId>,
    pub name: String,
    pub address: Option<String>,
    /// Free-form surface/venue type, e.g. "Kunstrasen".
    pub pitch_type: Option<String>,
    /// Team that owns (and usually offers) the pitch.
    pub owner_team_id: Option<TeamId>,
    pub is_verified: bool,
    /// Maximum number of slots per week, if limited.
    pub weekly_limit: Option<u32>,
    pub allow_friendly_auto_release: bool,
    pub image_ref: Option<String>,
    pub is_archived: bool,
}

impl Pitch {
    /// Creates a new, unsaved and unverified pitch.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            pitch_id: None,
            name: name.trim().to_string(),
            address: None,
            pitch_type: None,
            owner_team_id: None,
            is_verified: false,
            weekly_limit: None,
            allow_friendly_auto_release: true,
            image_ref: None,
            is_archived: false,
        }
    }

    /// Builder-style helper used when loading from storage.
    #[must_use]
    pub const fn with_id(mut self, pitch_id: PitchId) -> Self {
        self.pitch_id = Some(pitch_id);
        self
    }
}
