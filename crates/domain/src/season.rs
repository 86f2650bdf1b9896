// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seasons, their lifecycle and league settings.
//!
//! Season transitions are admin-driven and forward-only:
//! `planning → active → finished → archived`.

use crate::error::DomainError;
use crate::types::{SeasonId, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of days a booking request stays open.
pub const DEFAULT_REQUEST_EXPIRY_DAYS: u32 = 7;

/// Default number of hours before kick-off at which league slots open for friendlies.
pub const DEFAULT_FRIENDLY_RELEASE_HOURS: u32 = 48;

/// Lifecycle state of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    /// Created, teams and slots are being set up.
    #[default]
    Planning,
    /// Matches are being played.
    Active,
    /// All matches played, table is final.
    Finished,
    /// Historic, read-only.
    Archived,
}

impl SeasonStatus {
    /// Returns the string representation used in storage and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Archived => "archived",
        }
    }

    /// Only single forward steps are permitted.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Active)
                | (Self::Active, Self::Finished)
                | (Self::Finished, Self::Archived)
        )
    }

    /// Whether slots may be created and requested in this state.
    #[must_use]
    pub const fn accepts_bookings(&self) -> bool {
        matches!(self, Self::Planning | Self::Active)
    }

    /// Whether results may be reported in this state.
    #[must_use]
    pub const fn accepts_results(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for SeasonStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidStatus {
                entity: "season",
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often each pair of teams meets in league play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    #[default]
    SingleRoundRobin,
    DoubleRoundRobin,
}

impl PlayMode {
    /// Maximum number of league fixtures between the same pair in one season.
    #[must_use]
    pub const fn max_matches(&self) -> u32 {
        match self {
            Self::SingleRoundRobin => 1,
            Self::DoubleRoundRobin => 2,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleRoundRobin => "single_round_robin",
            Self::DoubleRoundRobin => "double_round_robin",
        }
    }
}

impl FromStr for PlayMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_round_robin" => Ok(Self::SingleRoundRobin),
            "double_round_robin" => Ok(Self::DoubleRoundRobin),
            _ => Err(DomainError::InvalidPlayMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single standings sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingCriterion {
    Points,
    GoalDifference,
    GoalsScored,
    HeadToHead,
}

impl RankingCriterion {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::GoalDifference => "goal_difference",
            Self::GoalsScored => "goals_scored",
            Self::HeadToHead => "head_to_head",
        }
    }

    /// The ordering used when a season does not configure its own.
    #[must_use]
    pub fn default_order() -> Vec<Self> {
        vec![Self::Points, Self::GoalDifference, Self::GoalsScored]
    }

    /// Parses a comma separated list as stored in the database.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRankingCriterion` for unknown entries.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, DomainError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::from_str)
            .collect()
    }

    /// Inverse of [`RankingCriterion::parse_list`].
    #[must_use]
    pub fn join_list(criteria: &[Self]) -> String {
        criteria
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for RankingCriterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(Self::Points),
            "goal_difference" => Ok(Self::GoalDifference),
            "goals_scored" => Ok(Self::GoalsScored),
            "head_to_head" => Ok(Self::HeadToHead),
            _ => Err(DomainError::InvalidRankingCriterion(s.to_string())),
        }
    }
}

/// Whether a registered team still takes part in the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Active,
    Withdrawn,
}

impl RegistrationStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::InvalidStatus {
                entity: "registration",
                status: s.to_string(),
            }),
        }
    }
}

/// A team's registration to a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTeam {
    pub team_id: TeamId,
    pub status: RegistrationStatus,
}

/// A league season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// `None` until persisted.
    pub season_id: Option<SeasonId>,
    pub name: String,
    pub year: u16,
    pub status: SeasonStatus,
    pub is_current: bool,
    pub play_mode: PlayMode,
    pub ranking_criteria: Vec<RankingCriterion>,
    pub request_expiry_days: u32,
    pub friendly_games_release_hours: u32,
    pub teams: Vec<SeasonTeam>,
}

impl Season {
    /// Creates a new season in `planning` with the league defaults.
    #[must_use]
    pub fn new(name: &str, year: u16, play_mode: PlayMode) -> Self {
        Self {
            season_id: None,
            name: name.trim().to_string(),
            year,
            status: SeasonStatus::Planning,
            is_current: false,
            play_mode,
            ranking_criteria: RankingCriterion::default_order(),
            request_expiry_days: DEFAULT_REQUEST_EXPIRY_DAYS,
            friendly_games_release_hours: DEFAULT_FRIENDLY_RELEASE_HOURS,
            teams: Vec::new(),
        }
    }

    /// Builder-style helper used when loading from storage.
    #[must_use]
    pub const fn with_id(mut self, season_id: SeasonId) -> Self {
        self.season_id = Some(season_id);
        self
    }

    /// Ids of teams with an active registration.
    #[must_use]
    pub fn active_team_ids(&self) -> Vec<TeamId> {
        self.teams
            .iter()
            .filter(|t| t.status == RegistrationStatus::Active)
            .map(|t| t.team_id)
            .collect()
    }

    #[must_use]
    pub fn is_team_active(&self, team_id: TeamId) -> bool {
        self.teams
            .iter()
            .any(|t| t.team_id == team_id && t.status == RegistrationStatus::Active)
    }

    /// Ensures the team takes part in this season.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TeamNotActiveInSeason` otherwise.
    pub fn ensure_team_active(&self, team_id: TeamId) -> Result<(), DomainError> {
        if self.is_team_active(team_id) {
            Ok(())
        } else {
            Err(DomainError::TeamNotActiveInSeason {
                season_id: self.season_id,
                team_id,
            })
        }
    }

    /// Ensures slots may be created or requested.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SeasonNotOpen` if the season is finished or archived.
    pub const fn ensure_accepts_bookings(&self) -> Result<(), DomainError> {
        if self.status.accepts_bookings() {
            Ok(())
        } else {
            Err(DomainError::SeasonNotOpen {
                season_id: self.season_id,
                status: self.status,
            })
        }
    }

    /// Ensures results may be reported.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SeasonNotOpen` unless the season is active.
    pub const fn ensure_accepts_results(&self) -> Result<(), DomainError> {
        if self.status.accepts_results() {
            Ok(())
        } else {
            Err(DomainError::SeasonNotOpen {
                season_id: self.season_id,
                status: self.status,
            })
        }
    }

    /// Validates and returns the next lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeasonTransition` unless `target` is the
    /// next forward step.
    pub const fn validate_transition(&self, target: SeasonStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidSeasonTransition {
                season_id: self.season_id,
                from: self.status,
                to: target,
            })
        }
    }

    /// Registers a team, or re-activates a withdrawn registration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateTeamRegistration` if the team is already active.
    pub fn register_team(&mut self, team_id: TeamId) -> Result<(), DomainError> {
        match self.teams.iter_mut().find(|t| t.team_id == team_id) {
            Some(existing) if existing.status == RegistrationStatus::Active => {
                Err(DomainError::DuplicateTeamRegistration {
                    season_id: self.season_id,
                    team_id,
                })
            }
            Some(existing) => {
                existing.status = RegistrationStatus::Active;
                Ok(())
            }
            None => {
                self.teams.push(SeasonTeam {
                    team_id,
                    status: RegistrationStatus::Active,
                });
                Ok(())
            }
        }
    }

    /// Marks a registration withdrawn.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TeamNotActiveInSeason` if the team is not active.
    pub fn withdraw_team(&mut self, team_id: TeamId) -> Result<(), DomainError> {
        let season_id = self.season_id;
        match self
            .teams
            .iter_mut()
            .find(|t| t.team_id == team_id && t.status == RegistrationStatus::Active)
        {
            Some(existing) => {
                existing.status = RegistrationStatus::Withdrawn;
                Ok(())
            }
            None => Err(DomainError::TeamNotActiveInSeason { season_id, team_id }),
        }
    }
}
