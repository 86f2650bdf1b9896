// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::BookingStatus;
use crate::match_result::ResultStatus;
use crate::season::SeasonStatus;
use crate::types::{BookingId, PitchId, ResultId, SeasonId, TeamId};
use crate::validation::MAX_SCORE;

/// The kind of a rule violation, independent of the concrete error.
///
/// Every error surfaced to a user belongs to exactly one kind. The API layer
/// maps kinds to transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input.
    Validation,
    /// Attempted transition from an incompatible current state.
    Conflict,
    /// A league business rule forbids the operation.
    Eligibility,
    /// The acting party is not the party required for the operation.
    Authorization,
    /// A referenced entity does not exist.
    NotFound,
}

impl ErrorKind {
    /// Returns the string representation used in API payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Eligibility => "eligibility",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name field is empty or too long.
    InvalidName {
        /// The field that was invalid.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Home and away team are the same team.
    SameTeam(TeamId),
    /// A booking duration is zero or longer than a day.
    InvalidDuration {
        /// The rejected duration in minutes.
        minutes: u32,
    },
    /// A reported score is above the accepted maximum.
    InvalidScore {
        /// Goals of the home team.
        home: u32,
        /// Goals of the away team.
        away: u32,
    },
    /// A season setting is out of range.
    InvalidSeasonSetting {
        /// The setting that was invalid.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A stored or submitted status string is not part of the status domain.
    InvalidStatus {
        /// The entity the status belongs to.
        entity: &'static str,
        /// The rejected status string.
        status: String,
    },
    /// Unknown play mode.
    InvalidPlayMode(String),
    /// Unknown ranking criterion.
    InvalidRankingCriterion(String),
    /// An external timestamp could not be coerced to an instant.
    InvalidTimestamp {
        /// The rejected value.
        value: String,
        /// The parsing error message.
        reason: String,
    },
    /// A slot schedule template cannot be expanded.
    InvalidSchedule {
        /// Why the template was rejected.
        reason: String,
    },
    /// A status that requires both teams was set without them.
    MissingTeams {
        /// The booking concerned, if persisted.
        booking_id: Option<BookingId>,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Booking status transition not permitted by the lifecycle table.
    InvalidBookingTransition {
        /// The booking concerned, if persisted.
        booking_id: Option<BookingId>,
        /// Current status.
        from: BookingStatus,
        /// Requested status.
        to: BookingStatus,
    },
    /// Result status transition not permitted by the lifecycle table.
    InvalidResultTransition {
        /// The result concerned, if persisted.
        result_id: Option<ResultId>,
        /// Current status.
        from: ResultStatus,
        /// Requested status.
        to: ResultStatus,
    },
    /// Season lifecycle transition is not a single forward step.
    InvalidSeasonTransition {
        /// The season concerned.
        season_id: Option<SeasonId>,
        /// Current status.
        from: SeasonStatus,
        /// Requested status.
        to: SeasonStatus,
    },
    /// The slot is no longer available for requests.
    SlotNotAvailable {
        /// The booking concerned.
        booking_id: Option<BookingId>,
        /// Its current status.
        status: BookingStatus,
    },
    /// The slot overlaps an active booking on the same pitch.
    SlotCollision {
        /// The pitch on which the collision occurred.
        pitch_id: PitchId,
        /// Active bookings overlapping the slot.
        conflicting: Vec<BookingId>,
    },
    /// An active result already exists for the booking.
    ResultAlreadyExists {
        /// The booking concerned.
        booking_id: BookingId,
        /// The existing result, if persisted.
        result_id: Option<ResultId>,
    },
    /// Results can only be reported for confirmed bookings.
    BookingNotConfirmed {
        /// The booking concerned.
        booking_id: Option<BookingId>,
        /// Its current status.
        status: BookingStatus,
    },
    /// The pitch is archived and takes no new slots.
    PitchArchived(PitchId),
    /// The team is already registered for the season.
    DuplicateTeamRegistration {
        /// The season.
        season_id: Option<SeasonId>,
        /// The team.
        team_id: TeamId,
    },
    /// The pair has already played the maximum number of league games.
    RematchLimitReached {
        /// Home team of the attempted fixture.
        home_team_id: TeamId,
        /// Away team of the attempted fixture.
        away_team_id: TeamId,
        /// League fixtures already counted between the pair.
        played: u32,
        /// Maximum permitted by the season's play mode.
        max: u32,
    },
    /// The slot is not released for friendly games yet.
    FriendlyWindowNotOpen {
        /// The booking concerned.
        booking_id: Option<BookingId>,
        /// Whole hours left until the slot starts.
        hours_until_start: i64,
        /// Release window configured on the season.
        release_hours: u32,
    },
    /// League games cannot be requested on a friendly slot.
    FriendlySlotForLeagueGame {
        /// The booking concerned.
        booking_id: Option<BookingId>,
    },
    /// The slot has already started.
    SlotInPast {
        /// The booking concerned.
        booking_id: Option<BookingId>,
    },
    /// A result cannot be reported before the match has started.
    MatchNotStarted {
        /// The booking concerned.
        booking_id: Option<BookingId>,
    },
    /// The team is not an active participant of the season.
    TeamNotActiveInSeason {
        /// The season.
        season_id: Option<SeasonId>,
        /// The team.
        team_id: TeamId,
    },
    /// The season's lifecycle state does not permit the operation.
    SeasonNotOpen {
        /// The season.
        season_id: Option<SeasonId>,
        /// Its current status.
        status: SeasonStatus,
    },
    /// Season does not exist.
    SeasonNotFound(SeasonId),
    /// No season is marked current.
    NoCurrentSeason,
    /// Team does not exist.
    TeamNotFound(TeamId),
    /// Pitch does not exist.
    PitchNotFound(PitchId),
    /// Booking does not exist.
    BookingNotFound(BookingId),
    /// Result does not exist.
    ResultNotFound(ResultId),
}

impl DomainError {
    /// Returns the error kind of this violation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. }
            | Self::SameTeam(_)
            | Self::InvalidDuration { .. }
            | Self::InvalidScore { .. }
            | Self::InvalidSeasonSetting { .. }
            | Self::InvalidStatus { .. }
            | Self::InvalidPlayMode(_)
            | Self::InvalidRankingCriterion(_)
            | Self::InvalidTimestamp { .. }
            | Self::InvalidSchedule { .. }
            | Self::MissingTeams { .. }
            | Self::DateArithmeticOverflow { .. } => ErrorKind::Validation,
            Self::InvalidBookingTransition { .. }
            | Self::InvalidResultTransition { .. }
            | Self::InvalidSeasonTransition { .. }
            | Self::SlotNotAvailable { .. }
            | Self::SlotCollision { .. }
            | Self::ResultAlreadyExists { .. }
            | Self::BookingNotConfirmed { .. }
            | Self::PitchArchived(_)
            | Self::DuplicateTeamRegistration { .. } => ErrorKind::Conflict,
            Self::RematchLimitReached { .. }
            | Self::FriendlyWindowNotOpen { .. }
            | Self::FriendlySlotForLeagueGame { .. }
            | Self::SlotInPast { .. }
            | Self::MatchNotStarted { .. }
            | Self::TeamNotActiveInSeason { .. }
            | Self::SeasonNotOpen { .. } => ErrorKind::Eligibility,
            Self::SeasonNotFound(_)
            | Self::NoCurrentSeason
            | Self::TeamNotFound(_)
            | Self::PitchNotFound(_)
            | Self::BookingNotFound(_)
            | Self::ResultNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Formats an optional identifier for messages.
fn describe<T: std::fmt::Display>(id: Option<&T>) -> String {
    id.map_or_else(|| String::from("(unsaved)"), ToString::to_string)
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::SameTeam(team_id) => {
                write!(f, "Team {team_id} cannot play against itself")
            }
            Self::InvalidDuration { minutes } => write!(
                f,
                "Invalid duration: {minutes} minutes. Must be between 1 and 1440"
            ),
            Self::InvalidScore { home, away } => write!(
                f,
                "Invalid score {home}:{away}. Each side must be between 0 and {MAX_SCORE}"
            ),
            Self::InvalidSeasonSetting { field, reason } => {
                write!(f, "Invalid season setting '{field}': {reason}")
            }
            Self::InvalidStatus { entity, status } => {
                write!(f, "Invalid {entity} status: '{status}'")
            }
            Self::InvalidPlayMode(mode) => write!(f, "Invalid play mode: '{mode}'"),
            Self::InvalidRankingCriterion(criterion) => {
                write!(f, "Invalid ranking criterion: '{criterion}'")
            }
            Self::InvalidTimestamp { value, reason } => {
                write!(f, "Invalid timestamp '{value}': {reason}")
            }
            Self::InvalidSchedule { reason } => write!(f, "Invalid schedule: {reason}"),
            Self::MissingTeams { booking_id } => write!(
                f,
                "Booking {} requires both a home and an away team for this status",
                describe(booking_id.as_ref())
            ),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidBookingTransition {
                booking_id,
                from,
                to,
            } => write!(
                f,
                "Booking {} cannot change from '{from}' to '{to}'",
                describe(booking_id.as_ref())
            ),
            Self::InvalidResultTransition {
                result_id,
                from,
                to,
            } => write!(
                f,
                "Result {} cannot change from '{from}' to '{to}'",
                describe(result_id.as_ref())
            ),
            Self::InvalidSeasonTransition {
                season_id,
                from,
                to,
            } => write!(
                f,
                "Season {} cannot change from '{from}' to '{to}'",
                describe(season_id.as_ref())
            ),
            Self::SlotNotAvailable { booking_id, status } => write!(
                f,
                "Slot {} is no longer available (status '{status}')",
                describe(booking_id.as_ref())
            ),
            Self::SlotCollision {
                pitch_id,
                conflicting,
            } => {
                let ids: Vec<String> = conflicting.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Slot overlaps existing bookings on pitch {pitch_id}: [{}]",
                    ids.join(", ")
                )
            }
            Self::ResultAlreadyExists {
                booking_id,
                result_id,
            } => write!(
                f,
                "A result ({}) already exists for booking {booking_id}",
                describe(result_id.as_ref())
            ),
            Self::BookingNotConfirmed { booking_id, status } => write!(
                f,
                "Booking {} is '{status}', results can only be reported for confirmed bookings",
                describe(booking_id.as_ref())
            ),
            Self::PitchArchived(pitch_id) => write!(f, "Pitch {pitch_id} is archived"),
            Self::DuplicateTeamRegistration { season_id, team_id } => write!(
                f,
                "Team {team_id} is already registered for season {}",
                describe(season_id.as_ref())
            ),
            Self::RematchLimitReached {
                home_team_id,
                away_team_id,
                played,
                max,
            } => write!(
                f,
                "Teams {home_team_id} and {away_team_id} have already played {played} of {max} league games this season"
            ),
            Self::FriendlyWindowNotOpen {
                booking_id,
                hours_until_start,
                release_hours,
            } => write!(
                f,
                "Slot {} starts in {hours_until_start} hours and is released for friendly games {release_hours} hours before kick-off",
                describe(booking_id.as_ref())
            ),
            Self::FriendlySlotForLeagueGame { booking_id } => write!(
                f,
                "Slot {} is reserved for friendly games",
                describe(booking_id.as_ref())
            ),
            Self::SlotInPast { booking_id } => write!(
                f,
                "Slot {} has already started",
                describe(booking_id.as_ref())
            ),
            Self::MatchNotStarted { booking_id } => write!(
                f,
                "The match of booking {} has not started yet",
                describe(booking_id.as_ref())
            ),
            Self::TeamNotActiveInSeason { season_id, team_id } => write!(
                f,
                "Team {team_id} is not an active participant of season {}",
                describe(season_id.as_ref())
            ),
            Self::SeasonNotOpen { season_id, status } => write!(
                f,
                "Season {} is '{status}' and does not accept this operation",
                describe(season_id.as_ref())
            ),
            Self::SeasonNotFound(id) => write!(f, "Season {id} not found"),
            Self::NoCurrentSeason => write!(f, "No season is currently marked as current"),
            Self::TeamNotFound(id) => write!(f, "Team {id} not found"),
            Self::PitchNotFound(id) => write!(f, "Pitch {id} not found"),
            Self::BookingNotFound(id) => write!(f, "Booking {id} not found"),
            Self::ResultNotFound(id) => write!(f, "Result {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
