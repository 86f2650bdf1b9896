// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod collision;
mod datetime;
mod eligibility;
mod error;
mod expiry;
mod friendly;
mod match_result;
mod pending_actions;
mod schedule;
mod season;
mod standings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingStatus, MAX_DURATION_MINUTES};
pub use collision::{
    CollisionCheck, TimeInterval, check_collision, ensure_no_collision, find_collisions,
};
pub use datetime::{
    ExternalInstant, LEAGUE_TIMEZONE, format_date, format_date_time, format_time,
    league_local_to_utc, to_league_local, to_rfc3339,
};
pub use eligibility::{
    OpponentBlock, OpponentOption, count_league_meetings, ensure_rematch_allowed,
    opponent_options,
};
pub use error::{DomainError, ErrorKind};
pub use expiry::{EXPIRED_LABEL, ExpiryInfo, request_expiry_info};
pub use friendly::{ensure_friendly_rules, is_released_for_friendly};
pub use match_result::{
    MatchOutcome, MatchResult, POINTS_DRAW, POINTS_LOSS, POINTS_WIN, ResultStatus,
};
pub use pending_actions::{PendingActions, bookings_needing_result, pending_actions_for_team};
pub use schedule::{MAX_TEMPLATE_DAYS, SlotSpec, SlotTemplate, parse_weekday};
pub use season::{
    DEFAULT_FRIENDLY_RELEASE_HOURS, DEFAULT_REQUEST_EXPIRY_DAYS, PlayMode, RankingCriterion,
    RegistrationStatus, Season, SeasonStatus, SeasonTeam,
};
pub use standings::{
    FORM_LENGTH, FormResult, StandingsRow, compute_all_time_records, compute_standings,
};
pub use types::{
    AllTimeStats, BookingId, ContactInfo, Pitch, PitchId, ResultId, SeasonId, Team, TeamId,
};
pub use validation::{
    MAX_NAME_LENGTH, MAX_REASON_LENGTH, MAX_SCORE, normalize_reason, validate_duration,
    validate_pairing, validate_pitch_fields, validate_score, validate_season_settings,
    validate_slot_time, validate_team_fields,
};
