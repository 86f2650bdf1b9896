// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod collision;
mod friendly;

use crate::{
    Booking, BookingId, BookingStatus, MatchResult, PitchId, PlayMode, ResultId, ResultStatus,
    Season, SeasonId, Team, TeamId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const SEASON: SeasonId = SeasonId::new(1);
pub const PITCH: PitchId = PitchId::new(10);
pub const TEAM_A: TeamId = TeamId::new(1);
pub const TEAM_B: TeamId = TeamId::new(2);
pub const TEAM_C: TeamId = TeamId::new(3);
pub const TEAM_D: TeamId = TeamId::new(4);

pub fn base_time() -> OffsetDateTime {
    datetime!(2025-06-01 14:00 UTC)
}

pub fn create_test_season(play_mode: PlayMode, teams: &[TeamId]) -> Season {
    let mut season = Season::new("Saison 2025", 2025, play_mode).with_id(SEASON);
    season.status = crate::SeasonStatus::Active;
    for team in teams {
        season.register_team(*team).unwrap();
    }
    season
}

pub fn create_test_teams() -> Vec<Team> {
    vec![
        Team::new("Alpha").with_id(TEAM_A),
        Team::new("Bravo").with_id(TEAM_B),
        Team::new("Charlie").with_id(TEAM_C),
        Team::new("Delta").with_id(TEAM_D),
    ]
}

pub fn create_test_slot(id: i64, starts_at: OffsetDateTime, minutes: u32) -> Booking {
    let mut booking = Booking::new_slot(SEASON, PITCH, starts_at, minutes, false, base_time());
    booking.booking_id = Some(BookingId::new(id));
    booking
}

pub fn create_test_booking(
    id: i64,
    starts_at: OffsetDateTime,
    status: BookingStatus,
    home: TeamId,
    away: TeamId,
) -> Booking {
    let mut booking = create_test_slot(id, starts_at, 90);
    booking.status = status;
    booking.home_team_id = Some(home);
    booking.away_team_id = Some(away);
    booking.requested_at = Some(base_time());
    booking
}

pub fn create_test_result(
    id: i64,
    home: TeamId,
    away: TeamId,
    score: (u32, u32),
    status: ResultStatus,
) -> MatchResult {
    MatchResult {
        result_id: Some(ResultId::new(id)),
        season_id: SEASON,
        booking_id: None,
        home_team_id: home,
        away_team_id: away,
        home_score: score.0,
        away_score: score.1,
        status,
        reported_by: Some(home),
        played_at: base_time() + time::Duration::days(id),
        is_valid: true,
        is_friendly: false,
        reported_at: base_time() + time::Duration::days(id),
        status_reason: None,
    }
}
