// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ActingParty;
use bunte_liga_audit::{Actor, Cause};
use bunte_liga_domain::{
    Booking, BookingId, BookingStatus, PitchId, PlayMode, Season, SeasonId, SeasonStatus, TeamId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const SEASON: SeasonId = SeasonId::new(1);
pub const PITCH: PitchId = PitchId::new(10);
pub const HOME: TeamId = TeamId::new(1);
pub const AWAY: TeamId = TeamId::new(2);
pub const OTHER: TeamId = TeamId::new(3);

/// Kick-off of the standard test slot.
pub fn kickoff() -> OffsetDateTime {
    datetime!(2025-06-01 14:00 UTC)
}

/// A week before kick-off.
pub fn week_before() -> OffsetDateTime {
    kickoff() - time::Duration::days(7)
}

pub fn create_test_actor() -> Actor {
    Actor::admin(String::from("admin-123"))
}

pub fn create_team_actor(team_id: TeamId) -> Actor {
    Actor::team(format!("captain-{team_id}"), team_id)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub const fn team(team_id: TeamId) -> ActingParty {
    ActingParty::Team(team_id)
}

pub fn create_test_season(play_mode: PlayMode) -> Season {
    let mut season = Season::new("Saison 2025", 2025, play_mode).with_id(SEASON);
    season.status = SeasonStatus::Active;
    for team_id in [HOME, AWAY, OTHER] {
        season.register_team(team_id).unwrap();
    }
    season
}

pub fn create_test_slot(id: i64) -> Booking {
    let mut slot = Booking::new_slot(SEASON, PITCH, kickoff(), 90, false, week_before());
    slot.booking_id = Some(BookingId::new(id));
    slot
}

pub fn with_status(mut booking: Booking, status: BookingStatus) -> Booking {
    booking.status = status;
    if status.requires_teams() {
        booking.home_team_id = Some(HOME);
        booking.away_team_id = Some(AWAY);
        booking.requested_at = Some(week_before());
    }
    booking
}
