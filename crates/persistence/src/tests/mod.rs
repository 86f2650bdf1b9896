// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod result_tests;
mod season_tests;

use bunte_liga::{
    ActingParty, BookingCommand, BookingContext, BookingTransition, RequestDecision, SeasonCommand,
    apply_booking_command, apply_season_command, create_season, create_slot, save_pitch,
    save_team,
};
use bunte_liga_audit::{Actor, Cause};
use bunte_liga_domain::{
    Booking, BookingStatus, Pitch, PlayMode, Season, SeasonStatus, SlotSpec, Team, TeamId,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::admin(String::from("test-admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// The wall clock used when setting up fixtures.
pub fn setup_time() -> OffsetDateTime {
    datetime!(2025-05-01 12:00 UTC)
}

pub fn kickoff() -> OffsetDateTime {
    datetime!(2025-06-01 14:00 UTC)
}

pub fn store_team(persistence: &mut Persistence, name: &str) -> Team {
    let transition = save_team(
        None,
        Team::new(name),
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.insert_team(&transition).unwrap()
}

pub fn store_pitch(persistence: &mut Persistence, name: &str) -> Pitch {
    let transition = save_pitch(
        None,
        Pitch::new(name),
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.insert_pitch(&transition).unwrap()
}

pub fn store_season(persistence: &mut Persistence, name: &str, year: u16) -> Season {
    let transition = create_season(
        Season::new(name, year, PlayMode::SingleRoundRobin),
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.insert_season(&transition).unwrap()
}

/// Applies a season command and commits it.
pub fn change_season(
    persistence: &mut Persistence,
    season: &Season,
    command: SeasonCommand,
) -> Season {
    let transition = apply_season_command(
        season,
        command,
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.update_season(&transition, season.status).unwrap()
}

/// An active season with three registered teams and one pitch.
pub struct Fixture {
    pub persistence: Persistence,
    pub season: Season,
    pub pitch: Pitch,
    pub home: TeamId,
    pub away: TeamId,
    pub other: TeamId,
}

pub fn setup() -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let home = store_team(&mut persistence, "FC Blau").team_id.unwrap();
    let away = store_team(&mut persistence, "Rote Socken").team_id.unwrap();
    let other = store_team(&mut persistence, "Grüne Welle").team_id.unwrap();
    let pitch = store_pitch(&mut persistence, "Sportpark Nord");

    let mut season = store_season(&mut persistence, "Saison 2025", 2025);
    for team_id in [home, away, other] {
        season = change_season(&mut persistence, &season, SeasonCommand::RegisterTeam { team_id });
    }
    season = change_season(
        &mut persistence,
        &season,
        SeasonCommand::Transition {
            target: SeasonStatus::Active,
        },
    );

    Fixture {
        persistence,
        season,
        pitch,
        home,
        away,
        other,
    }
}

impl Fixture {
    pub fn spec(&self, starts_at: OffsetDateTime, duration_minutes: u32) -> SlotSpec {
        SlotSpec {
            pitch_id: self.pitch.pitch_id.unwrap(),
            starts_at,
            duration_minutes,
            is_friendly: false,
        }
    }

    /// Creates and stores an available slot.
    pub fn store_slot(&mut self, starts_at: OffsetDateTime, duration_minutes: u32) -> Booking {
        let pitch_id = self.pitch.pitch_id.unwrap();
        let existing = self.persistence.list_bookings_for_pitch(pitch_id).unwrap();
        let transition = create_slot(
            &self.season,
            &self.pitch,
            &existing,
            &self.spec(starts_at, duration_minutes),
            setup_time(),
            ActingParty::Admin,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
        self.persistence.insert_slot(&transition).unwrap()
    }

    /// Applies a booking command against freshly loaded rows and commits it.
    pub fn run(
        &mut self,
        booking: &Booking,
        command: BookingCommand,
        party: ActingParty,
    ) -> Result<Booking, crate::PersistenceError> {
        let transition = self.plan(booking, command, party);
        self.persistence
            .commit_booking_transition(&transition, booking.status)
    }

    /// Decides a booking command against freshly loaded rows without
    /// committing it.
    pub fn plan(
        &mut self,
        booking: &Booking,
        command: BookingCommand,
        party: ActingParty,
    ) -> BookingTransition {
        let season_bookings = self
            .persistence
            .list_bookings_for_season(booking.season_id)
            .unwrap();
        let pitch_bookings = self
            .persistence
            .list_bookings_for_pitch(booking.pitch_id)
            .unwrap();
        let season_results = self
            .persistence
            .list_results_for_season(booking.season_id)
            .unwrap();
        let ctx = BookingContext {
            season: &self.season,
            pitch_bookings: &pitch_bookings,
            season_bookings: &season_bookings,
            season_results: &season_results,
            now: setup_time(),
        };
        let actor = party
            .team_id()
            .map_or_else(create_test_actor, |team_id| {
                Actor::team(format!("captain-{team_id}"), team_id)
            });
        apply_booking_command(&ctx, booking, command, party, actor, create_test_cause()).unwrap()
    }

    /// Requests the slot for home vs. away and confirms it.
    pub fn confirm_match(&mut self, slot: &Booking) -> Booking {
        let pending = self
            .run(
                slot,
                BookingCommand::Request {
                    home_team_id: self.home,
                    away_team_id: self.away,
                    is_friendly: false,
                    contact: None,
                },
                ActingParty::Team(self.home),
            )
            .unwrap();
        assert_eq!(pending.status, BookingStatus::PendingAwayConfirm);
        self.run(
            &pending,
            BookingCommand::Respond {
                decision: RequestDecision::Confirm,
                reason: None,
            },
            ActingParty::Team(self.away),
        )
        .unwrap()
    }
}
