// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bunte_liga_audit::Cause;
use bunte_liga_domain::{ExternalInstant, SeasonStatus, TeamId};
use bunte_liga_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    AuthenticatedActor, BookingDecision, BookingInfo, CreatePitchRequest, CreateSeasonRequest,
    CreateSlotRequest, CreateTeamRequest, RequestSlotRequest, RespondBookingRequest,
    SeasonTeamRequest, TransitionSeasonRequest, create_pitch, create_season, create_slot,
    create_team, register_team, request_slot, respond_to_request, transition_season,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::admin(String::from("liga-admin"))
}

pub fn captain(team_id: TeamId) -> AuthenticatedActor {
    AuthenticatedActor::team(format!("captain-{team_id}"), team_id)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// When the league is set up and slots are requested.
pub fn setup_time() -> OffsetDateTime {
    datetime!(2025-05-01 12:00 UTC)
}

pub fn kickoff() -> OffsetDateTime {
    datetime!(2025-06-01 14:00 UTC)
}

pub fn after_match() -> OffsetDateTime {
    kickoff() + Duration::hours(2)
}

pub fn at(instant: OffsetDateTime) -> ExternalInstant {
    ExternalInstant::UnixMillis(instant.unix_timestamp() * 1000)
}

pub fn create_team_request(name: &str) -> CreateTeamRequest {
    CreateTeamRequest {
        name: name.to_string(),
        short_name: None,
        colors: None,
        logo_ref: None,
        contact: None,
    }
}

pub fn create_pitch_request(name: &str) -> CreatePitchRequest {
    CreatePitchRequest {
        name: name.to_string(),
        address: Some(String::from("Parkweg 1, Berlin")),
        pitch_type: Some(String::from("Kunstrasen")),
        owner_team_id: None,
        is_verified: true,
        weekly_limit: None,
        allow_friendly_auto_release: true,
        image_ref: None,
    }
}

pub fn create_season_request(name: &str) -> CreateSeasonRequest {
    CreateSeasonRequest {
        name: name.to_string(),
        year: 2025,
        play_mode: None,
        ranking_criteria: None,
        request_expiry_days: None,
        friendly_games_release_hours: None,
    }
}

/// An active season with three registered teams and one pitch.
pub struct League {
    pub persistence: Persistence,
    pub season_id: i64,
    pub pitch_id: i64,
    pub home: TeamId,
    pub away: TeamId,
    pub other: TeamId,
}

pub fn setup_league() -> League {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();

    let mut team_ids = Vec::new();
    for name in ["FC Blau", "Rote Socken", "Ballkünstler"] {
        let team = create_team(
            &mut persistence,
            &create_team_request(name),
            &admin,
            create_test_cause(),
            setup_time(),
        )
        .unwrap();
        team_ids.push(TeamId::new(team.team_id));
    }
    let pitch = create_pitch(
        &mut persistence,
        &create_pitch_request("Sportpark Nord"),
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    let season = create_season(
        &mut persistence,
        &create_season_request("Saison 2025"),
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    for team_id in &team_ids {
        register_team(
            &mut persistence,
            season.season_id,
            SeasonTeamRequest {
                team_id: team_id.value(),
            },
            &admin,
            create_test_cause(),
            setup_time(),
        )
        .unwrap();
    }
    transition_season(
        &mut persistence,
        season.season_id,
        TransitionSeasonRequest {
            target: SeasonStatus::Active,
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();

    League {
        persistence,
        season_id: season.season_id,
        pitch_id: pitch.pitch_id,
        home: team_ids[0],
        away: team_ids[1],
        other: team_ids[2],
    }
}

impl League {
    pub fn slot_request(
        &self,
        starts_at: OffsetDateTime,
        duration_minutes: u32,
    ) -> CreateSlotRequest {
        CreateSlotRequest {
            season_id: self.season_id,
            pitch_id: self.pitch_id,
            starts_at: at(starts_at),
            duration_minutes,
            is_friendly: false,
        }
    }

    pub fn store_slot(&mut self, starts_at: OffsetDateTime) -> BookingInfo {
        let request = self.slot_request(starts_at, 90);
        create_slot(
            &mut self.persistence,
            &request,
            &create_test_admin(),
            create_test_cause(),
            setup_time(),
        )
        .unwrap()
    }

    /// Requests the slot as the home team against the away team.
    pub fn request(&mut self, booking_id: i64) -> BookingInfo {
        request_slot(
            &mut self.persistence,
            booking_id,
            &RequestSlotRequest {
                home_team_id: None,
                away_team_id: self.away.value(),
                is_friendly: false,
                contact: None,
            },
            &captain(self.home),
            create_test_cause(),
            setup_time(),
        )
        .unwrap()
    }

    /// A confirmed league match between home and away at kickoff.
    pub fn confirmed_match(&mut self) -> BookingInfo {
        let slot = self.store_slot(kickoff());
        self.request(slot.booking_id);
        respond_to_request(
            &mut self.persistence,
            slot.booking_id,
            &RespondBookingRequest {
                decision: BookingDecision::Confirm,
                reason: None,
            },
            &captain(self.away),
            create_test_cause(),
            setup_time(),
        )
        .unwrap()
    }
}
