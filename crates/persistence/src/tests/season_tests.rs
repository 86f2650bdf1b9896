// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga::{ActingParty, SeasonCommand, apply_season_command};
use bunte_liga_domain::{RankingCriterion, RegistrationStatus, SeasonId, SeasonStatus, TeamId};

use super::{change_season, create_test_actor, create_test_cause, setup, setup_time, store_season};
use crate::{Persistence, PersistenceError};

#[test]
fn test_insert_season_assigns_id_and_starts_in_planning() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let season = store_season(&mut persistence, "Saison 2025", 2025);

    let season_id = season.season_id.unwrap();
    let loaded = persistence.get_season(season_id).unwrap();
    assert_eq!(loaded.name, "Saison 2025");
    assert_eq!(loaded.year, 2025);
    assert_eq!(loaded.status, SeasonStatus::Planning);
    assert!(!loaded.is_current);
    assert_eq!(loaded.ranking_criteria, RankingCriterion::default_order());
    assert_eq!(loaded.request_expiry_days, season.request_expiry_days);
}

#[test]
fn test_registrations_round_trip() {
    let fixture = setup();
    let mut persistence = fixture.persistence;

    let loaded = persistence
        .get_season(fixture.season.season_id.unwrap())
        .unwrap();

    assert_eq!(loaded.status, SeasonStatus::Active);
    assert_eq!(
        loaded.active_team_ids(),
        vec![fixture.home, fixture.away, fixture.other]
    );
}

#[test]
fn test_withdrawn_registration_is_kept() {
    let mut fixture = setup();
    let season = fixture.season.clone();

    let updated = change_season(
        &mut fixture.persistence,
        &season,
        SeasonCommand::WithdrawTeam {
            team_id: fixture.other,
        },
    );

    let loaded = fixture
        .persistence
        .get_season(updated.season_id.unwrap())
        .unwrap();
    let registration = loaded
        .teams
        .iter()
        .find(|t| t.team_id == fixture.other)
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Withdrawn);
    assert!(!loaded.is_team_active(fixture.other));
}

#[test]
fn test_registering_unknown_team_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let season = store_season(&mut persistence, "Saison 2025", 2025);

    let transition = apply_season_command(
        &season,
        SeasonCommand::RegisterTeam {
            team_id: TeamId::new(999),
        },
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let result = persistence.update_season(&transition, SeasonStatus::Planning);

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    let loaded = persistence.get_season(season.season_id.unwrap()).unwrap();
    assert!(loaded.teams.is_empty());
}

#[test]
fn test_only_one_season_is_current() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first = store_season(&mut persistence, "Saison 2024", 2024);
    let second = store_season(&mut persistence, "Saison 2025", 2025);

    change_season(&mut persistence, &first, SeasonCommand::SetCurrent);
    assert_eq!(
        persistence.get_current_season().unwrap().unwrap().season_id,
        first.season_id
    );

    change_season(&mut persistence, &second, SeasonCommand::SetCurrent);

    let current = persistence.get_current_season().unwrap().unwrap();
    assert_eq!(current.season_id, second.season_id);
    let first_loaded = persistence.get_season(first.season_id.unwrap()).unwrap();
    assert!(!first_loaded.is_current);
}

#[test]
fn test_list_seasons_newest_first() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    store_season(&mut persistence, "Saison 2023", 2023);
    store_season(&mut persistence, "Saison 2025", 2025);
    store_season(&mut persistence, "Saison 2024", 2024);

    let years: Vec<u16> = persistence
        .list_seasons()
        .unwrap()
        .iter()
        .map(|s| s.year)
        .collect();

    assert_eq!(years, vec![2025, 2024, 2023]);
}

#[test]
fn test_stale_season_transition_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let season = store_season(&mut persistence, "Saison 2025", 2025);

    change_season(
        &mut persistence,
        &season,
        SeasonCommand::Transition {
            target: SeasonStatus::Active,
        },
    );

    // Decided against the stale planning copy.
    let stale = apply_season_command(
        &season,
        SeasonCommand::SetCurrent,
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let result = persistence.update_season(&stale, SeasonStatus::Planning);

    assert!(matches!(
        result,
        Err(PersistenceError::StaleTransition {
            entity: "season",
            ..
        })
    ));
    let loaded = persistence.get_season(season.season_id.unwrap()).unwrap();
    assert_eq!(loaded.status, SeasonStatus::Active);
    assert!(!loaded.is_current);
}

#[test]
fn test_updating_missing_season_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let season = store_season(&mut persistence, "Saison 2025", 2025);
    let mut ghost = season.clone();
    ghost.season_id = Some(SeasonId::new(404));

    let transition = apply_season_command(
        &ghost,
        SeasonCommand::Transition {
            target: SeasonStatus::Active,
        },
        ActingParty::Admin,
        setup_time(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let result = persistence.update_season(&transition, SeasonStatus::Planning);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
