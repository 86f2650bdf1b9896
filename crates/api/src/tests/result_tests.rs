// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bunte_liga_domain::{OpponentBlock, ResultStatus, TeamId};
use time::Duration;

use super::helpers::{
    League, after_match, at, captain, create_test_admin, create_test_cause, kickoff,
    setup_league, setup_time,
};
use crate::{
    AdminCreateResultRequest, AdminUpdateResultRequest, ApiError, ReportResultRequest,
    RespondResultRequest, ResultAnswer, ResultInfo, UpdateSlotRequest, admin_create_result_entry,
    admin_delete_result_entry, admin_update_result, cancel_result_report, get_audit_timeline,
    get_opponent_options, get_pending_actions, get_standings, list_bookings_needing_result,
    list_pending_results_for_team, list_public_results, list_results, list_teams,
    refresh_all_time_stats, report_result, respond_to_result, update_slot,
};

fn report(league: &mut League, booking_id: i64, home_score: u32, away_score: u32) -> ResultInfo {
    report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id,
            home_score,
            away_score,
        },
        &captain(league.home),
        create_test_cause(),
        after_match(),
    )
    .unwrap()
}

fn respond(
    league: &mut League,
    result_id: i64,
    decision: ResultAnswer,
) -> Result<ResultInfo, ApiError> {
    respond_to_result(
        &mut league.persistence,
        result_id,
        &RespondResultRequest {
            decision,
            reason: None,
        },
        &captain(league.away),
        create_test_cause(),
        after_match(),
    )
}

fn admin_result(
    league: &League,
    home: TeamId,
    away: TeamId,
    score: (u32, u32),
) -> AdminCreateResultRequest {
    AdminCreateResultRequest {
        season_id: league.season_id,
        booking_id: None,
        home_team_id: home.value(),
        away_team_id: away.value(),
        home_score: score.0,
        away_score: score.1,
        played_at: at(kickoff() - Duration::days(14)),
        status: None,
        is_friendly: false,
        is_valid: None,
    }
}

#[test]
fn test_report_before_kickoff_is_refused() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let result = report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id: booking.booking_id,
            home_score: 1,
            away_score: 0,
        },
        &captain(league.home),
        create_test_cause(),
        kickoff() - Duration::minutes(5),
    );

    assert!(matches!(
        result,
        Err(ApiError::EligibilityViolation { ref rule, .. }) if rule == "match_started"
    ));
}

#[test]
fn test_outsider_cannot_report() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let result = report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id: booking.booking_id,
            home_score: 1,
            away_score: 0,
        },
        &captain(league.other),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_report_on_unconfirmed_booking_is_a_conflict() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);

    let result = report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id: slot.booking_id,
            home_score: 1,
            away_score: 0,
        },
        &captain(league.home),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "booking_confirmed"
    ));
}

#[test]
fn test_confirmed_result_counts_in_standings() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let reported = report(&mut league, booking.booking_id, 3, 1);
    assert_eq!(reported.status, "pending");
    assert_eq!(reported.reported_by, Some(league.home.value()));
    assert_eq!(reported.played_at, "2025-06-01T14:00:00Z");

    let before = get_standings(&mut league.persistence, league.season_id).unwrap();
    assert!(before.rows.iter().all(|r| r.played == 0));
    assert!(
        list_public_results(&mut league.persistence, league.season_id)
            .unwrap()
            .results
            .is_empty()
    );

    let confirmed = respond(&mut league, reported.result_id, ResultAnswer::Confirm).unwrap();
    assert_eq!(confirmed.status, "confirmed");

    let table = get_standings(&mut league.persistence, league.season_id).unwrap();
    assert_eq!(table.rows.len(), 3);
    let leader = &table.rows[0];
    assert_eq!(leader.team_id, league.home);
    assert_eq!(leader.team_name, "FC Blau");
    assert_eq!(leader.points, 2);
    assert_eq!(leader.goal_difference, 2);
    let loser = table.rows.iter().find(|r| r.team_id == league.away).unwrap();
    assert_eq!(loser.points, 0);
    assert_eq!(loser.goals_for, 1);
    assert_eq!(
        list_public_results(&mut league.persistence, league.season_id)
            .unwrap()
            .results
            .len(),
        1
    );
}

#[test]
fn test_reporter_cannot_confirm_own_result() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let reported = report(&mut league, booking.booking_id, 2, 2);

    let result = respond_to_result(
        &mut league.persistence,
        reported.result_id,
        &RespondResultRequest {
            decision: ResultAnswer::Confirm,
            reason: None,
        },
        &captain(league.home),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_second_report_while_pending_is_a_conflict() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    report(&mut league, booking.booking_id, 2, 0);

    let result = report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id: booking.booking_id,
            home_score: 0,
            away_score: 2,
        },
        &captain(league.away),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "one_active_result"
    ));
}

#[test]
fn test_rejected_result_can_be_reported_again() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let first = report(&mut league, booking.booking_id, 5, 0);

    let rejected = respond(&mut league, first.result_id, ResultAnswer::Reject).unwrap();
    assert_eq!(rejected.status, "rejected");

    let needing = list_bookings_needing_result(
        &mut league.persistence,
        league.season_id,
        &captain(league.home),
        after_match(),
    )
    .unwrap();
    assert_eq!(needing.bookings.len(), 1);

    let second = report(&mut league, booking.booking_id, 1, 0);
    assert_ne!(second.result_id, first.result_id);
    assert_eq!(
        list_results(&mut league.persistence, league.season_id)
            .unwrap()
            .results
            .len(),
        2
    );
}

#[test]
fn test_reporter_can_withdraw_report() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let reported = report(&mut league, booking.booking_id, 1, 1);

    let by_opponent = cancel_result_report(
        &mut league.persistence,
        reported.result_id,
        &captain(league.away),
        create_test_cause(),
        after_match(),
    );
    assert!(matches!(by_opponent, Err(ApiError::Unauthorized { .. })));

    let withdrawn = cancel_result_report(
        &mut league.persistence,
        reported.result_id,
        &captain(league.home),
        create_test_cause(),
        after_match(),
    )
    .unwrap();
    assert_eq!(withdrawn.status, "withdrawn");

    let answered = respond(&mut league, reported.result_id, ResultAnswer::Confirm);
    assert!(matches!(answered, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_pending_results_for_team() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    report(&mut league, booking.booking_id, 2, 1);

    let for_away = list_pending_results_for_team(
        &mut league.persistence,
        league.season_id,
        None,
        &captain(league.away),
    )
    .unwrap();
    assert_eq!(for_away.results.len(), 1);

    let for_other = list_pending_results_for_team(
        &mut league.persistence,
        league.season_id,
        Some(league.other.value()),
        &create_test_admin(),
    )
    .unwrap();
    assert!(for_other.results.is_empty());
}

#[test]
fn test_pending_actions_cover_both_sides() {
    let mut league = setup_league();
    let slot = league.store_slot(kickoff());
    league.request(slot.booking_id);

    let home = get_pending_actions(
        &mut league.persistence,
        league.season_id,
        None,
        &captain(league.home),
        setup_time(),
    )
    .unwrap();
    assert_eq!(home.team_id, league.home.value());
    assert_eq!(home.outgoing_requests.len(), 1);
    assert!(home.incoming_requests.is_empty());

    let away = get_pending_actions(
        &mut league.persistence,
        league.season_id,
        None,
        &captain(league.away),
        setup_time(),
    )
    .unwrap();
    assert_eq!(away.incoming_requests.len(), 1);
    assert_eq!(away.incoming_requests[0].booking_id, slot.booking_id);
    assert!(away.outgoing_requests.is_empty());
}

#[test]
fn test_pending_actions_after_the_match() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let before = get_pending_actions(
        &mut league.persistence,
        league.season_id,
        None,
        &captain(league.away),
        after_match(),
    )
    .unwrap();
    assert_eq!(before.needs_result.len(), 1);

    report(&mut league, booking.booking_id, 0, 0);

    let after = get_pending_actions(
        &mut league.persistence,
        league.season_id,
        Some(league.away.value()),
        &create_test_admin(),
        after_match(),
    )
    .unwrap();
    assert!(after.needs_result.is_empty());
    assert_eq!(after.results_to_confirm.len(), 1);
}

#[test]
fn test_opponent_options_after_single_round_robin_match() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let reported = report(&mut league, booking.booking_id, 1, 0);
    respond(&mut league, reported.result_id, ResultAnswer::Confirm).unwrap();

    let league_game = get_opponent_options(
        &mut league.persistence,
        league.season_id,
        None,
        false,
        &captain(league.home),
        after_match(),
    )
    .unwrap();
    assert_eq!(league_game.options.len(), 2);
    let away = league_game
        .options
        .iter()
        .find(|o| o.team_id == league.away)
        .unwrap();
    assert!(!away.selectable);
    assert_eq!(away.blocked_by, Some(OpponentBlock::RematchLimitReached));
    assert_eq!(away.league_meetings, 1);
    let other = league_game
        .options
        .iter()
        .find(|o| o.team_id == league.other)
        .unwrap();
    assert!(other.selectable);

    let friendly = get_opponent_options(
        &mut league.persistence,
        league.season_id,
        None,
        true,
        &captain(league.home),
        after_match(),
    )
    .unwrap();
    assert!(friendly.options.iter().all(|o| o.selectable));
}

#[test]
fn test_admin_result_lifecycle_is_audited() {
    let mut league = setup_league();
    let admin = create_test_admin();
    let request = admin_result(&league, league.other, league.away, (4, 4));

    let created = admin_create_result_entry(
        &mut league.persistence,
        &request,
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(created.status, "confirmed");
    assert!(created.is_valid);
    assert_eq!(created.booking_id, None);

    let corrected = admin_update_result(
        &mut league.persistence,
        created.result_id,
        &AdminUpdateResultRequest {
            home_score: Some(4),
            away_score: Some(3),
            reason: Some(String::from("Spielbericht korrigiert")),
            ..AdminUpdateResultRequest::default()
        },
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(corrected.away_score, 3);

    let deleted = admin_delete_result_entry(
        &mut league.persistence,
        created.result_id,
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();
    assert_eq!(deleted.result_id, created.result_id);
    assert!(
        list_results(&mut league.persistence, league.season_id)
            .unwrap()
            .results
            .is_empty()
    );

    let timeline =
        get_audit_timeline(&mut league.persistence, "result", created.result_id, &admin).unwrap();
    let actions: Vec<&str> = timeline.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["AdminCreateResult", "AdminUpdateResult", "AdminDeleteResult"]
    );
    assert_eq!(timeline.events[2].after, "absent");
    assert_eq!(timeline.events[0].cause_id, "api-req-456");
}

#[test]
fn test_team_cannot_enter_results_directly() {
    let mut league = setup_league();
    let request = admin_result(&league, league.home, league.away, (1, 0));

    let result = admin_create_result_entry(
        &mut league.persistence,
        &request,
        &captain(league.home),
        create_test_cause(),
        setup_time(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_audit_timeline_requires_admin() {
    let mut league = setup_league();

    let result = get_audit_timeline(
        &mut league.persistence,
        "season",
        league.season_id,
        &captain(league.home),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_refresh_all_time_stats() {
    let mut league = setup_league();
    let admin = create_test_admin();
    for (home, away, score) in [
        (league.home, league.away, (2, 0)),
        (league.away, league.other, (1, 1)),
    ] {
        let request = admin_result(&league, home, away, score);
        admin_create_result_entry(
            &mut league.persistence,
            &request,
            &admin,
            create_test_cause(),
            setup_time(),
        )
        .unwrap();
    }
    let mut pending = admin_result(&league, league.home, league.other, (9, 0));
    pending.status = Some(ResultStatus::Pending);
    admin_create_result_entry(
        &mut league.persistence,
        &pending,
        &admin,
        create_test_cause(),
        setup_time(),
    )
    .unwrap();

    let refreshed =
        refresh_all_time_stats(&mut league.persistence, &admin, create_test_cause(), setup_time())
            .unwrap();
    assert_eq!(refreshed.teams_updated, 3);
    assert_eq!(refreshed.results_counted, 2);

    let teams = list_teams(&mut league.persistence, None).unwrap().teams;
    let away = teams
        .iter()
        .find(|t| t.team_id == league.away.value())
        .unwrap();
    assert_eq!(away.all_time.games, 2);
    assert_eq!(away.all_time.points, 1);
    assert_eq!(away.all_time.goals_for, 1);
    assert_eq!(away.all_time.goals_against, 3);
    let home = teams
        .iter()
        .find(|t| t.team_id == league.home.value())
        .unwrap();
    assert_eq!(home.all_time.points, 2);
}

fn set_friendly(league: &mut League, booking_id: i64, is_friendly: bool) {
    update_slot(
        &mut league.persistence,
        booking_id,
        &UpdateSlotRequest {
            is_friendly: Some(is_friendly),
            ..UpdateSlotRequest::default()
        },
        &create_test_admin(),
        create_test_cause(),
        after_match(),
    )
    .unwrap();
}

fn games_played(league: &mut League) -> u32 {
    get_standings(&mut league.persistence, league.season_id)
        .unwrap()
        .rows
        .iter()
        .map(|r| r.played)
        .sum()
}

#[test]
fn test_admin_result_for_friendly_booking_stays_out_of_standings() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    set_friendly(&mut league, booking.booking_id, true);

    let mut request = admin_result(&league, league.home, league.away, (3, 0));
    request.booking_id = Some(booking.booking_id);
    assert!(!request.is_friendly);

    let created = admin_create_result_entry(
        &mut league.persistence,
        &request,
        &create_test_admin(),
        create_test_cause(),
        after_match(),
    )
    .unwrap();

    assert!(created.is_friendly);
    assert_eq!(created.status, "confirmed");
    assert_eq!(games_played(&mut league), 0);
}

#[test]
fn test_result_follows_booking_friendly_flag() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let reported = report(&mut league, booking.booking_id, 2, 1);
    respond(&mut league, reported.result_id, ResultAnswer::Confirm).unwrap();
    assert_eq!(games_played(&mut league), 2);

    set_friendly(&mut league, booking.booking_id, true);
    let results = list_results(&mut league.persistence, league.season_id)
        .unwrap()
        .results;
    assert!(results[0].is_friendly);
    assert_eq!(games_played(&mut league), 0);

    set_friendly(&mut league, booking.booking_id, false);
    assert_eq!(games_played(&mut league), 2);
}

#[test]
fn test_admin_result_must_match_booking_teams() {
    let mut league = setup_league();
    let booking = league.confirmed_match();
    let mut request = admin_result(&league, league.home, league.other, (1, 0));
    request.booking_id = Some(booking.booking_id);

    let result = admin_create_result_entry(
        &mut league.persistence,
        &request,
        &create_test_admin(),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "booking_id"
    ));
}

#[test]
fn test_score_above_maximum_is_invalid_input() {
    let mut league = setup_league();
    let booking = league.confirmed_match();

    let result = report_result(
        &mut league.persistence,
        ReportResultRequest {
            booking_id: booking.booking_id,
            home_score: 100,
            away_score: 0,
        },
        &captain(league.home),
        create_test_cause(),
        after_match(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "home_score"
    ));
    assert!(
        list_results(&mut league.persistence, league.season_id)
            .unwrap()
            .results
            .is_empty()
    );
}
