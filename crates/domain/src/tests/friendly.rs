// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{TEAM_A, TEAM_B, base_time, create_test_season, create_test_slot};
use crate::{DomainError, ErrorKind, PlayMode, ensure_friendly_rules, is_released_for_friendly};
use time::Duration;

#[test]
fn test_friendly_slot_is_always_released() {
    let season = create_test_season(PlayMode::SingleRoundRobin, &[TEAM_A, TEAM_B]);
    let mut slot = create_test_slot(1, base_time() + Duration::days(30), 90);
    slot.is_friendly = true;
    assert!(is_released_for_friendly(&slot, &season, base_time()));
    assert!(ensure_friendly_rules(&slot, &season, true, base_time()).is_ok());
}

#[test]
fn test_league_slot_is_released_inside_window_only() {
    let season = create_test_season(PlayMode::SingleRoundRobin, &[TEAM_A, TEAM_B]);
    assert_eq!(season.friendly_games_release_hours, 48);
    let slot = create_test_slot(1, base_time(), 90);

    let just_outside = base_time() - Duration::hours(48);
    assert!(!is_released_for_friendly(&slot, &season, just_outside));
    let err = ensure_friendly_rules(&slot, &season, true, just_outside).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Eligibility);
    assert!(matches!(
        err,
        DomainError::FriendlyWindowNotOpen {
            hours_until_start: 48,
            release_hours: 48,
            ..
        }
    ));

    let inside = just_outside + Duration::minutes(1);
    assert!(is_released_for_friendly(&slot, &season, inside));
}

#[test]
fn test_league_request_rejected_on_friendly_slot() {
    let season = create_test_season(PlayMode::SingleRoundRobin, &[TEAM_A, TEAM_B]);
    let mut slot = create_test_slot(1, base_time(), 90);
    slot.is_friendly = true;
    assert!(matches!(
        ensure_friendly_rules(&slot, &season, false, base_time() - Duration::days(5)),
        Err(DomainError::FriendlySlotForLeagueGame { .. })
    ));
}

#[test]
fn test_league_request_on_league_slot_ignores_window() {
    let season = create_test_season(PlayMode::SingleRoundRobin, &[TEAM_A, TEAM_B]);
    let slot = create_test_slot(1, base_time(), 90);
    assert!(ensure_friendly_rules(&slot, &season, false, base_time() - Duration::days(20)).is_ok());
    assert!(ensure_friendly_rules(&slot, &season, false, base_time() - Duration::hours(1)).is_ok());
}
