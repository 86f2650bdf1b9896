// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-season rematch limits and opponent selection hints.
//!
//! A league fixture between two teams is counted once, either through an
//! active non-friendly booking or, for fixtures without such a booking,
//! through an active non-friendly result. Friendly games never count.

use crate::booking::{Booking, BookingStatus};
use crate::error::DomainError;
use crate::match_result::MatchResult;
use crate::season::Season;
use crate::types::{BookingId, TeamId};
use serde::Serialize;
use std::collections::HashSet;
use time::OffsetDateTime;

fn is_pair(a: TeamId, b: TeamId, x: TeamId, y: TeamId) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

/// Counts league fixtures between `team_a` and `team_b` in one season.
///
/// `bookings` and `results` must already be restricted to the season.
/// `ignore` excludes one booking and its results, typically the one being
/// requested.
#[must_use]
pub fn count_league_meetings(
    bookings: &[Booking],
    results: &[MatchResult],
    team_a: TeamId,
    team_b: TeamId,
    ignore: Option<BookingId>,
) -> u32 {
    let counted: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status.is_active() && !b.is_friendly)
        .filter(|b| ignore.is_none() || b.booking_id != ignore)
        .filter(|b| {
            b.teams()
                .is_some_and(|(home, away)| is_pair(home, away, team_a, team_b))
        })
        .collect();

    let counted_ids: HashSet<BookingId> = counted.iter().filter_map(|b| b.booking_id).collect();

    let unlinked_results = results
        .iter()
        .filter(|r| r.status.is_active() && !r.is_friendly)
        .filter(|r| is_pair(r.home_team_id, r.away_team_id, team_a, team_b))
        .filter(|r| {
            r.booking_id
                .is_none_or(|id| !counted_ids.contains(&id) && Some(id) != ignore)
        })
        .count();

    u32::try_from(counted.len() + unlinked_results).unwrap_or(u32::MAX)
}

/// Fails if another league fixture between the pair would exceed the limit.
///
/// # Errors
///
/// Returns `DomainError::RematchLimitReached` when the pair has already
/// met `max_matches` times.
pub fn ensure_rematch_allowed(
    season: &Season,
    bookings: &[Booking],
    results: &[MatchResult],
    home_team_id: TeamId,
    away_team_id: TeamId,
    ignore: Option<BookingId>,
) -> Result<(), DomainError> {
    let max = season.play_mode.max_matches();
    let played = count_league_meetings(bookings, results, home_team_id, away_team_id, ignore);
    if played >= max {
        return Err(DomainError::RematchLimitReached {
            home_team_id,
            away_team_id,
            played,
            max,
        });
    }
    Ok(())
}

/// Why an opponent cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentBlock {
    /// The pair has used up its league fixtures.
    RematchLimitReached,
    /// A confirmed match between the pair lies in the future.
    UpcomingConfirmedMatch,
}

/// One entry of the opponent picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentOption {
    pub team_id: TeamId,
    pub selectable: bool,
    pub blocked_by: Option<OpponentBlock>,
    pub league_meetings: u32,
}

/// Lists every other active team in the season as a possible opponent.
///
/// Blocked opponents are still listed, disabled with a reason.
#[must_use]
pub fn opponent_options(
    season: &Season,
    bookings: &[Booking],
    results: &[MatchResult],
    team_id: TeamId,
    is_friendly: bool,
    now: OffsetDateTime,
) -> Vec<OpponentOption> {
    let max = season.play_mode.max_matches();
    season
        .active_team_ids()
        .into_iter()
        .filter(|other| *other != team_id)
        .map(|other| {
            let league_meetings = count_league_meetings(bookings, results, team_id, other, None);
            let upcoming = bookings.iter().any(|b| {
                b.status == BookingStatus::Confirmed
                    && b.starts_at > now
                    && b.teams()
                        .is_some_and(|(home, away)| is_pair(home, away, team_id, other))
            });
            let blocked_by = if !is_friendly && league_meetings >= max {
                Some(OpponentBlock::RematchLimitReached)
            } else if upcoming {
                Some(OpponentBlock::UpcomingConfirmedMatch)
            } else {
                None
            };
            OpponentOption {
                team_id: other,
                selectable: blocked_by.is_none(),
                blocked_by,
                league_meetings,
            }
        })
        .collect()
}
