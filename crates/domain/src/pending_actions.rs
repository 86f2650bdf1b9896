// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived to-do list of a team. Nothing here is stored.

use crate::booking::{Booking, BookingStatus};
use crate::match_result::{MatchResult, ResultStatus};
use crate::types::{BookingId, TeamId};
use std::collections::HashSet;
use time::OffsetDateTime;

/// Everything a team currently has to act on or wait for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    /// Played matches without an active result.
    pub needs_result: Vec<Booking>,
    /// Requests the team has to confirm or deny as away team.
    pub incoming_requests: Vec<Booking>,
    /// The team's own requests awaiting the opponent.
    pub outgoing_requests: Vec<Booking>,
    /// Results reported by the opponent awaiting this team.
    pub results_to_confirm: Vec<MatchResult>,
}

impl PendingActions {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.needs_result.is_empty()
            && self.incoming_requests.is_empty()
            && self.outgoing_requests.is_empty()
            && self.results_to_confirm.is_empty()
    }
}

/// Confirmed, started bookings without a pending or confirmed result.
///
/// Restricted to bookings involving `team_id` when given.
#[must_use]
pub fn bookings_needing_result(
    bookings: &[Booking],
    results: &[MatchResult],
    team_id: Option<TeamId>,
    now: OffsetDateTime,
) -> Vec<Booking> {
    let reported: HashSet<BookingId> = results
        .iter()
        .filter(|r| r.status.is_active())
        .filter_map(|r| r.booking_id)
        .collect();

    let mut needing: Vec<Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed && b.has_started(now))
        .filter(|b| team_id.is_none_or(|team| b.involves(team)))
        .filter(|b| b.booking_id.is_some_and(|id| !reported.contains(&id)))
        .cloned()
        .collect();
    needing.sort_by_key(|b| (b.starts_at, b.booking_id));
    needing
}

/// Collects the pending actions of `team_id` from one season's data.
#[must_use]
pub fn pending_actions_for_team(
    bookings: &[Booking],
    results: &[MatchResult],
    team_id: TeamId,
    now: OffsetDateTime,
) -> PendingActions {
    let pending_with = |side: fn(&Booking) -> Option<TeamId>| -> Vec<Booking> {
        let mut list: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::PendingAwayConfirm && side(b) == Some(team_id))
            .cloned()
            .collect();
        list.sort_by_key(|b| (b.starts_at, b.booking_id));
        list
    };

    let mut results_to_confirm: Vec<MatchResult> = results
        .iter()
        .filter(|r| r.status == ResultStatus::Pending && r.opposing_team() == Some(team_id))
        .cloned()
        .collect();
    results_to_confirm.sort_by_key(|r| (r.played_at, r.result_id));

    PendingActions {
        needs_result: bookings_needing_result(bookings, results, Some(team_id), now),
        incoming_requests: pending_with(|b| b.away_team_id),
        outgoing_requests: pending_with(|b| b.home_team_id),
        results_to_confirm,
    }
}
