// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! League table computation.
//!
//! The table is a pure function of the season's active teams and its
//! results. Only confirmed, valid, non-friendly results count. Teams are
//! ordered by the season's ranking criteria, applied one after another to
//! groups of teams that are still tied, and finally by name and id.
//!
//! `head_to_head` compares the teams of a tied group using a mini-table of
//! the matches played between exactly those teams (points first, then goal
//! difference).

use crate::match_result::{MatchOutcome, MatchResult};
use crate::season::{RankingCriterion, Season};
use crate::types::{AllTimeStats, Team, TeamId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of outcomes shown in the form column.
pub const FORM_LENGTH: usize = 5;

/// One entry in the form column, from the team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

/// A row in the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub rank: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// Last outcomes, oldest first.
    pub form: Vec<FormResult>,
}

impl StandingsRow {
    fn empty(team_id: TeamId, team_name: String) -> Self {
        Self {
            rank: 0,
            team_id,
            team_name,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            form: Vec::new(),
        }
    }

    fn record(&mut self, scored: u32, conceded: u32, points: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.points = self.points.saturating_add(points);
        match scored.cmp(&conceded) {
            Ordering::Greater => self.won = self.won.saturating_add(1),
            Ordering::Equal => self.drawn = self.drawn.saturating_add(1),
            Ordering::Less => self.lost = self.lost.saturating_add(1),
        }
    }
}

const fn form_for(scored: u32, conceded: u32) -> FormResult {
    if scored > conceded {
        FormResult::Win
    } else if scored < conceded {
        FormResult::Loss
    } else {
        FormResult::Draw
    }
}

/// Deterministic chronological order, independent of input order.
fn chronological(a: &&MatchResult, b: &&MatchResult) -> Ordering {
    a.played_at
        .cmp(&b.played_at)
        .then_with(|| a.reported_at.cmp(&b.reported_at))
        .then_with(|| a.result_id.cmp(&b.result_id))
        .then_with(|| a.home_team_id.cmp(&b.home_team_id))
        .then_with(|| a.away_team_id.cmp(&b.away_team_id))
        .then_with(|| a.home_score.cmp(&b.home_score))
        .then_with(|| a.away_score.cmp(&b.away_score))
}

/// Computes the league table for a season.
///
/// `teams` supplies names; teams missing from it are listed with an empty
/// name. Results against teams that are no longer active still count for
/// the active opponent.
#[must_use]
pub fn compute_standings(
    season: &Season,
    teams: &[Team],
    results: &[MatchResult],
) -> Vec<StandingsRow> {
    let names: HashMap<TeamId, &str> = teams
        .iter()
        .filter_map(|t| t.team_id.map(|id| (id, t.name.as_str())))
        .collect();

    let mut rows: BTreeMap<TeamId, StandingsRow> = season
        .active_team_ids()
        .into_iter()
        .map(|id| {
            let name = names.get(&id).copied().unwrap_or_default().to_string();
            (id, StandingsRow::empty(id, name))
        })
        .collect();

    let mut counted: Vec<&MatchResult> = results
        .iter()
        .filter(|r| season.season_id.is_none_or(|id| r.season_id == id))
        .filter(|r| r.counts_for_standings())
        .filter(|r| rows.contains_key(&r.home_team_id) || rows.contains_key(&r.away_team_id))
        .collect();
    counted.sort_by(chronological);

    for result in &counted {
        let (home_points, away_points) = result.outcome().points();
        if let Some(row) = rows.get_mut(&result.home_team_id) {
            row.record(result.home_score, result.away_score, home_points);
            row.form.push(form_for(result.home_score, result.away_score));
        }
        if let Some(row) = rows.get_mut(&result.away_team_id) {
            row.record(result.away_score, result.home_score, away_points);
            row.form.push(form_for(result.away_score, result.home_score));
        }
    }

    let mut table: Vec<StandingsRow> = rows.into_values().collect();
    for row in &mut table {
        let skip = row.form.len().saturating_sub(FORM_LENGTH);
        row.form.drain(..skip);
    }

    rank_rows(&mut table, &season.ranking_criteria, &counted);

    for (index, row) in table.iter_mut().enumerate() {
        row.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }
    table
}

/// Sorts `rows` in place by the criteria, splitting into tied groups.
fn rank_rows(rows: &mut [StandingsRow], criteria: &[RankingCriterion], results: &[&MatchResult]) {
    let Some((criterion, rest)) = criteria.split_first() else {
        rows.sort_by(|a, b| {
            a.team_name
                .cmp(&b.team_name)
                .then_with(|| a.team_id.cmp(&b.team_id))
        });
        return;
    };

    if rows.len() < 2 {
        return;
    }

    let keys = criterion_keys(*criterion, rows, results);
    rows.sort_by(|a, b| {
        let ka = keys.get(&a.team_id).copied().unwrap_or_default();
        let kb = keys.get(&b.team_id).copied().unwrap_or_default();
        kb.cmp(&ka)
    });

    let mut start = 0;
    while start < rows.len() {
        let key = keys.get(&rows[start].team_id).copied().unwrap_or_default();
        let mut end = start + 1;
        while end < rows.len() && keys.get(&rows[end].team_id).copied().unwrap_or_default() == key
        {
            end += 1;
        }
        rank_rows(&mut rows[start..end], rest, results);
        start = end;
    }
}

/// Sort keys (higher is better) for one criterion within a group.
fn criterion_keys(
    criterion: RankingCriterion,
    rows: &[StandingsRow],
    results: &[&MatchResult],
) -> HashMap<TeamId, (i64, i64)> {
    match criterion {
        RankingCriterion::Points => rows
            .iter()
            .map(|r| (r.team_id, (i64::from(r.points), 0)))
            .collect(),
        RankingCriterion::GoalDifference => rows
            .iter()
            .map(|r| (r.team_id, (r.goal_difference, 0)))
            .collect(),
        RankingCriterion::GoalsScored => rows
            .iter()
            .map(|r| (r.team_id, (i64::from(r.goals_for), 0)))
            .collect(),
        RankingCriterion::HeadToHead => head_to_head_keys(rows, results),
    }
}

fn head_to_head_keys(
    rows: &[StandingsRow],
    results: &[&MatchResult],
) -> HashMap<TeamId, (i64, i64)> {
    let group: HashSet<TeamId> = rows.iter().map(|r| r.team_id).collect();
    let mut keys: HashMap<TeamId, (i64, i64)> = rows.iter().map(|r| (r.team_id, (0, 0))).collect();

    for result in results
        .iter()
        .filter(|r| group.contains(&r.home_team_id) && group.contains(&r.away_team_id))
    {
        let (home_points, away_points) = result.outcome().points();
        let diff = i64::from(result.home_score) - i64::from(result.away_score);
        if let Some(entry) = keys.get_mut(&result.home_team_id) {
            entry.0 += i64::from(home_points);
            entry.1 += diff;
        }
        if let Some(entry) = keys.get_mut(&result.away_team_id) {
            entry.0 += i64::from(away_points);
            entry.1 -= diff;
        }
    }
    keys
}

/// Aggregates games, goals and points per team across all seasons.
///
/// The same counting rules as for the season table apply.
#[must_use]
pub fn compute_all_time_records(results: &[MatchResult]) -> BTreeMap<TeamId, AllTimeStats> {
    let mut records: BTreeMap<TeamId, AllTimeStats> = BTreeMap::new();
    for result in results.iter().filter(|r| r.counts_for_standings()) {
        let (home_points, away_points) =
            MatchOutcome::from_scores(result.home_score, result.away_score).points();
        records.entry(result.home_team_id).or_default().record(
            result.home_score,
            result.away_score,
            home_points,
        );
        records.entry(result.away_team_id).or_default().record(
            result.away_score,
            result.home_score,
            away_points,
        );
    }
    records
}
