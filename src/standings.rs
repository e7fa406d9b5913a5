use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::fixtures::{Match, Prediction};
use crate::outcome::{Mode, ScoreSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
}

impl StandingRow {
    pub fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u16, conceded: u16) {
        self.played += 1;
        self.goals_for += u32::from(scored);
        self.goals_against += u32::from(conceded);
        self.goal_diff += i32::from(scored) - i32::from(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += 3;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += 1;
            }
            Ordering::Less => self.lost += 1,
        }
    }
}

/// Better rows sort first: points, goal difference, goals scored, then team
/// name ascending so that the order is total.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_diff.cmp(&a.goal_diff))
        .then(b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team.cmp(&b.team))
}

pub fn compute_standings(
    matches: &[Match],
    group: &str,
    mode: Mode,
    predictions: &[Prediction],
    participant_id: &str,
) -> Vec<StandingRow> {
    let source = ScoreSource::new(mode, predictions, participant_id);
    standings_from_source(matches, group, &source)
}

/// Table for one group. Every team appearing in the group's fixtures gets a
/// row, played or not.
pub fn standings_from_source(
    matches: &[Match],
    group: &str,
    source: &ScoreSource<'_>,
) -> Vec<StandingRow> {
    let group_matches: Vec<&Match> = matches.iter().filter(|m| m.in_group(group)).collect();

    let mut rows: HashMap<&str, StandingRow> = HashMap::new();
    for m in &group_matches {
        for team in [m.home_team.as_str(), m.away_team.as_str()] {
            rows.entry(team).or_insert_with(|| StandingRow::new(team));
        }
    }

    for m in &group_matches {
        let Some((home_goals, away_goals)) = source.complete_scores(m) else {
            continue;
        };
        if let Some(home) = rows.get_mut(m.home_team.as_str()) {
            home.record(home_goals, away_goals);
        }
        if let Some(away) = rows.get_mut(m.away_team.as_str()) {
            away.record(away_goals, home_goals);
        }
    }

    let mut out: Vec<StandingRow> = rows.into_values().collect();
    out.sort_by(compare_rows);
    out
}

/// Rank-1 and rank-2 team names, when the table has them.
pub fn qualifiers(rows: &[StandingRow]) -> Vec<String> {
    rows.iter().take(2).map(|r| r.team.clone()).collect()
}
