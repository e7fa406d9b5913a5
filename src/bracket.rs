//! Knockout bracket resolution.
//!
//! Resolution runs in four phases, each producing a fresh match list from the
//! previous one: group qualifiers into the round of 16, then round-of-16
//! winners into the quarterfinals, quarterfinal winners into the semifinals,
//! and finally semifinal winners and losers into the final and third-place
//! match. A slot whose feeder has no decided outcome keeps its placeholder
//! text.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::advancement::{self, Outcome};
use crate::fixtures::{GROUP_LABELS, Match, Prediction, Stage, stage_order};
use crate::outcome::{Mode, ScoreSource, decide_teams};
use crate::slot::Slot;
use crate::standings::{qualifiers, standings_from_source};

pub fn resolve_bracket(
    matches: &[Match],
    predictions: &[Prediction],
    participant_id: &str,
    mode: Mode,
) -> Vec<Match> {
    let source = ScoreSource::new(mode, predictions, participant_id);
    resolve_with_source(matches, &source)
}

pub fn resolve_with_source(matches: &[Match], source: &ScoreSource<'_>) -> Vec<Match> {
    let qualified = group_qualifiers(matches, source);
    let mut current = seed_round_of_16(matches, &qualified);
    for from in [Stage::R16, Stage::QF, Stage::SF] {
        current = advance_round(&current, from, source);
    }
    current
}

/// Top two teams of each group A-H under the given mode.
pub fn group_qualifiers(matches: &[Match], source: &ScoreSource<'_>) -> HashMap<String, Vec<String>> {
    GROUP_LABELS
        .iter()
        .map(|group| {
            let rows = standings_from_source(matches, group, source);
            (group.to_string(), qualifiers(&rows))
        })
        .collect()
}

/// Replaces `TBD <group><rank>` slots of round-of-16 matches.
pub fn seed_round_of_16(matches: &[Match], qualified: &HashMap<String, Vec<String>>) -> Vec<Match> {
    let mut seeded = 0usize;
    let out = matches
        .iter()
        .map(|m| {
            if m.stage != Stage::R16 {
                return m.clone();
            }
            let mut next = m.clone();
            for field in [&mut next.home_team, &mut next.away_team] {
                let Slot::GroupQualifier { group, rank } = Slot::parse(field.as_str()) else {
                    continue;
                };
                let team = qualified
                    .get(&group)
                    .and_then(|teams| teams.get(usize::from(rank) - 1));
                if let Some(team) = team {
                    *field = team.clone();
                    seeded += 1;
                }
            }
            next
        })
        .collect();
    tracing::debug!(seeded, "seeded round of 16 from group tables");
    out
}

/// Decided results of `from`, keyed by (position, outcome). A result only
/// counts when the team it names is itself resolved.
pub fn round_results(
    matches: &[Match],
    from: Stage,
    source: &ScoreSource<'_>,
) -> HashMap<(usize, Outcome), String> {
    let mut out = HashMap::new();
    for (idx, i) in stage_order(matches, from).into_iter().enumerate() {
        let m = &matches[i];
        let (home_score, away_score) = source.scores_for(m);
        let Some(decision) = decide_teams(home_score, away_score, &m.home_team, &m.away_team) else {
            continue;
        };
        for (outcome, name) in [(Outcome::Winner, decision.winner), (Outcome::Loser, decision.loser)] {
            if Slot::parse(name).is_resolved() {
                out.insert((idx + 1, outcome), name.to_string());
            }
        }
    }
    out
}

/// Writes decided results of `from` into the stages it feeds.
pub fn advance_round(matches: &[Match], from: Stage, source: &ScoreSource<'_>) -> Vec<Match> {
    let results = round_results(matches, from, source);

    let mut positions: HashMap<usize, usize> = HashMap::new();
    for to in advancement::target_stages(from) {
        for (idx, i) in stage_order(matches, to).into_iter().enumerate() {
            positions.insert(i, idx + 1);
        }
    }

    let mut filled = 0usize;
    let out = matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let Some(&to_position) = positions.get(&i) else {
                return m.clone();
            };
            let mut next = m.clone();
            for field in [&mut next.home_team, &mut next.away_team] {
                let (stage, position, outcome) = match Slot::parse(field.as_str()) {
                    Slot::MatchWinner { stage, position } => (stage, position, Outcome::Winner),
                    Slot::MatchLoser { stage, position } => (stage, position, Outcome::Loser),
                    _ => continue,
                };
                if stage != from
                    || advancement::target_of(from, position, outcome) != Some((m.stage, to_position))
                {
                    continue;
                }
                if let Some(team) = results.get(&(position, outcome)) {
                    *field = team.clone();
                    filled += 1;
                }
            }
            next
        })
        .collect();
    tracing::debug!(stage = %from, decided = results.len(), filled, "advanced round");
    out
}

/// Winner of the final under the given mode, once it is decided.
pub fn champion(resolved: &[Match], source: &ScoreSource<'_>) -> Option<String> {
    round_results(resolved, Stage::Final, source).remove(&(1, Outcome::Winner))
}

/// Predicted brackets for several participants, in input order.
pub fn resolve_for_participants(
    matches: &[Match],
    predictions: &[Prediction],
    participants: &[String],
) -> Vec<(String, Vec<Match>)> {
    participants
        .par_iter()
        .map(|participant| {
            let resolved = resolve_bracket(matches, predictions, participant, Mode::Predicted);
            (participant.clone(), resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, stage: Stage, home: &str, away: &str, score: (u16, u16)) -> Match {
        let mut m = Match::new(id, stage, home, away);
        m.home_score = Some(score.0);
        m.away_score = Some(score.1);
        m
    }

    #[test]
    fn unresolved_winner_is_not_propagated() {
        let matches = vec![
            scored("R16-1", Stage::R16, "TBD A1", "Chile", (2, 0)),
            scored("R16-2", Stage::R16, "Peru", "Chile", (0, 1)),
            Match::new("QF-1", Stage::QF, "Winner R16-1", "Winner R16-2"),
        ];
        let out = advance_round(&matches, Stage::R16, &ScoreSource::Actual);
        assert_eq!(out[2].home_team, "Winner R16-1");
        assert_eq!(out[2].away_team, "Chile");
    }

    #[test]
    fn tokens_from_other_rounds_are_left_alone() {
        let matches = vec![
            scored("R16-1", Stage::R16, "Peru", "Chile", (2, 0)),
            Match::new("QF-1", Stage::QF, "Winner QF-1", "Loser R16-1"),
        ];
        let out = advance_round(&matches, Stage::R16, &ScoreSource::Actual);
        assert_eq!(out[1].home_team, "Winner QF-1");
        assert_eq!(out[1].away_team, "Loser R16-1");
    }

    #[test]
    fn champion_needs_a_decided_final() {
        let drawn = vec![scored("F-1", Stage::Final, "Spain", "Italy", (1, 1))];
        assert_eq!(champion(&drawn, &ScoreSource::Actual), None);
        let won = vec![scored("F-1", Stage::Final, "Spain", "Italy", (1, 0))];
        assert_eq!(champion(&won, &ScoreSource::Actual).as_deref(), Some("Spain"));
    }
}
