use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::advancement::{self, Outcome};
use crate::fixtures::{GROUP_LABELS, Match, Prediction, Stage};
use crate::slot::Slot;
use crate::snapshot::Snapshot;

pub const DEMO_TEAMS: [[&str; 4]; 8] = [
    ["Qatar", "Ecuador", "Senegal", "Netherlands"],
    ["England", "Iran", "USA", "Wales"],
    ["Argentina", "Saudi Arabia", "Mexico", "Poland"],
    ["France", "Australia", "Denmark", "Tunisia"],
    ["Spain", "Costa Rica", "Germany", "Japan"],
    ["Belgium", "Canada", "Morocco", "Croatia"],
    ["Brazil", "Serbia", "Switzerland", "Cameroon"],
    ["Portugal", "Ghana", "Uruguay", "South Korea"],
];

// Team index pairs per matchday; two games each.
const GROUP_ROUNDS: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (3, 1)], [(3, 0), (1, 2)]];

// Group winners meet runners-up of the neighbouring group.
const ROUND_OF_16: [(&str, u8, &str, u8); 8] = [
    ("A", 1, "B", 2),
    ("C", 1, "D", 2),
    ("E", 1, "F", 2),
    ("G", 1, "H", 2),
    ("B", 1, "A", 2),
    ("D", 1, "C", 2),
    ("F", 1, "E", 2),
    ("H", 1, "G", 2),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    pub seed: u64,
    pub participants: usize,
    /// Group matchdays with recorded results (0..=3).
    pub group_rounds_played: usize,
    /// Knockout rounds with recorded results (0..=4; the last covers the final
    /// and the third-place match).
    pub knockout_rounds_played: usize,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            seed: 2026,
            participants: 3,
            group_rounds_played: 3,
            knockout_rounds_played: 0,
        }
    }
}

/// Unplayed fixture list: 48 group matches and a 16-team knockout bracket
/// whose slots are placeholders.
pub fn demo_fixtures() -> Vec<Match> {
    let mut out = Vec::new();

    for (g, group) in GROUP_LABELS.iter().enumerate() {
        let teams = DEMO_TEAMS[g];
        for (round, pairs) in GROUP_ROUNDS.iter().enumerate() {
            for (k, (home, away)) in pairs.iter().enumerate() {
                let n = round * 2 + k + 1;
                let mut m = Match::new(&format!("G-{group}-{n}"), Stage::Group, teams[*home], teams[*away]);
                m.group = Some(group.to_string());
                m.match_time = kickoff_text(round as i64 * 4 + (g as i64) / 2, 13 + 3 * k as u32);
                out.push(m);
            }
        }
    }

    for (idx, (home_group, home_rank, away_group, away_rank)) in ROUND_OF_16.iter().enumerate() {
        let home = Slot::GroupQualifier {
            group: home_group.to_string(),
            rank: *home_rank,
        };
        let away = Slot::GroupQualifier {
            group: away_group.to_string(),
            rank: *away_rank,
        };
        let mut m = Match::new(&format!("R16-{}", idx + 1), Stage::R16, &home.to_string(), &away.to_string());
        m.match_time = kickoff_text(14 + idx as i64 / 2, 15 + 4 * (idx % 2) as u32);
        out.push(m);
    }

    for (stage, prefix, count, day) in [
        (Stage::QF, "QF", 4usize, 20i64),
        (Stage::SF, "SF", 2, 24),
        (Stage::ThirdPlace, "3P", 1, 27),
        (Stage::Final, "F", 1, 28),
    ] {
        for position in 1..=count {
            let slots: Vec<String> = advancement::feeders_of(stage, position)
                .into_iter()
                .map(|a| match a.outcome {
                    Outcome::Winner => Slot::MatchWinner {
                        stage: a.from,
                        position: a.position,
                    },
                    Outcome::Loser => Slot::MatchLoser {
                        stage: a.from,
                        position: a.position,
                    },
                })
                .map(|s| s.to_string())
                .collect();
            let (Some(home), Some(away)) = (slots.first(), slots.get(1)) else {
                continue;
            };
            let mut m = Match::new(&format!("{prefix}-{position}"), stage, home, away);
            m.match_time = kickoff_text(day + (position as i64 - 1) / 2, 19);
            out.push(m);
        }
    }

    out
}

/// Demo fixtures with seeded results and predictions for `participants`
/// users named `user-1`, `user-2`, ...
pub fn demo_snapshot(opts: &DemoOptions) -> Snapshot {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut matches = demo_fixtures();

    let knockout_played: Vec<Stage> = [Stage::R16, Stage::QF, Stage::SF]
        .into_iter()
        .chain([Stage::ThirdPlace, Stage::Final])
        .take(match opts.knockout_rounds_played {
            0..=3 => opts.knockout_rounds_played,
            _ => 5,
        })
        .collect();

    for m in &mut matches {
        let played = match m.stage {
            Stage::Group => group_round(&m.id).is_some_and(|r| r < opts.group_rounds_played),
            stage => knockout_played.contains(&stage),
        };
        if played {
            let (home, away) = random_score(&mut rng, m.stage.is_knockout());
            m.home_score = Some(home);
            m.away_score = Some(away);
            m.status = Some("finished".to_string());
        } else {
            m.status = Some("scheduled".to_string());
        }
    }

    let mut predictions = Vec::new();
    for n in 1..=opts.participants {
        let user_id = format!("user-{n}");
        for m in &matches {
            let (home, away) = random_score(&mut rng, m.stage.is_knockout());
            predictions.push(Prediction {
                match_id: m.id.clone(),
                user_id: user_id.clone(),
                predicted_home_score: home,
                predicted_away_score: away,
            });
        }
    }

    tracing::debug!(
        seed = opts.seed,
        matches = matches.len(),
        predictions = predictions.len(),
        "built demo snapshot"
    );
    Snapshot {
        matches,
        predictions,
    }
}

// "G-C-5" -> matchday index 2
fn group_round(id: &str) -> Option<usize> {
    let n = id.rsplit('-').next()?.parse::<usize>().ok()?;
    n.checked_sub(1).map(|i| i / 2)
}

fn random_score(rng: &mut StdRng, knockout: bool) -> (u16, u16) {
    let mut home = rng.gen_range(0..=3u16);
    let mut away = rng.gen_range(0..=3u16);
    if knockout && home == away {
        if rng.gen_bool(0.5) {
            home += 1;
        } else {
            away += 1;
        }
    }
    (home, away)
}

fn kickoff_text(day_offset: i64, hour: u32) -> Option<String> {
    let start = NaiveDate::from_ymd_opt(2026, 6, 11)?;
    let kickoff = (start + ChronoDuration::days(day_offset)).and_hms_opt(hour, 0, 0)?;
    Some(kickoff.format("%Y-%m-%dT%H:%M").to_string())
}
