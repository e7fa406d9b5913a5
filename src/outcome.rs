use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::fixtures::{Match, Prediction};

/// Which scores drive a view: recorded results or one participant's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Actual,
    Predicted,
}

impl Mode {
    pub fn code(self) -> &'static str {
        match self {
            Mode::Actual => "actual",
            Mode::Predicted => "predicted",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "actual" => Ok(Mode::Actual),
            "predicted" | "prediction" => Ok(Mode::Predicted),
            other => Err(anyhow!("unknown mode {other:?} (expected actual|predicted)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
}

/// Side with the strictly higher score. A missing score or a draw decides
/// nothing; knockout draws are not settled by a shootout here.
pub fn decide(home_score: Option<u16>, away_score: Option<u16>) -> Option<Side> {
    let (Some(home), Some(away)) = (home_score, away_score) else {
        return None;
    };
    if home > away {
        Some(Side::Home)
    } else if away > home {
        Some(Side::Away)
    } else {
        None
    }
}

pub fn decide_teams<'a>(
    home_score: Option<u16>,
    away_score: Option<u16>,
    home_team: &'a str,
    away_team: &'a str,
) -> Option<Decision<'a>> {
    match decide(home_score, away_score)? {
        Side::Home => Some(Decision {
            winner: home_team,
            loser: away_team,
        }),
        Side::Away => Some(Decision {
            winner: away_team,
            loser: home_team,
        }),
    }
}

/// One participant's predictions keyed by match id.
///
/// When a participant has more than one prediction for a match, the first in
/// input order is kept.
#[derive(Debug, Clone, Default)]
pub struct PredictionBook<'a> {
    scores: HashMap<&'a str, (u16, u16)>,
}

impl<'a> PredictionBook<'a> {
    pub fn for_participant(predictions: &'a [Prediction], participant_id: &'a str) -> Self {
        let mut scores: HashMap<&'a str, (u16, u16)> = HashMap::new();
        for p in predictions.iter().filter(|p| p.user_id == participant_id) {
            if scores.contains_key(p.match_id.as_str()) {
                tracing::debug!(
                    participant = participant_id,
                    match_id = %p.match_id,
                    "ignoring duplicate prediction"
                );
                continue;
            }
            scores.insert(p.match_id.as_str(), p.scores());
        }
        Self { scores }
    }

    pub fn get(&self, match_id: &str) -> Option<(u16, u16)> {
        self.scores.get(match_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Score lookup for one evaluation mode.
#[derive(Debug, Clone)]
pub enum ScoreSource<'a> {
    Actual,
    Predicted(PredictionBook<'a>),
}

impl<'a> ScoreSource<'a> {
    pub fn new(mode: Mode, predictions: &'a [Prediction], participant_id: &'a str) -> Self {
        match mode {
            Mode::Actual => ScoreSource::Actual,
            Mode::Predicted => {
                ScoreSource::Predicted(PredictionBook::for_participant(predictions, participant_id))
            }
        }
    }

    /// Score pair for `m` under this mode; this is also what a viewer shows
    /// next to the match.
    pub fn scores_for(&self, m: &Match) -> (Option<u16>, Option<u16>) {
        match self {
            ScoreSource::Actual => (m.home_score, m.away_score),
            ScoreSource::Predicted(book) => match book.get(&m.id) {
                Some((home, away)) => (Some(home), Some(away)),
                None => (None, None),
            },
        }
    }

    pub fn complete_scores(&self, m: &Match) -> Option<(u16, u16)> {
        let (Some(home), Some(away)) = self.scores_for(m) else {
            return None;
        };
        Some((home, away))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Stage;

    fn prediction(match_id: &str, user_id: &str, home: u16, away: u16) -> Prediction {
        Prediction {
            match_id: match_id.to_string(),
            user_id: user_id.to_string(),
            predicted_home_score: home,
            predicted_away_score: away,
        }
    }

    #[test]
    fn draws_and_missing_scores_decide_nothing() {
        assert_eq!(decide(Some(1), Some(1)), None);
        assert_eq!(decide(None, Some(1)), None);
        assert_eq!(decide(Some(0), None), None);
        assert_eq!(decide_teams(Some(2), Some(2), "A", "B"), None);
        assert_eq!(decide_teams(None, None, "A", "B"), None);
    }

    #[test]
    fn higher_score_wins() {
        let d = decide_teams(Some(0), Some(3), "Spain", "Japan").unwrap();
        assert_eq!(d.winner, "Japan");
        assert_eq!(d.loser, "Spain");
        assert_eq!(decide(Some(2), Some(1)), Some(Side::Home));
    }

    #[test]
    fn first_duplicate_prediction_wins() {
        let preds = vec![
            prediction("m1", "u1", 1, 0),
            prediction("m1", "u2", 5, 5),
            prediction("m1", "u1", 0, 4),
        ];
        let book = PredictionBook::for_participant(&preds, "u1");
        assert_eq!(book.len(), 1);
        assert!(PredictionBook::for_participant(&preds, "u9").is_empty());
        assert_eq!(book.get("m1"), Some((1, 0)));
    }

    #[test]
    fn predicted_source_ignores_recorded_scores() {
        let mut m = Match::new("m2", Stage::R16, "A", "B");
        m.home_score = Some(3);
        m.away_score = Some(0);
        let preds = vec![prediction("m1", "u1", 1, 0)];
        let source = ScoreSource::new(Mode::Predicted, &preds, "u1");
        assert_eq!(source.scores_for(&m), (None, None));
        assert_eq!(ScoreSource::Actual.complete_scores(&m), Some((3, 0)));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Predicted".parse::<Mode>().unwrap(), Mode::Predicted);
        assert_eq!(" actual ".parse::<Mode>().unwrap(), Mode::Actual);
        assert!("live".parse::<Mode>().is_err());
    }
}
