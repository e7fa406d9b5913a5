use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::slot::Slot;

/// Group labels seeded into the round of 16, in bracket order.
pub const GROUP_LABELS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Group,
    R16,
    QF,
    SF,
    #[serde(rename = "3P", alias = "ThirdPlace")]
    ThirdPlace,
    Final,
}

impl Stage {
    /// Knockout stages in the order a bracket view lists them.
    pub const KNOCKOUT: [Stage; 5] = [
        Stage::R16,
        Stage::QF,
        Stage::SF,
        Stage::ThirdPlace,
        Stage::Final,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Stage::Group => "Group",
            Stage::R16 => "R16",
            Stage::QF => "QF",
            Stage::SF => "SF",
            Stage::ThirdPlace => "3P",
            Stage::Final => "Final",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Group => "Group Stage",
            Stage::R16 => "Round of 16",
            Stage::QF => "Quarterfinals",
            Stage::SF => "Semifinals",
            Stage::ThirdPlace => "Third Place",
            Stage::Final => "Final",
        }
    }

    pub fn is_knockout(self) -> bool {
        self != Stage::Group
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Group" => Ok(Stage::Group),
            "R16" => Ok(Stage::R16),
            "QF" => Ok(Stage::QF),
            "SF" => Ok(Stage::SF),
            "3P" | "ThirdPlace" => Ok(Stage::ThirdPlace),
            "Final" => Ok(Stage::Final),
            other => Err(anyhow!("unknown stage code {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub home_score: Option<u16>,
    #[serde(default)]
    pub away_score: Option<u16>,
    // Kickoff text as stored upstream; only the viewer reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Match {
    pub fn new(id: &str, stage: Stage, home_team: &str, away_team: &str) -> Self {
        Self {
            id: id.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            stage,
            group: None,
            home_score: None,
            away_score: None,
            match_time: None,
            status: None,
        }
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.stage == Stage::Group && self.group.as_deref() == Some(group)
    }

    /// Recorded result, present only once both scores are in.
    pub fn actual_scores(&self) -> Option<(u16, u16)> {
        let (Some(home), Some(away)) = (self.home_score, self.away_score) else {
            return None;
        };
        Some((home, away))
    }

    pub fn home_slot(&self) -> Slot {
        Slot::parse(&self.home_team)
    }

    pub fn away_slot(&self) -> Slot {
        Slot::parse(&self.away_team)
    }

    pub fn is_resolved(&self) -> bool {
        self.home_slot().is_resolved() && self.away_slot().is_resolved()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub match_id: String,
    pub user_id: String,
    pub predicted_home_score: u16,
    pub predicted_away_score: u16,
}

impl Prediction {
    pub fn scores(&self) -> (u16, u16) {
        (self.predicted_home_score, self.predicted_away_score)
    }
}

/// Indices of `matches` in `stage`, ordered by id. Position `n` (1-based) of a
/// knockout match is its index in this list plus one.
pub fn stage_order(matches: &[Match], stage: Stage) -> Vec<usize> {
    let mut idx: Vec<usize> = matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.stage == stage)
        .map(|(i, _)| i)
        .collect();
    idx.sort_by(|a, b| matches[*a].id.cmp(&matches[*b].id));
    idx
}

/// Matches of one stage sorted by id, as a bracket column shows them.
pub fn stage_matches(matches: &[Match], stage: Stage) -> Vec<&Match> {
    stage_order(matches, stage)
        .into_iter()
        .map(|i| &matches[i])
        .collect()
}
