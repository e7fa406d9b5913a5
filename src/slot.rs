use std::fmt;

use crate::fixtures::Stage;

/// Typed reading of a team-name field.
///
/// Fixtures store knockout slots as text (`"TBD A1"`, `"Winner R16-3"`,
/// `"Loser SF-2"`). Parsing never fails: anything outside the placeholder
/// grammar is a concrete team name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Team(String),
    GroupQualifier { group: String, rank: u8 },
    MatchWinner { stage: Stage, position: usize },
    MatchLoser { stage: Stage, position: usize },
}

impl Slot {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix("TBD ") {
            if let Some(slot) = parse_group_qualifier(rest) {
                return slot;
            }
        } else if let Some(rest) = trimmed.strip_prefix("Winner ") {
            if let Some((stage, position)) = parse_match_ref(rest) {
                return Slot::MatchWinner { stage, position };
            }
        } else if let Some(rest) = trimmed.strip_prefix("Loser ") {
            if let Some((stage, position)) = parse_match_ref(rest) {
                return Slot::MatchLoser { stage, position };
            }
        }
        Slot::Team(raw.to_string())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Slot::Team(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Team(name) => f.write_str(name),
            Slot::GroupQualifier { group, rank } => write!(f, "TBD {group}{rank}"),
            Slot::MatchWinner { stage, position } => write!(f, "Winner {stage}-{position}"),
            Slot::MatchLoser { stage, position } => write!(f, "Loser {stage}-{position}"),
        }
    }
}

/// True when `raw` still carries placeholder text.
pub fn is_placeholder(raw: &str) -> bool {
    !Slot::parse(raw).is_resolved()
}

// "A1" -> group "A", rank 1
fn parse_group_qualifier(raw: &str) -> Option<Slot> {
    let split = raw.find(|ch: char| ch.is_ascii_digit())?;
    let (group, rank) = raw.split_at(split);
    if group.is_empty() || !group.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    let rank = rank.parse::<u8>().ok().filter(|r| *r >= 1)?;
    Some(Slot::GroupQualifier {
        group: group.to_string(),
        rank,
    })
}

// "R16-3" -> (R16, 3)
fn parse_match_ref(raw: &str) -> Option<(Stage, usize)> {
    let (stage, position) = raw.rsplit_once('-')?;
    let stage = stage.parse::<Stage>().ok().filter(|s| s.is_knockout())?;
    let position = position.parse::<usize>().ok().filter(|p| *p >= 1)?;
    Some((stage, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placeholder_grammar() {
        assert_eq!(
            Slot::parse("TBD C2"),
            Slot::GroupQualifier {
                group: "C".to_string(),
                rank: 2
            }
        );
        assert_eq!(
            Slot::parse("Winner R16-7"),
            Slot::MatchWinner {
                stage: Stage::R16,
                position: 7
            }
        );
        assert_eq!(
            Slot::parse("Loser SF-1"),
            Slot::MatchLoser {
                stage: Stage::SF,
                position: 1
            }
        );
    }

    #[test]
    fn unrecognised_text_is_a_team() {
        for raw in [
            "France",
            "TBD",
            "TBD 1",
            "Winner",
            "Winner R16-x",
            "Winner Group-1",
            "Loser SF-0",
            "Winner R16-1 or Chile",
            "Provisional TBD A1",
        ] {
            assert_eq!(Slot::parse(raw), Slot::Team(raw.to_string()), "{raw}");
        }
    }

    #[test]
    fn display_writes_placeholder_text() {
        for raw in ["TBD H1", "Winner QF-4", "Loser SF-2", "Winner 3P-1"] {
            assert_eq!(Slot::parse(raw).to_string(), raw);
        }
        assert!(is_placeholder("Winner SF-1"));
        assert!(!is_placeholder("Brazil"));
    }
}
