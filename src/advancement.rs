use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::fixtures::Stage;
use crate::outcome::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner,
    Loser,
}

/// One edge of the bracket: the `outcome` of match `position` in `from`
/// fills the `side` slot of match `to_position` in `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advancement {
    pub from: Stage,
    pub position: usize,
    pub outcome: Outcome,
    pub to: Stage,
    pub to_position: usize,
    pub side: Side,
}

struct AdvancementTable {
    rows: Vec<Advancement>,
    by_source: HashMap<(Stage, usize, Outcome), (Stage, usize)>,
}

static TABLE: Lazy<AdvancementTable> = Lazy::new(|| {
    let mut rows = Vec::new();
    // Adjacent pairs move up: 1,2 -> 1; 3,4 -> 2; ...
    for (from, to, feeders) in [(Stage::R16, Stage::QF, 8), (Stage::QF, Stage::SF, 4)] {
        for position in 1..=feeders {
            rows.push(Advancement {
                from,
                position,
                outcome: Outcome::Winner,
                to,
                to_position: position.div_ceil(2),
                side: if position % 2 == 1 { Side::Home } else { Side::Away },
            });
        }
    }
    for (outcome, to) in [(Outcome::Winner, Stage::Final), (Outcome::Loser, Stage::ThirdPlace)] {
        for position in 1..=2 {
            rows.push(Advancement {
                from: Stage::SF,
                position,
                outcome,
                to,
                to_position: 1,
                side: if position == 1 { Side::Home } else { Side::Away },
            });
        }
    }

    let by_source = rows
        .iter()
        .map(|a| ((a.from, a.position, a.outcome), (a.to, a.to_position)))
        .collect();
    AdvancementTable { rows, by_source }
});

pub fn advancements() -> &'static [Advancement] {
    &TABLE.rows
}

/// Match that the given result moves into, as (stage, position).
pub fn target_of(from: Stage, position: usize, outcome: Outcome) -> Option<(Stage, usize)> {
    TABLE.by_source.get(&(from, position, outcome)).copied()
}

/// Stages filled from results of `from`.
pub fn target_stages(from: Stage) -> Vec<Stage> {
    let mut out: Vec<Stage> = advancements()
        .iter()
        .filter(|a| a.from == from)
        .map(|a| a.to)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Edges feeding match `to_position` of `to`, home side first.
pub fn feeders_of(to: Stage, to_position: usize) -> Vec<Advancement> {
    let mut out: Vec<Advancement> = advancements()
        .iter()
        .filter(|a| a.to == to && a.to_position == to_position)
        .copied()
        .collect();
    out.sort_by_key(|a| (a.side != Side::Home, a.position));
    out
}
