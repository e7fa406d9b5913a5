use wc26_bracket::demo::{DemoOptions, demo_snapshot};
use wc26_bracket::fixtures::{GROUP_LABELS, Match, Prediction, Stage};
use wc26_bracket::outcome::Mode;
use wc26_bracket::standings::{StandingRow, compute_standings};

fn group_match(id: &str, group: &str, home: &str, away: &str, score: Option<(u16, u16)>) -> Match {
    let mut m = Match::new(id, Stage::Group, home, away);
    m.group = Some(group.to_string());
    if let Some((h, a)) = score {
        m.home_score = Some(h);
        m.away_score = Some(a);
    }
    m
}

fn prediction(match_id: &str, user_id: &str, home: u16, away: u16) -> Prediction {
    Prediction {
        match_id: match_id.to_string(),
        user_id: user_id.to_string(),
        predicted_home_score: home,
        predicted_away_score: away,
    }
}

fn group_a_partial() -> Vec<Match> {
    vec![
        group_match("G-A-1", "A", "Argentina", "Mexico", Some((2, 0))),
        group_match("G-A-2", "A", "Poland", "Argentina", Some((1, 1))),
        group_match("G-A-3", "A", "Mexico", "Poland", None),
    ]
}

fn summary(rows: &[StandingRow]) -> Vec<(&str, u32, i32, u32)> {
    rows.iter()
        .map(|r| (r.team.as_str(), r.points, r.goal_diff, r.goals_for))
        .collect()
}

#[test]
fn partial_group_orders_by_points() {
    let rows = compute_standings(&group_a_partial(), "A", Mode::Actual, &[], "");
    assert_eq!(
        summary(&rows),
        vec![("Argentina", 4, 2, 3), ("Poland", 1, 0, 1), ("Mexico", 0, -2, 0)]
    );
    assert_eq!(rows[0].played, 2);
    assert_eq!(rows[2].played, 1);
}

#[test]
fn unplayed_group_lists_every_team_once() {
    let matches = vec![
        group_match("G-B-1", "B", "Wales", "USA", None),
        group_match("G-B-2", "B", "England", "Iran", None),
        group_match("G-B-3", "B", "Wales", "England", None),
        // Other groups do not leak in.
        group_match("G-C-1", "C", "Mexico", "Poland", Some((1, 0))),
    ];
    let rows = compute_standings(&matches, "B", Mode::Actual, &[], "");
    let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, vec!["England", "Iran", "USA", "Wales"]);
    assert!(rows.iter().all(|r| r.points == 0 && r.played == 0));
}

#[test]
fn unknown_group_is_empty() {
    assert!(compute_standings(&group_a_partial(), "Z", Mode::Actual, &[], "").is_empty());
    assert!(compute_standings(&[], "A", Mode::Predicted, &[], "u1").is_empty());
}

#[test]
fn tie_breaks_fall_through_goal_difference_then_goals_then_name() {
    let matches = vec![
        // Every team ends on 3 points.
        group_match("G-D-1", "D", "France", "Tunisia", Some((3, 0))),
        group_match("G-D-2", "D", "Denmark", "Australia", Some((4, 1))),
        group_match("G-D-3", "D", "Tunisia", "Denmark", Some((1, 0))),
        group_match("G-D-4", "D", "Australia", "France", Some((1, 0))),
    ];
    let rows = compute_standings(&matches, "D", Mode::Actual, &[], "");
    // France +2 (3 scored), Denmark +2 (4 scored), Australia -2, Tunisia -2.
    assert_eq!(
        summary(&rows),
        vec![
            ("Denmark", 3, 2, 4),
            ("France", 3, 2, 3),
            ("Australia", 3, -2, 2),
            ("Tunisia", 3, -2, 1),
        ]
    );

    let level = vec![
        group_match("G-E-1", "E", "Spain", "Japan", Some((1, 1))),
        group_match("G-E-2", "E", "Germany", "Costa Rica", Some((1, 1))),
    ];
    let rows = compute_standings(&level, "E", Mode::Actual, &[], "");
    let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, vec!["Costa Rica", "Germany", "Japan", "Spain"]);
}

#[test]
fn predicted_mode_reads_only_the_participants_predictions() {
    let predictions = vec![
        prediction("G-A-3", "u1", 3, 0),
        prediction("G-A-3", "u1", 0, 5),
        prediction("G-A-1", "u2", 0, 1),
    ];
    let rows = compute_standings(&group_a_partial(), "A", Mode::Predicted, &predictions, "u1");
    assert_eq!(
        summary(&rows),
        vec![("Mexico", 3, 3, 3), ("Argentina", 0, 0, 0), ("Poland", 0, -3, 0)]
    );

    let nobody = compute_standings(&group_a_partial(), "A", Mode::Predicted, &predictions, "u9");
    assert!(nobody.iter().all(|r| r.points == 0 && r.goals_for == 0));
    assert_eq!(nobody.len(), 3);
}

#[test]
fn completed_matches_award_two_or_three_points() {
    let snapshot = demo_snapshot(&DemoOptions::default());
    for group in GROUP_LABELS {
        let rows = compute_standings(&snapshot.matches, group, Mode::Actual, &[], "");
        let (mut decisive, mut drawn) = (0u32, 0u32);
        for m in snapshot.matches.iter().filter(|m| m.in_group(group)) {
            let (home, away) = m.actual_scores().expect("demo groups are fully played");
            if home == away {
                drawn += 1;
            } else {
                decisive += 1;
            }
        }
        let total: u32 = rows.iter().map(|r| r.points).sum();
        assert_eq!(total, 3 * decisive + 2 * drawn, "group {group}");
        let gd: i32 = rows.iter().map(|r| r.goal_diff).sum();
        assert_eq!(gd, 0, "group {group}");
    }
}

#[test]
fn standings_are_reproducible() {
    let snapshot = demo_snapshot(&DemoOptions::default());
    for mode in [Mode::Actual, Mode::Predicted] {
        let first = compute_standings(&snapshot.matches, "C", mode, &snapshot.predictions, "user-2");
        for _ in 0..5 {
            let again = compute_standings(&snapshot.matches, "C", mode, &snapshot.predictions, "user-2");
            assert_eq!(first, again);
        }
    }
}
