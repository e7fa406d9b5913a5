use anyhow::Result;
use chrono::NaiveDateTime;

use wc26_bracket::bracket::{champion, resolve_for_participants, resolve_with_source};
use wc26_bracket::config::{self, ViewerConfig};
use wc26_bracket::demo;
use wc26_bracket::fixtures::{GROUP_LABELS, Match, Stage, stage_matches};
use wc26_bracket::outcome::{Mode, ScoreSource};
use wc26_bracket::slot::is_placeholder;
use wc26_bracket::snapshot::{Snapshot, load_snapshot};
use wc26_bracket::standings::{StandingRow, standings_from_source};

fn main() -> Result<()> {
    config::load_env_files();
    config::init_tracing();

    let cfg = ViewerConfig::from_env_and_args()?;
    let snapshot = match cfg.snapshot_path.as_deref() {
        Some(path) => load_snapshot(path)?,
        None => demo::demo_snapshot(&cfg.demo_options()),
    };
    let participant = cfg.participant.clone().unwrap_or_default();
    let source = ScoreSource::new(cfg.mode, &snapshot.predictions, &participant);

    println!("{}", header_text(&snapshot, &cfg, &participant));
    println!();

    for group in GROUP_LABELS {
        if !snapshot.matches.iter().any(|m| m.in_group(group)) {
            continue;
        }
        let actual = standings_from_source(&snapshot.matches, group, &ScoreSource::Actual);
        println!("Group {group}");
        println!("{}", standings_text("Actual", &actual));
        if cfg.mode == Mode::Predicted {
            let predicted = standings_from_source(&snapshot.matches, group, &source);
            println!("{}", standings_text(&format!("{participant}'s prediction"), &predicted));
        }
        println!();
    }

    let resolved = resolve_with_source(&snapshot.matches, &source);
    for stage in Stage::KNOCKOUT {
        let rows = stage_matches(&resolved, stage);
        if rows.is_empty() {
            continue;
        }
        println!("{}", stage.label());
        for m in rows {
            println!("{}", bracket_line(m, &source));
        }
        println!();
    }
    match champion(&resolved, &source) {
        Some(team) => println!("Champion: {team}"),
        None => println!("Champion: undecided"),
    }

    if cfg.mode == Mode::Actual {
        print!("{}", predicted_champions_text(&snapshot));
    }
    Ok(())
}

fn header_text(snapshot: &Snapshot, cfg: &ViewerConfig, participant: &str) -> String {
    let who = match cfg.mode {
        Mode::Actual => "actual results".to_string(),
        Mode::Predicted => format!("{participant}'s predictions"),
    };
    format!(
        "WC26 Bracket | {who} | {} matches, {} predictions | {}",
        snapshot.matches.len(),
        snapshot.predictions.len(),
        snapshot.fingerprint(participant, cfg.mode)
    )
}

fn standings_text(label: &str, rows: &[StandingRow]) -> String {
    let mut out = vec![
        format!("  {label}"),
        format!(
            "  {:>2} {:<16} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
            "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        ),
    ];
    if rows.is_empty() {
        out.push("  No data".to_string());
    }
    for (idx, row) in rows.iter().enumerate() {
        let gd = if row.goal_diff > 0 {
            format!("+{}", row.goal_diff)
        } else {
            row.goal_diff.to_string()
        };
        // Top two go through.
        let marker = if idx < 2 { '*' } else { ' ' };
        out.push(format!(
            " {marker}{:>2} {:<16} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
            idx + 1,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            gd,
            row.points
        ));
    }
    out.join("\n")
}

fn bracket_line(m: &Match, source: &ScoreSource<'_>) -> String {
    let (home_score, away_score) = source.scores_for(m);
    let score = |s: Option<u16>| s.map_or_else(|| "-".to_string(), |v| v.to_string());
    let team = |name: &str| {
        if is_placeholder(name) {
            format!("({name})")
        } else {
            name.to_string()
        }
    };
    format!(
        "  {:<6} {:<18} {:>20} {} : {} {:<20}",
        m.id,
        format_kickoff(m.match_time.as_deref().unwrap_or_default()),
        team(&m.home_team),
        score(home_score),
        score(away_score),
        team(&m.away_team)
    )
}

fn predicted_champions_text(snapshot: &Snapshot) -> String {
    let participants = snapshot.participants();
    if participants.is_empty() {
        return String::new();
    }
    let brackets = resolve_for_participants(&snapshot.matches, &snapshot.predictions, &participants);
    let mut out = vec![String::new(), "Predicted champions".to_string()];
    for (participant, resolved) in &brackets {
        let source = ScoreSource::new(Mode::Predicted, &snapshot.predictions, participant);
        let pick = champion(resolved, &source).unwrap_or_else(|| "undecided".to_string());
        out.push(format!("  {participant:<16} {pick}"));
    }
    out.push(String::new());
    out.join("\n")
}

fn format_kickoff(raw: &str) -> String {
    if raw.is_empty() {
        return "TBD".to_string();
    }
    let cleaned = raw.trim();
    if let Some(dt) = parse_kickoff(cleaned) {
        return dt.format("%a %d %b %H:%M").to_string();
    }
    cleaned.chars().take(16).collect::<String>().replace('T', " ")
}

fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}
