use std::path::PathBuf;

use anyhow::{Context, Result};

use wc26_bracket::config::{self, arg_value};
use wc26_bracket::demo::{self, DemoOptions};
use wc26_bracket::snapshot::save_snapshot;

fn main() -> Result<()> {
    config::load_env_files();
    config::init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let out_path = arg_value(&args, "--out")
        .map(PathBuf::from)
        .context("missing --out <path>")?;

    let defaults = DemoOptions::default();
    let opts = DemoOptions {
        seed: parse_arg(&args, "--seed")?.unwrap_or(defaults.seed),
        participants: parse_arg(&args, "--participants")?.unwrap_or(defaults.participants),
        group_rounds_played: parse_arg(&args, "--group-rounds")?
            .unwrap_or(defaults.group_rounds_played)
            .min(3),
        knockout_rounds_played: parse_arg(&args, "--knockout-rounds")?
            .unwrap_or(defaults.knockout_rounds_played)
            .min(4),
    };

    let snapshot = demo::demo_snapshot(&opts);
    save_snapshot(&out_path, &snapshot)?;

    println!("Demo snapshot written");
    println!("Path: {}", out_path.display());
    println!("Seed: {}", opts.seed);
    println!(
        "Matches: {} ({} with results)",
        snapshot.matches.len(),
        snapshot
            .matches
            .iter()
            .filter(|m| m.actual_scores().is_some())
            .count()
    );
    println!(
        "Predictions: {} across {} participants",
        snapshot.predictions.len(),
        snapshot.participants().len()
    );

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], name: &str) -> Result<Option<T>> {
    let Some(raw) = arg_value(args, name) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| anyhow::anyhow!("invalid value {raw:?} for {name}"))
}
