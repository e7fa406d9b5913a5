use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::demo::DemoOptions;
use crate::outcome::Mode;

/// Where the viewer's snapshot comes from and how to evaluate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub snapshot_path: Option<PathBuf>,
    pub demo: bool,
    pub demo_seed: u64,
    pub participant: Option<String>,
    pub mode: Mode,
}

impl ViewerConfig {
    pub fn from_env_and_args() -> Result<Self> {
        let args = env::args().skip(1).collect::<Vec<_>>();
        Self::from_parts(&args, |key| env::var(key).ok())
    }

    /// Command-line values win over environment values.
    pub fn from_parts(args: &[String], env_var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot_path = arg_value(args, "--snapshot")
            .or_else(|| non_empty(env_var("BRACKET_SNAPSHOT")))
            .map(PathBuf::from);
        let demo = args.iter().any(|a| a == "--demo")
            || env_var("BRACKET_DEMO").is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));
        let demo_seed = match arg_value(args, "--seed").or_else(|| non_empty(env_var("BRACKET_DEMO_SEED"))) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid demo seed {raw:?}"))?,
            None => DemoOptions::default().seed,
        };
        let participant = arg_value(args, "--participant")
            .or_else(|| non_empty(env_var("BRACKET_PARTICIPANT")));
        let mut mode = match arg_value(args, "--mode").or_else(|| non_empty(env_var("BRACKET_MODE"))) {
            Some(raw) => raw.parse::<Mode>().context("invalid evaluation mode")?,
            None => Mode::Actual,
        };

        if snapshot_path.is_none() && !demo {
            return Err(anyhow!("no snapshot: pass --snapshot <path> or --demo"));
        }
        if mode == Mode::Predicted && participant.is_none() {
            tracing::warn!("predicted mode needs a participant; showing actual results");
            mode = Mode::Actual;
        }

        Ok(Self {
            snapshot_path,
            demo,
            demo_seed,
            participant,
            mode,
        })
    }

    pub fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            seed: self.demo_seed,
            ..DemoOptions::default()
        }
    }
}

/// Loads `.env.local` then `.env`; neither is required.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Value of `--name value` or `--name=value`.
pub fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
