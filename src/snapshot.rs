use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bracket::resolve_bracket;
use crate::fixtures::{Match, Prediction};
use crate::outcome::Mode;
use crate::standings::{StandingRow, compute_standings};

/// Read-only view of every match and every participant's predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl Snapshot {
    /// Participant ids that have at least one prediction, sorted.
    pub fn participants(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.predictions.iter().map(|p| p.user_id.clone()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn standings(&self, group: &str, participant_id: &str, mode: Mode) -> Vec<StandingRow> {
        compute_standings(&self.matches, group, mode, &self.predictions, participant_id)
    }

    pub fn resolve(&self, participant_id: &str, mode: Mode) -> Vec<Match> {
        resolve_bracket(&self.matches, &self.predictions, participant_id, mode)
    }

    /// Stable digest of everything a resolution under (`participant_id`, `mode`)
    /// reads. Equal fingerprints mean equal resolved output, so callers can
    /// key a memo on it.
    pub fn fingerprint(&self, participant_id: &str, mode: Mode) -> String {
        let mut hasher = Sha256::new();
        hasher.update(mode.code().as_bytes());
        hasher.update([0u8]);
        for m in &self.matches {
            // Struct fields serialize in declaration order, so this is stable.
            if let Ok(raw) = serde_json::to_vec(m) {
                hasher.update(&raw);
            }
            hasher.update([b'\n']);
        }
        if mode == Mode::Predicted {
            hasher.update(participant_id.as_bytes());
            hasher.update([0u8]);
            for p in self.predictions.iter().filter(|p| p.user_id == participant_id) {
                hasher.update(p.match_id.as_bytes());
                hasher.update([0u8]);
                hasher.update(p.predicted_home_score.to_le_bytes());
                hasher.update(p.predicted_away_score.to_le_bytes());
                hasher.update([b'\n']);
            }
        }
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

pub fn parse_snapshot_json(raw: &str) -> Result<Snapshot> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Snapshot::default());
    }
    serde_json::from_str(trimmed).context("invalid snapshot json")
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let snapshot = parse_snapshot_json(&raw)
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        matches = snapshot.matches.len(),
        predictions = snapshot.predictions.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create snapshot dir {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(snapshot).context("serialize snapshot")?;
    fs::write(&tmp, json).context("write snapshot")?;
    fs::rename(&tmp, path).context("swap snapshot")?;
    Ok(())
}
