//! Thin JSON snapshotting of pipeline artifacts.
//!
//! Persistence is deliberately just files: every artifact is re-derivable
//! from its inputs, so a snapshot is a convenience, not a source of truth.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Write a pipeline artifact as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialising artifact")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "artifact saved");
    Ok(())
}

/// Load a JSON artifact from disk.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notaval_core::{CertificateIntent, CertificateType, SubjectType};

    #[test]
    fn intent_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intent.json");

        let intent = CertificateIntent {
            certificate_type: CertificateType::PersoneriaJuridica,
            purpose: "BPS".to_string(),
            subject_name: "GIRTEC S.A.".to_string(),
            subject_type: SubjectType::PersonaJuridica,
            additional_notes: Some("urgente".to_string()),
        };

        save_json(&path, &intent).unwrap();
        let loaded: CertificateIntent = load_json(&path).unwrap();
        assert_eq!(loaded.subject_name, intent.subject_name);
        assert_eq!(loaded.certificate_type, intent.certificate_type);
        assert_eq!(loaded.additional_notes.as_deref(), Some("urgente"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_json::<CertificateIntent>(Path::new("/nonexistent/intent.json"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("intent.json"));
    }
}
