//! Export-batch manifest (`_manifest.json`).
//!
//! Descriptive metadata written by the upstream pipeline next to the tables.
//! Used only for display and soft validation; a missing or malformed manifest
//! degrades to [`Manifest::default`], never to an error.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about one export batch. Every field is optional; unknown fields
/// are ignored so newer exports stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// When the export ran, as written by the pipeline.
    pub generated_at: Option<String>,
    pub schema_version: Option<String>,
    /// Which model run the artifacts come from.
    pub selection: Option<ModelSelection>,
    /// Corpus-level counts for cross-checking the loaded tables.
    pub corpus: Option<CorpusSummary>,
}

/// Model-selection block of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelection {
    pub method: Option<String>,
    pub run: Option<String>,
    pub trial: Option<i64>,
    /// Number of topics the selected model produced.
    #[serde(rename = "K")]
    pub k: Option<i64>,
    /// Outlier fraction the selection step reported, in `0..=1`.
    pub reported_outliers_pct: Option<f64>,
}

/// Corpus block of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSummary {
    pub n_docs: Option<i64>,
    pub years: Option<YearBounds>,
}

/// Year range of the exported corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl Manifest {
    /// Whether the manifest carries no information at all (missing file,
    /// unparseable file, or an empty object).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse `generated_at` tolerantly. The pipeline writes RFC 3339, but
    /// older exports used a plain naive timestamp.
    pub fn generated_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.generated_at.as_deref()?;
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(t.and_utc());
            }
        }
        None
    }
}
