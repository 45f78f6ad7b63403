//! Artifact loading: the exported tables read once into an immutable store.
//!
//! The upstream notebook pipeline exports seven tabular files plus a JSON
//! manifest into `<root>/data/exports/dashboard/`:
//!
//! - [`model::Document`] — `docs.parquet` (required)
//! - [`model::Topic`] — `topics.parquet` (required) and `topics_current.parquet` (optional)
//! - [`model::DocumentTopic`] — `doc_topics.parquet` (required)
//! - [`model::TopicTrend`] — `topic_trends.parquet` (required)
//! - [`model::AdvisorProfile`] — `advisor_profiles.parquet` (required)
//! - [`model::AdvisorTopic`] — `advisor_topics.parquet` (required)
//! - [`manifest::Manifest`] — `_manifest.json` (optional)
//!
//! [`ArtifactStore::load`] runs once per process; the resulting store is
//! shared read-only by every page renderer.

pub mod manifest;
pub mod model;
mod parquet;

use std::collections::HashMap;
use std::time::Instant;

use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use manifest::Manifest;
pub use model::{
    AdvisorProfile, AdvisorTopic, Document, DocumentTopic, Topic, TopicId, TopicTrend,
};

use crate::paths::ProjectPaths;

pub const DOCS_FILE: &str = "docs.parquet";
pub const TOPICS_FILE: &str = "topics.parquet";
pub const TOPICS_CURRENT_FILE: &str = "topics_current.parquet";
pub const DOC_TOPICS_FILE: &str = "doc_topics.parquet";
pub const TOPIC_TRENDS_FILE: &str = "topic_trends.parquet";
pub const ADVISOR_PROFILES_FILE: &str = "advisor_profiles.parquet";
pub const ADVISOR_TOPICS_FILE: &str = "advisor_topics.parquet";
pub const MANIFEST_FILE: &str = "_manifest.json";

/// Errors from artifact loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ArtifactError {
    #[error("missing artifact \"{name}\" in {dir}")]
    #[diagnostic(
        code(temascope::artifact::missing),
        help(
            "The dashboard expects the full export set in `data/exports/dashboard/` \
             under the project root. Re-run the export step of the modeling \
             notebooks to regenerate it."
        )
    )]
    MissingArtifact { name: String, dir: String },

    #[error("malformed artifact \"{name}\": {message}")]
    #[diagnostic(
        code(temascope::artifact::malformed),
        help(
            "The file exists but could not be decoded as parquet with the expected \
             columns. It may be truncated or from an incompatible export version; \
             re-run the export step."
        )
    )]
    Malformed { name: String, message: String },
}

pub type ArtifactResult<T> = std::result::Result<T, ArtifactError>;

/// Raw table contents of one export batch, before indexing.
///
/// [`ArtifactStore::load`] fills this from disk; tests and embedders can
/// build one directly and pass it to [`ArtifactStore::from_parts`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactTables {
    pub documents: Vec<Document>,
    pub topics: Vec<Topic>,
    pub topics_current: Vec<Topic>,
    pub doc_topics: Vec<DocumentTopic>,
    pub topic_trends: Vec<TopicTrend>,
    pub advisor_profiles: Vec<AdvisorProfile>,
    pub advisor_topics: Vec<AdvisorTopic>,
    pub manifest: Manifest,
}

/// Row counts per loaded table, for the status endpoint and `info` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCounts {
    pub documents: usize,
    pub topics: usize,
    pub topics_current: usize,
    pub doc_topics: usize,
    pub topic_trends: usize,
    pub advisor_profiles: usize,
    pub advisor_topics: usize,
}

/// Immutable in-memory view of one export batch with lookup indexes.
///
/// Join relations may reference identifiers absent from their parent tables;
/// lookups return `None` for those instead of failing.
pub struct ArtifactStore {
    tables: ArtifactTables,
    doc_index: HashMap<String, usize>,
    profile_index: HashMap<String, usize>,
    topic_labels: HashMap<TopicId, String>,
}

impl ArtifactStore {
    /// Read the whole export batch from disk. The six required files fail the
    /// load when absent; `topics_current.parquet` degrades to an empty table
    /// and `_manifest.json` to an empty manifest.
    pub fn load(paths: &ProjectPaths) -> ArtifactResult<Self> {
        let started = Instant::now();
        let tables = ArtifactTables {
            documents: load_required(paths, DOCS_FILE)?,
            topics: load_required(paths, TOPICS_FILE)?,
            doc_topics: load_required(paths, DOC_TOPICS_FILE)?,
            topic_trends: load_required(paths, TOPIC_TRENDS_FILE)?,
            advisor_profiles: load_required(paths, ADVISOR_PROFILES_FILE)?,
            advisor_topics: load_required(paths, ADVISOR_TOPICS_FILE)?,
            topics_current: load_optional(paths, TOPICS_CURRENT_FILE)?,
            manifest: load_manifest(paths),
        };

        let store = Self::from_parts(tables);
        let counts = store.table_counts();
        tracing::info!(
            documents = counts.documents,
            topics = counts.topics,
            topics_current = counts.topics_current,
            doc_topics = counts.doc_topics,
            topic_trends = counts.topic_trends,
            advisor_profiles = counts.advisor_profiles,
            advisor_topics = counts.advisor_topics,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "artifacts loaded from {}",
            paths.export_dir.display()
        );

        if let Some(generated) = store.manifest().generated_time() {
            let age_days = (chrono::Utc::now() - generated).num_days();
            tracing::info!(generated_at = %generated, age_days, "export batch");
        }
        if let Some(expected) = store
            .manifest()
            .corpus
            .as_ref()
            .and_then(|c| c.n_docs)
        {
            if expected as usize != counts.documents {
                tracing::warn!(
                    manifest = expected,
                    loaded = counts.documents,
                    "manifest document count disagrees with docs table"
                );
            }
        }

        Ok(store)
    }

    /// Build a store from already-loaded tables, computing the lookup indexes.
    pub fn from_parts(tables: ArtifactTables) -> Self {
        let doc_index = tables
            .documents
            .iter()
            .enumerate()
            .map(|(i, d)| (d.doc_id.clone(), i))
            .collect();
        let profile_index = tables
            .advisor_profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.advisor_id.clone(), i))
            .collect();
        let active = if tables.topics_current.is_empty() {
            &tables.topics
        } else {
            &tables.topics_current
        };
        let topic_labels = active
            .iter()
            .map(|t| (t.topic, t.label.clone()))
            .collect();

        Self {
            tables,
            doc_index,
            profile_index,
            topic_labels,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.tables.documents
    }

    /// The active topic set: `topics_current` when the export shipped one,
    /// otherwise the full `topics` table.
    pub fn topics(&self) -> &[Topic] {
        if self.tables.topics_current.is_empty() {
            &self.tables.topics
        } else {
            &self.tables.topics_current
        }
    }

    pub fn doc_topics(&self) -> &[DocumentTopic] {
        &self.tables.doc_topics
    }

    pub fn topic_trends(&self) -> &[TopicTrend] {
        &self.tables.topic_trends
    }

    pub fn advisor_profiles(&self) -> &[AdvisorProfile] {
        &self.tables.advisor_profiles
    }

    pub fn advisor_topics(&self) -> &[AdvisorTopic] {
        &self.tables.advisor_topics
    }

    pub fn manifest(&self) -> &Manifest {
        &self.tables.manifest
    }

    /// Look up a document by identifier.
    pub fn document(&self, doc_id: &str) -> Option<&Document> {
        self.doc_index.get(doc_id).map(|&i| &self.tables.documents[i])
    }

    /// Look up an advisor profile by identifier.
    pub fn profile(&self, advisor_id: &str) -> Option<&AdvisorProfile> {
        self.profile_index
            .get(advisor_id)
            .map(|&i| &self.tables.advisor_profiles[i])
    }

    /// Label of a topic in the active set, if it has one.
    pub fn topic_label(&self, topic: TopicId) -> Option<&str> {
        self.topic_labels.get(&topic).map(String::as_str)
    }

    pub fn table_counts(&self) -> TableCounts {
        TableCounts {
            documents: self.tables.documents.len(),
            topics: self.tables.topics.len(),
            topics_current: self.tables.topics_current.len(),
            doc_topics: self.tables.doc_topics.len(),
            topic_trends: self.tables.topic_trends.len(),
            advisor_profiles: self.tables.advisor_profiles.len(),
            advisor_topics: self.tables.advisor_topics.len(),
        }
    }
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("counts", &self.table_counts())
            .finish()
    }
}

fn load_required<T: DeserializeOwned>(paths: &ProjectPaths, name: &str) -> ArtifactResult<Vec<T>> {
    let path = paths.artifact(name);
    if !path.is_file() {
        return Err(ArtifactError::MissingArtifact {
            name: name.to_string(),
            dir: paths.export_dir.display().to_string(),
        });
    }
    parquet::read_rows(name, &path)
}

fn load_optional<T: DeserializeOwned>(paths: &ProjectPaths, name: &str) -> ArtifactResult<Vec<T>> {
    let path = paths.artifact(name);
    if !path.is_file() {
        tracing::debug!(artifact = name, "optional artifact absent, using empty table");
        return Ok(Vec::new());
    }
    parquet::read_rows(name, &path)
}

fn load_manifest(paths: &ProjectPaths) -> Manifest {
    let path = paths.artifact(MANIFEST_FILE);
    if !path.is_file() {
        tracing::debug!("manifest absent, continuing without it");
        return Manifest::default();
    }
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable manifest, continuing without it");
            return Manifest::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(error = %e, "malformed manifest, continuing without it");
            Manifest::default()
        }
    }
}
