//! Typed records for the exported tables.
//!
//! Column names are fixed by the upstream export pipeline (Portuguese);
//! the structs map them to idiomatic field names via serde renames, which
//! is also what binds them to the parquet column names on read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a discovered topic. `-1` is the outlier bucket: documents
/// the model assigned to no topic. It appears in join tables but never in
/// the topic tables themselves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TopicId(pub i64);

impl TopicId {
    /// The outlier bucket.
    pub const OUTLIER: TopicId = TopicId(-1);

    pub fn is_outlier(self) -> bool {
        self == Self::OUTLIER
    }

    /// `[id] label` display form used by select controls and chart legends.
    pub fn display_with(self, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("[{}] {label}", self.0),
            None => format!("[{}]", self.0),
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for TopicId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One thesis record (`docs.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable document identifier.
    #[serde(rename = "DOC_ID")]
    pub doc_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Defense year; absent for records the scraper could not date.
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    #[serde(rename = "orientador_id")]
    pub advisor_id: Option<String>,
    #[serde(rename = "orientador_nome")]
    pub advisor_name: Option<String>,
    pub url: Option<String>,
}

/// One discovered theme (`topics.parquet` / `topics_current.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: TopicId,
    pub label: String,
    /// Top terms of the topic, pre-joined into a display string upstream.
    pub keywords: String,
}

/// Document-to-topic assignment with its weight (`doc_topics.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopic {
    #[serde(rename = "DOC_ID")]
    pub doc_id: String,
    pub topic: TopicId,
    /// Participation weight of the document in the topic.
    #[serde(rename = "prob")]
    pub weight: f64,
}

/// Per-year participation of a topic (`topic_trends.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTrend {
    pub topic: TopicId,
    #[serde(rename = "ano")]
    pub year: i32,
    /// Share of that year's documents assigned to the topic.
    pub share: f64,
    #[serde(rename = "n_docs")]
    pub documents: i64,
}

/// One advisor with precomputed aggregates (`advisor_profiles.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorProfile {
    #[serde(rename = "orientador_id")]
    pub advisor_id: String,
    #[serde(rename = "orientador_nome")]
    pub name: String,
    /// Number of supervised theses.
    #[serde(rename = "n_tccs")]
    pub documents: i64,
    /// Number of distinct years with at least one supervised thesis.
    #[serde(rename = "anos_atuacao")]
    pub active_years: i64,
    /// Display string of the advisor's top themes, built upstream.
    #[serde(rename = "temas_top")]
    pub top_themes: String,
}

/// Advisor-to-topic strength (`advisor_topics.parquet`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorTopic {
    #[serde(rename = "orientador_id")]
    pub advisor_id: String,
    pub topic: TopicId,
    /// Number of the advisor's documents assigned to the topic.
    #[serde(rename = "n_docs")]
    pub documents: i64,
    /// Fraction of the advisor's documents this topic accounts for.
    #[serde(rename = "share_no_orientador")]
    pub advisor_share: f64,
}
