//! Overview page: corpus-wide metrics plus the participation and
//! per-year charts. Pure aggregation with no failure mode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactStore, TopicId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewView {
    pub total_documents: usize,
    pub total_advisors: usize,
    /// Topics in the active set, outlier bucket excluded.
    pub total_topics: usize,
    /// Span of known defense years, absent when no document has one.
    pub year_range: Option<YearRange>,
    pub outliers: OutlierStats,
    /// Mean assignment weight per topic, strongest first. Bar chart.
    pub participation: Vec<TopicParticipation>,
    /// Documents per defense year, ascending. Histogram.
    pub docs_per_year: Vec<YearCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Documents the model left in the outlier bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierStats {
    pub documents: usize,
    /// Fraction of all documents, in `0..=1`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicParticipation {
    pub topic: TopicId,
    pub label: Option<String>,
    pub mean_weight: f64,
    /// Number of assignments contributing to the mean.
    pub documents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub documents: usize,
}

pub fn render(store: &ArtifactStore, top_topics: usize) -> OverviewView {
    let documents = store.documents();

    let years: Vec<i32> = documents.iter().filter_map(|d| d.year).collect();
    let year_range = match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => Some(YearRange { min, max }),
        _ => None,
    };

    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years {
        *by_year.entry(year).or_default() += 1;
    }
    let docs_per_year = by_year
        .into_iter()
        .map(|(year, documents)| YearCount { year, documents })
        .collect();

    let mut outlier_documents = 0usize;
    let mut weight_sums: BTreeMap<TopicId, (f64, usize)> = BTreeMap::new();
    for assignment in store.doc_topics() {
        if assignment.topic.is_outlier() {
            outlier_documents += 1;
            continue;
        }
        let entry = weight_sums.entry(assignment.topic).or_insert((0.0, 0));
        entry.0 += assignment.weight;
        entry.1 += 1;
    }
    let mut participation: Vec<TopicParticipation> = weight_sums
        .into_iter()
        .map(|(topic, (sum, count))| TopicParticipation {
            topic,
            label: store.topic_label(topic).map(str::to_owned),
            mean_weight: sum / count as f64,
            documents: count,
        })
        .collect();
    participation.sort_by(|a, b| {
        b.mean_weight
            .total_cmp(&a.mean_weight)
            .then(a.topic.cmp(&b.topic))
    });
    participation.truncate(top_topics);

    let outlier_share = if documents.is_empty() {
        0.0
    } else {
        outlier_documents as f64 / documents.len() as f64
    };

    OverviewView {
        total_documents: documents.len(),
        total_advisors: store.advisor_profiles().len(),
        total_topics: store
            .topics()
            .iter()
            .filter(|t| !t.topic.is_outlier())
            .count(),
        year_range,
        outliers: OutlierStats {
            documents: outlier_documents,
            share: outlier_share,
        },
        participation,
        docs_per_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{AdvisorProfile, ArtifactTables, Document, DocumentTopic, Topic};

    fn doc(id: &str, year: Option<i32>) -> Document {
        Document {
            doc_id: id.into(),
            title: format!("TCC {id}"),
            year,
            advisor_id: None,
            advisor_name: None,
            url: None,
        }
    }

    fn assignment(doc_id: &str, topic: i64, weight: f64) -> DocumentTopic {
        DocumentTopic {
            doc_id: doc_id.into(),
            topic: TopicId(topic),
            weight,
        }
    }

    fn sample_store() -> ArtifactStore {
        ArtifactStore::from_parts(ArtifactTables {
            documents: vec![
                doc("d1", Some(2019)),
                doc("d2", Some(2019)),
                doc("d3", Some(2021)),
                doc("d4", None),
            ],
            topics: vec![
                Topic {
                    topic: TopicId(0),
                    label: "IA".into(),
                    keywords: String::new(),
                },
                Topic {
                    topic: TopicId(1),
                    label: "Redes".into(),
                    keywords: String::new(),
                },
            ],
            doc_topics: vec![
                assignment("d1", 0, 0.9),
                assignment("d2", 0, 0.7),
                assignment("d3", 1, 0.95),
                assignment("d4", -1, 0.5),
            ],
            advisor_profiles: vec![AdvisorProfile {
                advisor_id: "a1".into(),
                name: "Maria".into(),
                documents: 4,
                active_years: 3,
                top_themes: "[0]".into(),
            }],
            ..Default::default()
        })
    }

    #[test]
    fn metrics_count_totals_and_year_span() {
        let view = render(&sample_store(), 10);
        assert_eq!(view.total_documents, 4);
        assert_eq!(view.total_advisors, 1);
        assert_eq!(view.total_topics, 2);
        assert_eq!(view.year_range, Some(YearRange { min: 2019, max: 2021 }));
    }

    #[test]
    fn outlier_assignments_are_counted_not_charted() {
        let view = render(&sample_store(), 10);
        assert_eq!(view.outliers.documents, 1);
        assert!((view.outliers.share - 0.25).abs() < 1e-9);
        assert!(view.participation.iter().all(|p| !p.topic.is_outlier()));
    }

    #[test]
    fn participation_means_sorted_strongest_first() {
        let view = render(&sample_store(), 10);
        assert_eq!(view.participation.len(), 2);
        // Topic 1 mean 0.95 beats topic 0 mean 0.8.
        assert_eq!(view.participation[0].topic, TopicId(1));
        assert!((view.participation[0].mean_weight - 0.95).abs() < 1e-9);
        assert_eq!(view.participation[1].topic, TopicId(0));
        assert!((view.participation[1].mean_weight - 0.8).abs() < 1e-9);
        assert_eq!(view.participation[1].documents, 2);
        assert_eq!(view.participation[0].label.as_deref(), Some("Redes"));
    }

    #[test]
    fn participation_respects_the_top_n_cap() {
        let view = render(&sample_store(), 1);
        assert_eq!(view.participation.len(), 1);
        assert_eq!(view.participation[0].topic, TopicId(1));
    }

    #[test]
    fn docs_per_year_ascending_and_null_years_dropped() {
        let view = render(&sample_store(), 10);
        assert_eq!(
            view.docs_per_year,
            vec![
                YearCount { year: 2019, documents: 2 },
                YearCount { year: 2021, documents: 1 },
            ]
        );
    }

    #[test]
    fn empty_store_renders_zeroed_view() {
        let view = render(&ArtifactStore::from_parts(ArtifactTables::default()), 10);
        assert_eq!(view.total_documents, 0);
        assert_eq!(view.year_range, None);
        assert_eq!(view.outliers.documents, 0);
        assert_eq!(view.outliers.share, 0.0);
        assert!(view.participation.is_empty());
        assert!(view.docs_per_year.is_empty());
    }
}
