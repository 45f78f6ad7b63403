//! Topic filter page: the documents assigned to one topic, with the topic's
//! trend series alongside.

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactStore, TopicId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicFilterView {
    pub topic: TopicId,
    /// Label from the active topic set; `None` for unknown topics.
    pub label: Option<String>,
    /// One row per (document, topic) assignment, as exported.
    pub documents: Vec<TopicDocumentRow>,
    /// The topic's yearly participation, ascending. Line chart.
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDocumentRow {
    pub doc_id: String,
    pub year: Option<i32>,
    pub title: String,
    pub advisor_name: Option<String>,
    pub url: Option<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub share: f64,
    pub documents: i64,
}

/// A topic with no documents (or an unknown identifier) renders the empty
/// state: no rows, no trend, `label: None` where unknown.
pub fn render(store: &ArtifactStore, topic: TopicId) -> TopicFilterView {
    let mut documents: Vec<TopicDocumentRow> = store
        .doc_topics()
        .iter()
        .filter(|a| a.topic == topic)
        // Assignments whose document is missing from the docs table are
        // dropped rather than surfaced as broken rows.
        .filter_map(|a| {
            store.document(&a.doc_id).map(|d| TopicDocumentRow {
                doc_id: d.doc_id.clone(),
                year: d.year,
                title: d.title.clone(),
                advisor_name: d.advisor_name.clone(),
                url: d.url.clone(),
                weight: a.weight,
            })
        })
        .collect();
    // Year ascending with unknown years last, then title, then id.
    documents.sort_by_cached_key(|r| {
        (
            r.year.is_none(),
            r.year,
            r.title.to_lowercase(),
            r.doc_id.clone(),
        )
    });

    let mut trend: Vec<TrendPoint> = store
        .topic_trends()
        .iter()
        .filter(|t| t.topic == topic)
        .map(|t| TrendPoint {
            year: t.year,
            share: t.share,
            documents: t.documents,
        })
        .collect();
    trend.sort_by_key(|p| p.year);

    TopicFilterView {
        topic,
        label: store.topic_label(topic).map(str::to_owned),
        documents,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactTables, Document, DocumentTopic, Topic, TopicTrend};

    fn doc(id: &str, year: Option<i32>, title: &str) -> Document {
        Document {
            doc_id: id.into(),
            title: title.into(),
            year,
            advisor_id: None,
            advisor_name: Some("Maria".into()),
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
                doc("d1", Some(2021), "Zebras em grafos"),
                doc("d2", Some(2019), "Análise de redes"),
                doc("d3", None, "Sem ano"),
                doc("d4", Some(2019), "algoritmos distribuídos"),
            ],
            topics: vec![Topic {
                topic: TopicId(5),
                label: "Redes".into(),
                keywords: String::new(),
            }],
            doc_topics: vec![
                assignment("d1", 5, 0.8),
                assignment("d2", 5, 0.9),
                assignment("d3", 5, 0.7),
                assignment("d4", 5, 0.6),
                assignment("ghost", 5, 0.5),
                assignment("d1", 9, 0.4),
            ],
            topic_trends: vec![
                TopicTrend {
                    topic: TopicId(5),
                    year: 2021,
                    share: 0.3,
                    documents: 1,
                },
                TopicTrend {
                    topic: TopicId(5),
                    year: 2019,
                    share: 0.2,
                    documents: 2,
                },
                TopicTrend {
                    topic: TopicId(9),
                    year: 2019,
                    share: 0.1,
                    documents: 1,
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn rows_sorted_year_ascending_then_title_nulls_last() {
        let view = render(&sample_store(), TopicId(5));
        let ids: Vec<&str> = view.documents.iter().map(|r| r.doc_id.as_str()).collect();
        // 2019 rows first (title order, case-insensitive), then 2021, then the
        // year-less row; the dangling "ghost" assignment is dropped.
        assert_eq!(ids, ["d4", "d2", "d1", "d3"]);
        assert_eq!(view.label.as_deref(), Some("Redes"));
    }

    #[test]
    fn trend_filtered_to_the_topic_and_year_sorted() {
        let view = render(&sample_store(), TopicId(5));
        let years: Vec<i32> = view.trend.iter().map(|p| p.year).collect();
        assert_eq!(years, [2019, 2021]);
    }

    #[test]
    fn topic_without_documents_renders_empty_state() {
        let view = render(&sample_store(), TopicId(42));
        assert!(view.documents.is_empty());
        assert!(view.trend.is_empty());
        assert_eq!(view.label, None);
    }

    #[test]
    fn row_count_matches_assignments_with_known_documents() {
        let view = render(&sample_store(), TopicId(5));
        assert_eq!(view.documents.len(), 4);
        let weights: Vec<f64> = view.documents.iter().map(|r| r.weight).collect();
        assert_eq!(weights, [0.6, 0.9, 0.8, 0.7]);
    }
}
