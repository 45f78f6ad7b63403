//! Advisor profile page: one profile row, the advisor's theme distribution,
//! and their supervised works.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactStore, TopicId};

use super::{PageError, PageResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorProfileView {
    pub advisor_id: String,
    pub name: String,
    pub documents: i64,
    pub active_years: i64,
    pub top_themes: String,
    /// Theme distribution, strongest first. Bar chart.
    pub themes: Vec<ThemeRow>,
    /// Supervised works, most recent first.
    pub works: Vec<WorkRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRow {
    pub topic: TopicId,
    pub label: Option<String>,
    pub documents: i64,
    /// Fraction of the advisor's documents in this topic.
    pub share: f64,
}

/// One supervised document, annotated with its strongest topic assignment
/// when it has any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRow {
    pub doc_id: String,
    pub year: Option<i32>,
    pub title: String,
    pub topic: Option<TopicId>,
    pub topic_label: Option<String>,
    pub weight: Option<f64>,
    pub url: Option<String>,
}

/// Fails with [`PageError::AdvisorNotFound`] when no profile row matches.
pub fn render(store: &ArtifactStore, advisor_id: &str) -> PageResult<AdvisorProfileView> {
    let profile = store
        .profile(advisor_id)
        .ok_or_else(|| PageError::AdvisorNotFound {
            advisor_id: advisor_id.to_string(),
        })?;

    let mut themes: Vec<ThemeRow> = store
        .advisor_topics()
        .iter()
        .filter(|t| t.advisor_id == advisor_id)
        .map(|t| ThemeRow {
            topic: t.topic,
            label: store.topic_label(t.topic).map(str::to_owned),
            documents: t.documents,
            share: t.advisor_share,
        })
        .collect();
    themes.sort_by(|a, b| b.documents.cmp(&a.documents).then(a.topic.cmp(&b.topic)));

    let mut works: Vec<WorkRow> = store
        .documents()
        .iter()
        .filter(|d| d.advisor_id.as_deref() == Some(advisor_id))
        .map(|d| WorkRow {
            doc_id: d.doc_id.clone(),
            year: d.year,
            title: d.title.clone(),
            topic: None,
            topic_label: None,
            weight: None,
            url: d.url.clone(),
        })
        .collect();

    // Strongest assignment per supervised document; ties go to the lowest
    // topic id so the annotation is deterministic.
    let supervised: HashMap<&str, usize> = works
        .iter()
        .enumerate()
        .map(|(i, w)| (w.doc_id.as_str(), i))
        .collect();
    let mut best: HashMap<usize, (TopicId, f64)> = HashMap::new();
    for assignment in store.doc_topics() {
        let Some(&index) = supervised.get(assignment.doc_id.as_str()) else {
            continue;
        };
        match best.entry(index) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                let (topic, weight) = *entry.get();
                let replace = match assignment.weight.total_cmp(&weight) {
                    Ordering::Greater => true,
                    Ordering::Equal => assignment.topic < topic,
                    Ordering::Less => false,
                };
                if replace {
                    entry.insert((assignment.topic, assignment.weight));
                }
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert((assignment.topic, assignment.weight));
            }
        }
    }
    for (index, (topic, weight)) in best {
        let work = &mut works[index];
        work.topic = Some(topic);
        work.topic_label = store.topic_label(topic).map(str::to_owned);
        work.weight = Some(weight);
    }
    // Most recent first, unknown years last, then title.
    works.sort_by_cached_key(|w| {
        (
            w.year.is_none(),
            std::cmp::Reverse(w.year.unwrap_or(i32::MIN)),
            w.title.to_lowercase(),
        )
    });

    Ok(AdvisorProfileView {
        advisor_id: profile.advisor_id.clone(),
        name: profile.name.clone(),
        documents: profile.documents,
        active_years: profile.active_years,
        top_themes: profile.top_themes.clone(),
        themes,
        works,
    })
}
