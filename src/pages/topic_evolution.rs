//! Topic evolution page: yearly share series for a small set of topics on a
//! shared year axis.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactStore, TopicId};

use super::{PageError, PageResult};

/// Upper bound on topics per chart. Beyond this the lines stop being
/// readable.
pub const MAX_EVOLUTION_TOPICS: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEvolutionView {
    /// Shared year axis, ascending. Union of the years covered by the
    /// selected topics.
    pub years: Vec<i32>,
    pub series: Vec<TopicSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSeries {
    pub topic: TopicId,
    pub label: Option<String>,
    /// Legend text, `[id] label` form.
    pub display: String,
    /// One slot per entry in `years`; `None` where the topic has no data
    /// for that year.
    pub points: Vec<Option<SeriesPoint>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub share: f64,
    pub documents: i64,
}

/// Fails with [`PageError::TooManyTopics`] when the deduplicated selection
/// exceeds [`MAX_EVOLUTION_TOPICS`].
pub fn render(store: &ArtifactStore, topics: &[TopicId]) -> PageResult<TopicEvolutionView> {
    let mut selection: Vec<TopicId> = Vec::new();
    for &topic in topics {
        if !selection.contains(&topic) {
            selection.push(topic);
        }
    }
    if selection.len() > MAX_EVOLUTION_TOPICS {
        return Err(PageError::TooManyTopics {
            requested: selection.len(),
            max: MAX_EVOLUTION_TOPICS,
        });
    }
    if selection.is_empty() {
        return Ok(TopicEvolutionView {
            years: Vec::new(),
            series: Vec::new(),
        });
    }
    selection.sort();

    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut by_topic: BTreeMap<TopicId, BTreeMap<i32, SeriesPoint>> = BTreeMap::new();
    for trend in store.topic_trends() {
        if !selection.contains(&trend.topic) {
            continue;
        }
        years.insert(trend.year);
        by_topic.entry(trend.topic).or_default().insert(
            trend.year,
            SeriesPoint {
                share: trend.share,
                documents: trend.documents,
            },
        );
    }
    let years: Vec<i32> = years.into_iter().collect();

    let series = selection
        .into_iter()
        .map(|topic| {
            let label = store.topic_label(topic).map(str::to_owned);
            let display = topic.display_with(label.as_deref());
            let points = match by_topic.get(&topic) {
                Some(yearly) => years.iter().map(|y| yearly.get(y).copied()).collect(),
                None => vec![None; years.len()],
            };
            TopicSeries {
                topic,
                label,
                display,
                points,
            }
        })
        .collect();

    Ok(TopicEvolutionView { years, series })
}
