//! Advisor search page: case-insensitive substring match over advisor names.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSearchView {
    /// The effective (trimmed) query.
    pub query: String,
    /// Match count, for the results caption.
    pub total: usize,
    pub advisors: Vec<AdvisorRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRow {
    pub advisor_id: String,
    pub name: String,
    pub documents: i64,
    pub active_years: i64,
    pub top_themes: String,
}

/// An empty or whitespace query applies no filter. No match yields an empty
/// result set, not an error.
pub fn render(store: &ArtifactStore, query: &str) -> AdvisorSearchView {
    let query = query.trim();
    let needle = query.to_lowercase();

    let mut advisors: Vec<AdvisorRow> = store
        .advisor_profiles()
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .map(|p| AdvisorRow {
            advisor_id: p.advisor_id.clone(),
            name: p.name.clone(),
            documents: p.documents,
            active_years: p.active_years,
            top_themes: p.top_themes.clone(),
        })
        .collect();
    advisors.sort_by_cached_key(|r| (r.name.to_lowercase(), r.advisor_id.clone()));

    AdvisorSearchView {
        query: query.to_string(),
        total: advisors.len(),
        advisors,
    }
}
