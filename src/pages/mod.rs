//! The five dashboard pages and their dispatch.
//!
//! Each page is a pure function from the loaded [`ArtifactStore`] and a typed
//! input to a serializable view model; [`render`] is the single mapping from
//! request kind to renderer. The set of pages is a closed enum, so adding one
//! means the compiler walks every match that needs updating.

pub mod advisor_profile;
pub mod advisor_search;
pub mod overview;
pub mod topic_evolution;
pub mod topic_filter;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use advisor_profile::AdvisorProfileView;
pub use advisor_search::AdvisorSearchView;
pub use overview::OverviewView;
pub use topic_evolution::{MAX_EVOLUTION_TOPICS, TopicEvolutionView};
pub use topic_filter::TopicFilterView;

use crate::artifact::{ArtifactStore, TopicId};

/// Errors a page renderer can produce. Empty results are never errors;
/// every page has an explicit empty state instead.
#[derive(Debug, Error, Diagnostic)]
pub enum PageError {
    #[error("advisor not found: \"{advisor_id}\"")]
    #[diagnostic(
        code(temascope::pages::advisor_not_found),
        help("Pick an advisor from the select options; identifiers come from the profiles table.")
    )]
    AdvisorNotFound { advisor_id: String },

    #[error("too many topics selected: {requested} (maximum {max})")]
    #[diagnostic(
        code(temascope::pages::too_many_topics),
        help("The evolution chart compares at most 6 topics at once. Narrow the selection.")
    )]
    TooManyTopics { requested: usize, max: usize },
}

pub type PageResult<T> = std::result::Result<T, PageError>;

/// The five dashboard views. Navigation starts at [`Page::Overview`] and has
/// no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    AdvisorSearch,
    TopicFilter,
    AdvisorProfile,
    TopicEvolution,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::AdvisorSearch,
        Page::TopicFilter,
        Page::AdvisorProfile,
        Page::TopicEvolution,
    ];

    /// Stable identifier used in URLs and request tags.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::AdvisorSearch => "advisor-search",
            Page::TopicFilter => "topic-filter",
            Page::AdvisorProfile => "advisor-profile",
            Page::TopicEvolution => "topic-evolution",
        }
    }

    /// User-facing title, in the corpus language.
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Visão geral",
            Page::AdvisorSearch => "Pesquisar orientadores",
            Page::TopicFilter => "Filtrar TCCs por tema",
            Page::AdvisorProfile => "Perfil do orientador",
            Page::TopicEvolution => "Evolução de temas",
        }
    }
}

/// Renderer tunables sourced from the dashboard configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// How many topics the overview participation chart shows.
    pub overview_top_topics: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overview_top_topics: 10,
        }
    }
}

/// A typed page request, tagged by page slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageRequest {
    Overview,
    AdvisorSearch { query: String },
    TopicFilter { topic: TopicId },
    AdvisorProfile { advisor_id: String },
    TopicEvolution { topics: Vec<TopicId> },
}

impl PageRequest {
    pub fn page(&self) -> Page {
        match self {
            PageRequest::Overview => Page::Overview,
            PageRequest::AdvisorSearch { .. } => Page::AdvisorSearch,
            PageRequest::TopicFilter { .. } => Page::TopicFilter,
            PageRequest::AdvisorProfile { .. } => Page::AdvisorProfile,
            PageRequest::TopicEvolution { .. } => Page::TopicEvolution,
        }
    }
}

/// A rendered page view, tagged like the request that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageView {
    Overview(OverviewView),
    AdvisorSearch(AdvisorSearchView),
    TopicFilter(TopicFilterView),
    AdvisorProfile(AdvisorProfileView),
    TopicEvolution(TopicEvolutionView),
}

/// Render one page against the loaded store.
pub fn render(
    store: &ArtifactStore,
    options: RenderOptions,
    request: &PageRequest,
) -> PageResult<PageView> {
    tracing::debug!(page = request.page().slug(), "rendering page");
    match request {
        PageRequest::Overview => Ok(PageView::Overview(overview::render(
            store,
            options.overview_top_topics,
        ))),
        PageRequest::AdvisorSearch { query } => Ok(PageView::AdvisorSearch(
            advisor_search::render(store, query),
        )),
        PageRequest::TopicFilter { topic } => {
            Ok(PageView::TopicFilter(topic_filter::render(store, *topic)))
        }
        PageRequest::AdvisorProfile { advisor_id } => Ok(PageView::AdvisorProfile(
            advisor_profile::render(store, advisor_id)?,
        )),
        PageRequest::TopicEvolution { topics } => Ok(PageView::TopicEvolution(
            topic_evolution::render(store, topics)?,
        )),
    }
}

/// One entry of the topic select control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicOption {
    pub topic: TopicId,
    /// `[id] label` display form.
    pub display: String,
}

/// Topic select options: the active set, outlier excluded, id ascending.
pub fn topic_options(store: &ArtifactStore) -> Vec<TopicOption> {
    let mut options: Vec<TopicOption> = store
        .topics()
        .iter()
        .filter(|t| !t.topic.is_outlier())
        .map(|t| TopicOption {
            topic: t.topic,
            display: t.topic.display_with(Some(&t.label)),
        })
        .collect();
    options.sort_by_key(|o| o.topic);
    options
}

/// One entry of the advisor select control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorOption {
    pub advisor_id: String,
    pub name: String,
}

/// Advisor select options, name ascending (case-insensitive, id tie-break).
pub fn advisor_options(store: &ArtifactStore) -> Vec<AdvisorOption> {
    let mut options: Vec<AdvisorOption> = store
        .advisor_profiles()
        .iter()
        .map(|p| AdvisorOption {
            advisor_id: p.advisor_id.clone(),
            name: p.name.clone(),
        })
        .collect();
    options.sort_by_cached_key(|o| (o.name.to_lowercase(), o.advisor_id.clone()));
    options
}
