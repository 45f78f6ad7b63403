//! JSON API handlers.
//!
//! Query parameters arrive as optional strings and are parsed by hand so a
//! bad request produces the same `{ "error", "code" }` body shape as a page
//! error instead of axum's plain-text rejection.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::artifact::{Manifest, TableCounts, TopicId};
use crate::pages::{
    self, AdvisorOption, MAX_EVOLUTION_TOPICS, Page, PageError, PageRequest, PageView, TopicOption,
};

use super::AppState;

// ── Error mapping ─────────────────────────────────────────────────────────

/// A request failure, carried to the client as `{ "error", "code" }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
}

impl ApiError {
    fn invalid_param(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "temascope::api::invalid_param".to_string(),
            message: message.into(),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        let status = match &err {
            PageError::AdvisorNotFound { .. } => StatusCode::NOT_FOUND,
            PageError::TooManyTopics { .. } => StatusCode::BAD_REQUEST,
        };
        let code = err
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "temascope::pages".to_string());
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message, "code": self.code });
        (self.status, Json(body)).into_response()
    }
}

// ── Metadata handlers ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub tables: TableCounts,
    pub manifest: Manifest,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tables: state.store.table_counts(),
        manifest: state.store.manifest().clone(),
    })
}

#[derive(Serialize)]
pub struct PageEntry {
    pub slug: &'static str,
    pub title: &'static str,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    pub pages: Vec<PageEntry>,
    pub topics: Vec<TopicOption>,
    pub advisors: Vec<AdvisorOption>,
    pub max_evolution_topics: usize,
}

pub async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let pages = Page::ALL
        .iter()
        .map(|p| PageEntry {
            slug: p.slug(),
            title: p.title(),
        })
        .collect();
    Json(OptionsResponse {
        pages,
        topics: pages::topic_options(&state.store),
        advisors: pages::advisor_options(&state.store),
        max_evolution_topics: MAX_EVOLUTION_TOPICS,
    })
}

// ── Page handlers ─────────────────────────────────────────────────────────

fn respond(state: &AppState, request: &PageRequest) -> Result<Json<PageView>, ApiError> {
    let view = pages::render(&state.store, state.options, request)?;
    Ok(Json(view))
}

fn parse_topic(raw: &str) -> Result<TopicId, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map(TopicId)
        .map_err(|_| ApiError::invalid_param(format!("topic id \"{raw}\" is not an integer")))
}

pub async fn overview_page(State(state): State<AppState>) -> Result<Json<PageView>, ApiError> {
    respond(&state, &PageRequest::Overview)
}

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub async fn advisor_search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageView>, ApiError> {
    let request = PageRequest::AdvisorSearch {
        query: params.q.unwrap_or_default(),
    };
    respond(&state, &request)
}

#[derive(Deserialize)]
pub struct TopicParams {
    topic: Option<String>,
}

pub async fn topic_filter_page(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
) -> Result<Json<PageView>, ApiError> {
    let raw = params
        .topic
        .ok_or_else(|| ApiError::invalid_param("missing query parameter \"topic\""))?;
    let topic = parse_topic(&raw)?;
    respond(&state, &PageRequest::TopicFilter { topic })
}

#[derive(Deserialize)]
pub struct AdvisorParams {
    advisor: Option<String>,
}

pub async fn advisor_profile_page(
    State(state): State<AppState>,
    Query(params): Query<AdvisorParams>,
) -> Result<Json<PageView>, ApiError> {
    let advisor_id = params
        .advisor
        .ok_or_else(|| ApiError::invalid_param("missing query parameter \"advisor\""))?;
    respond(&state, &PageRequest::AdvisorProfile { advisor_id })
}

#[derive(Deserialize)]
pub struct TopicsParams {
    topics: Option<String>,
}

pub async fn topic_evolution_page(
    State(state): State<AppState>,
    Query(params): Query<TopicsParams>,
) -> Result<Json<PageView>, ApiError> {
    // Comma-separated ids; an absent or empty parameter is an empty
    // selection, which renders the empty state rather than an error.
    let raw = params.topics.unwrap_or_default();
    let mut topics = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        topics.push(parse_topic(part)?);
    }
    respond(&state, &PageRequest::TopicEvolution { topics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_ids_parse_with_surrounding_whitespace() {
        assert_eq!(parse_topic(" 7 ").unwrap(), TopicId(7));
        assert_eq!(parse_topic("-1").unwrap(), TopicId(-1));
        assert!(parse_topic("sete").is_err());
        assert!(parse_topic("").is_err());
    }

    #[test]
    fn page_errors_map_to_the_right_status() {
        let not_found = ApiError::from(PageError::AdvisorNotFound {
            advisor_id: "a1".into(),
        });
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.code, "temascope::pages::advisor_not_found");

        let over_cap = ApiError::from(PageError::TooManyTopics {
            requested: 7,
            max: 6,
        });
        assert_eq!(over_cap.status, StatusCode::BAD_REQUEST);
        assert_eq!(over_cap.code, "temascope::pages::too_many_topics");
    }
}
