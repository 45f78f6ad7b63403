//! HTTP surface tests: the router is driven directly, without a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use temascope::artifact::{
    AdvisorProfile, AdvisorTopic, ArtifactStore, ArtifactTables, Document, DocumentTopic, Topic,
    TopicId, TopicTrend,
};
use temascope::pages::RenderOptions;
use temascope::server::{router, AppState};

fn sample_state() -> AppState {
    let tables = ArtifactTables {
        documents: vec![
            Document {
                doc_id: "tcc-001".into(),
                title: "Aprendizado de máquina aplicado a logs".into(),
                year: Some(2019),
                advisor_id: Some("a1".into()),
                advisor_name: Some("Maria Silva".into()),
                url: None,
            },
            Document {
                doc_id: "tcc-002".into(),
                title: "Protocolos de redes veiculares".into(),
                year: Some(2021),
                advisor_id: Some("a2".into()),
                advisor_name: Some("João Souza".into()),
                url: None,
            },
        ],
        topics: vec![
            Topic {
                topic: TopicId(0),
                label: "Aprendizado de máquina".into(),
                keywords: String::new(),
            },
            Topic {
                topic: TopicId(1),
                label: "Redes".into(),
                keywords: String::new(),
            },
        ],
        doc_topics: vec![
            DocumentTopic {
                doc_id: "tcc-001".into(),
                topic: TopicId(0),
                weight: 0.8,
            },
            DocumentTopic {
                doc_id: "tcc-002".into(),
                topic: TopicId(1),
                weight: 0.7,
            },
        ],
        topic_trends: vec![
            TopicTrend {
                topic: TopicId(0),
                year: 2019,
                share: 0.5,
                documents: 1,
            },
            TopicTrend {
                topic: TopicId(1),
                year: 2021,
                share: 0.5,
                documents: 1,
            },
        ],
        advisor_profiles: vec![
            AdvisorProfile {
                advisor_id: "a1".into(),
                name: "Maria Silva".into(),
                documents: 1,
                active_years: 1,
                top_themes: "[0] Aprendizado de máquina".into(),
            },
            AdvisorProfile {
                advisor_id: "a2".into(),
                name: "João Souza".into(),
                documents: 1,
                active_years: 1,
                top_themes: "[1] Redes".into(),
            },
        ],
        advisor_topics: vec![AdvisorTopic {
            advisor_id: "a1".into(),
            topic: TopicId(0),
            documents: 1,
            advisor_share: 1.0,
        }],
        ..Default::default()
    };
    AppState::new(
        Arc::new(ArtifactStore::from_parts(tables)),
        RenderOptions::default(),
    )
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(sample_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn status_reports_version_and_counts() {
    let (status, body) = get_json("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["tables"]["documents"], 2);
    assert_eq!(body["tables"]["advisor_profiles"], 2);
}

#[tokio::test]
async fn options_list_pages_topics_and_advisors() {
    let (status, body) = get_json("/api/options").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"].as_array().unwrap().len(), 5);
    assert_eq!(body["pages"][0]["slug"], "overview");
    assert_eq!(body["topics"][0]["display"], "[0] Aprendizado de máquina");
    // Advisors sorted by name; "João" before "Maria".
    assert_eq!(body["advisors"][0]["name"], "João Souza");
    assert_eq!(body["max_evolution_topics"], 6);
}

#[tokio::test]
async fn overview_carries_its_page_tag() {
    let (status, body) = get_json("/api/page/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "overview");
    assert_eq!(body["total_documents"], 2);
}

#[tokio::test]
async fn advisor_search_filters_by_query() {
    let (status, body) = get_json("/api/page/advisor-search?q=maria").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["advisors"][0]["name"], "Maria Silva");

    // No parameter lists everyone.
    let (_, body) = get_json("/api/page/advisor-search").await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn topic_filter_requires_a_parseable_topic() {
    let (status, body) = get_json("/api/page/topic-filter?topic=um").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "temascope::api::invalid_param");
    assert!(body["error"].as_str().unwrap().contains("um"));

    let (status, _) = get_json("/api/page/topic-filter").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json("/api/page/topic-filter?topic=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documents"][0]["doc_id"], "tcc-002");
}

#[tokio::test]
async fn unknown_advisor_maps_to_not_found() {
    let (status, body) = get_json("/api/page/advisor-profile?advisor=missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "temascope::pages::advisor_not_found");

    let (status, body) = get_json("/api/page/advisor-profile?advisor=a1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Maria Silva");
}

#[tokio::test]
async fn topic_evolution_enforces_the_selection_cap() {
    let (status, body) = get_json("/api/page/topic-evolution?topics=1,2,3,4,5,6,7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "temascope::pages::too_many_topics");

    let (status, body) = get_json("/api/page/topic-evolution?topics=0,1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"].as_array().unwrap().len(), 2);
    assert_eq!(body["years"], serde_json::json!([2019, 2021]));

    // An empty selection is the empty state, not an error.
    let (status, body) = get_json("/api/page/topic-evolution?topics=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn root_serves_the_embedded_frontend() {
    let response = router(sample_state())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("Navegação"));
}
