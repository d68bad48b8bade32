//! API integration tests

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

use scholar_homepage::{
    api::create_router,
    config::AppConfig,
    error::AppResult,
    models::student::{Student, StudentKind},
    services::{hal::PublicationSource, Services},
    AppError, AppState,
};

const BASE_URL: &str = "http://localhost:8080";

/// Upstream stand-in returning a canned payload, or failing when `None`
struct StubSource {
    payload: Option<Value>,
    calls: AtomicUsize,
}

#[async_trait]
impl PublicationSource for StubSource {
    async fn fetch(&self) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payload
            .clone()
            .ok_or_else(|| AppError::Upstream("connection refused".to_string()))
    }
}

fn hal_payload() -> Value {
    json!({
        "response": {
            "numFound": 3,
            "start": 0,
            "docs": [
                {
                    "title_s": ["Robust detection for sonar", "Détection robuste"],
                    "producedDate_s": "2024-03-01",
                    "docType_s": "ART",
                    "uri_s": "https://hal.science/hal-0001",
                    "authFullName_s": ["Olivier Lerda", "Ammar Mian"],
                    "journalTitle_s": "IEEE Transactions on Signal Processing",
                    "label_bibtex": "@article{lerda2024}",
                    "citationFull_s": "Olivier Lerda, Ammar Mian. <i>Robust detection for sonar</i>. 2024. <a target=\"_blank\" href=\"https://hal.science/hal-0001\">⟨hal-0001⟩</a>."
                },
                {
                    "title_s": "SPD networks for GPR",
                    "producedDate_s": "2023",
                    "docType_s": "COMM",
                    "uri_s": "https://hal.science/hal-0002",
                    "authFullName_s": ["Douba Jafuno", "Ammar Mian", "Guillaume Ginolhac"],
                    "conferenceTitle_s": "EUSIPCO"
                },
                {
                    "docType_s": "UNDEFINED"
                }
            ]
        }
    })
}

fn app_with(payload: Option<Value>) -> (Router, Arc<StubSource>) {
    let source = Arc::new(StubSource {
        payload,
        calls: AtomicUsize::new(0),
    });

    let mut config = AppConfig::default();
    config.students = vec![Student {
        name: "Hugo Brehier".to_string(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        funding: "Research Grant".to_string(),
        kind: StudentKind::PostDoc,
        defended: None,
        subject: "SPDnet and beyond".to_string(),
        keywords: vec!["SPDnet".to_string(), "Deep Learning".to_string()],
    }];

    let services = Services::new(&config, source.clone());
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };
    (create_router(state), source)
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

#[tokio::test]
async fn test_health_check() {
    let (app, source) = app_with(None);
    let (status, _, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_proxy_relays_payload_with_cache_policy() {
    let (app, source) = app_with(Some(hal_payload()));
    let (status, headers, body) = get(app, "/api/publications.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, hal_payload());
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "public, s-maxage=604800, stale-while-revalidate=3600"
    );
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_proxy_upstream_failure_envelope() {
    let (app, _) = app_with(None);
    let (status, headers, body) = get(app, "/api/publications.json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch publications" }));
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_browse_default_order_and_counts() {
    let (app, source) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Robust detection for sonar", "SPD networks for GPR", "Untitled"]
    );
    assert_eq!(body["counts"], json!({ "total": 3, "journals": 1, "conferences": 1 }));
    assert_eq!(body["items"][1]["venue"], "EUSIPCO");
    assert_eq!(body["items"][2]["venue"], "N/A");
    assert_eq!(body["items"][2]["doc_type"], "Other");
    assert_eq!(body["items"][0]["authors"][1], json!({ "name": "Ammar Mian", "is_owner": true }));
    assert_eq!(body["page"], 1);
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["has_next"], false);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_browse_sorted_by_year_ascending() {
    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications?sort=year&order=asc").await;

    assert_eq!(status, StatusCode::OK);
    let years: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["year"].as_u64().unwrap())
        .collect();
    assert_eq!(years, vec![0, 2023, 2024]);
}

#[tokio::test]
async fn test_browse_filters() {
    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications?authors=ginolhac&type=Conference").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["index"], 1);

    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications?title=nothing-like-this").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_browse_pagination() {
    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications?per_page=2&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_count"], 2);
    assert_eq!(body["has_previous"], true);
    assert_eq!(body["has_next"], false);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_browse_rejects_bad_query_without_fetching() {
    let (app, source) = app_with(Some(hal_payload()));
    let (status, _, _) = get(app, "/api/publications?sort=authors").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (app2, _) = app_with(Some(hal_payload()));
    let (status, _, _) = get(app2, "/api/publications?per_page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_browse_upstream_failure() {
    let (app, _) = app_with(None);
    let (status, _, body) = get(app, "/api/publications").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch publications" }));
}

#[tokio::test]
async fn test_citations() {
    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/citations/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["citation"],
        "Olivier Lerda, Ammar Mian. Robust detection for sonar. 2024 https://hal.science/hal-0001"
    );
    assert_eq!(body["bibtex"], "@article{lerda2024}");

    let (app, _) = app_with(Some(hal_payload()));
    let (_, _, body) = get(app, "/api/citations/1").await;
    assert_eq!(
        body["citation"],
        "Douba Jafuno, Ammar Mian, & Guillaume Ginolhac (2023). SPD networks for GPR. EUSIPCO."
    );
    assert_eq!(body["bibtex"], "BibTeX not available.");

    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, _) = get(app, "/api/citations/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_by_year() {
    let (app, _) = app_with(Some(hal_payload()));
    let (status, _, body) = get(app, "/api/publications/by-year").await;

    assert_eq!(status, StatusCode::OK);
    let years: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["year"].as_u64().unwrap())
        .collect();
    assert_eq!(years, vec![2024, 2023, 0]);
}

#[tokio::test]
async fn test_students() {
    let (app, _) = app_with(None);
    let (status, _, body) = get(app, "/api/students?keywords=spd&type=Post-Doc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Hugo Brehier");
    assert_eq!(body[0]["type"], "Post-Doc");

    let (app, _) = app_with(None);
    let (status, _, body) = get(app, "/api/students?type=Master").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (app, _) = app_with(None);
    let (status, _, _) = get(app, "/api/students?type=Intern").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile() {
    let (app, _) = app_with(None);
    let (status, _, body) = get(app, "/api/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ammar Mian");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored (needs a running server)
async fn test_live_publications_json() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/publications.json", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().get("cache-control").is_some());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["response"]["docs"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_live_browse() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/publications?sort=year&order=desc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}
