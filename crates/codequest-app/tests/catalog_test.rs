//! Integration tests for the catalog client.

mod common;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use codequest_app::clients::catalog::HttpProblemSource;
use codequest_core::error::ServiceError;
use codequest_core::source::ProblemSource;
use codequest_core::tier::Difficulty;
use serde_json::{Value, json};

async fn topic_problems(Path(topic): Path<String>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": [
            {"id": "two-sum", "topicId": topic, "difficulty": "Easy"},
            {"id": "group-anagrams", "topicId": topic, "difficulty": "Medium"},
        ],
    }))
}

async fn problem(Path(slug): Path<String>) -> (StatusCode, Json<Value>) {
    if slug == "two-sum" {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
                    "id": "two-sum",
                    "title": "Two Sum",
                    "difficulty": "Easy",
                    "statement": "Return indices of the two numbers that add up to target.",
                    "examples": [
                        {"input": "nums = [2,7,11,15], target = 9", "output": "[0,1]"}
                    ],
                    "starterCodeByLanguage": {"python": "def twoSum(nums, target):\n    pass"},
                },
            })),
        );
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"status": "error", "message": format!("Failed to fetch problem \"{slug}\"")})),
    )
}

fn catalog() -> Router {
    Router::new()
        .route("/api/topics/{topic}/problems", get(topic_problems))
        .route(
            "/api/leetcode/problems",
            get(|| async {
                Json(json!({"status": "error", "message": "scraper offline"}))
            }),
        )
        .route("/api/leetcode/{slug}", get(problem))
}

#[tokio::test]
async fn test_topic_listing_decodes_summaries() {
    let base = common::spawn_backend(catalog()).await;
    let source = HttpProblemSource::new(common::backend(&base));

    let listing = source.list_by_topic("Arrays & Hashing").await.unwrap();

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, "two-sum");
    assert_eq!(listing[0].topic_id, "Arrays & Hashing");
    assert_eq!(listing[1].difficulty, Difficulty::Medium);
}

#[tokio::test]
async fn test_detail_decodes_examples_and_starter_code() {
    let base = common::spawn_backend(catalog()).await;
    let source = HttpProblemSource::new(common::backend(&base));

    let detail = source.fetch_detail("two-sum").await.unwrap();

    assert_eq!(detail.title, "Two Sum");
    assert_eq!(detail.test_cases().len(), 1);
    assert!(detail.starter_code("python").is_some());
}

#[tokio::test]
async fn test_server_error_is_rejected() {
    let base = common::spawn_backend(catalog()).await;
    let source = HttpProblemSource::new(common::backend(&base));

    let err = source.fetch_detail("no-such-problem").await.unwrap_err();

    assert!(matches!(err, ServiceError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn test_error_envelope_is_rejected() {
    let base = common::spawn_backend(catalog()).await;
    let source = HttpProblemSource::new(common::backend(&base));

    let err = source.list_all().await.unwrap_err();

    assert!(matches!(err, ServiceError::Rejected { ref message, .. } if message == "scraper offline"));
}

#[tokio::test]
async fn test_unreachable_catalog_is_a_transport_failure() {
    let base = common::closed_port().await;
    let source = HttpProblemSource::new(common::backend(&base));

    let err = source.list_all().await.unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
}
