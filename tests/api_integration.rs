//! End-to-end API integration tests
//!
//! These tests drive the HTTP routes against an in-memory database:
//! - Greeting endpoint
//! - Member search filters and paging parameters
//! - Page JSON shape
//! - Rejection of malformed parameters

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use member_query_api::api;
use member_query_api::domain::member::Member;
use member_query_api::domain::repositories::{MemberRepository, TeamRepository};
use member_query_api::domain::team::Team;
use member_query_api::infrastructure::database;
use member_query_api::infrastructure::repositories::{
    SqliteMemberRepository, SqliteTeamRepository,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for oneshot

/// Setup test database connection
async fn setup_test_db() -> SqlitePool {
    database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Setup test application with seeded members
async fn setup_app() -> Router {
    let pool = setup_test_db().await;

    let team_repo = SqliteTeamRepository::new(pool.clone());
    let member_repo = SqliteMemberRepository::new(pool.clone());

    let mut team_a = Team::new("teamA").expect("valid team");
    let mut team_b = Team::new("teamB").expect("valid team");
    team_repo.save(&mut team_a).await.expect("Failed to save teamA");
    team_repo.save(&mut team_b).await.expect("Failed to save teamB");

    for (name, age, team) in [
        ("member1", 10, Some(&team_a)),
        ("member2", 20, Some(&team_a)),
        ("member3", 30, Some(&team_b)),
        ("member4", 40, Some(&team_b)),
        ("member5", 50, None),
    ] {
        let mut member = Member::new(Some(name.to_string()), age, team).expect("valid member");
        member_repo
            .save(&mut member)
            .await
            .expect("Failed to save member");
    }

    api::router(pool)
}

/// Issue a GET and return the status with the raw body
async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

/// Issue a GET expecting 200 and a JSON body
async fn get_json(app: Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {}", uri);
    serde_json::from_slice(&body).unwrap()
}

fn usernames(page: &Value) -> Vec<String> {
    page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["username"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_hello() {
    let app = setup_app().await;

    let (status, body) = get(app, "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello");
}

#[tokio::test]
async fn test_search_without_parameters_returns_first_page() {
    let app = setup_app().await;

    let page = get_json(app, "/api/members/search").await;

    assert_eq!(
        usernames(&page),
        vec!["member1", "member2", "member3", "member4", "member5"]
    );
    assert_eq!(page["totalElements"], 5);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["size"], 20);
    assert_eq!(page["number"], 0);
}

#[tokio::test]
async fn test_search_projection_fields() {
    let app = setup_app().await;

    let page = get_json(app, "/api/members/search?ageGoe=35").await;
    let content = page["content"].as_array().unwrap();

    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["username"], "member4");
    assert_eq!(content[0]["age"], 40);
    assert!(content[0]["memberId"].is_number());
    assert!(content[0]["teamId"].is_number());
    assert_eq!(content[0]["teamName"], "teamB");

    // member without a team keeps null team fields
    assert_eq!(content[1]["username"], "member5");
    assert!(content[1]["teamId"].is_null());
    assert!(content[1]["teamName"].is_null());
}

#[tokio::test]
async fn test_search_by_team_name_with_paging() {
    let app = setup_app().await;

    let page = get_json(app, "/api/members/search?teamName=teamA&page=1&size=1").await;

    assert_eq!(usernames(&page), vec!["member2"]);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["number"], 1);
    assert_eq!(page["size"], 1);
}

#[tokio::test]
async fn test_search_with_age_range_and_sort() {
    let app = setup_app().await;

    let page = get_json(
        app,
        "/api/members/search?ageGoe=20&ageLoe=40&sort=age,desc",
    )
    .await;

    assert_eq!(usernames(&page), vec!["member4", "member3", "member2"]);
    assert_eq!(page["totalElements"], 3);
}

#[tokio::test]
async fn test_search_blank_username_is_ignored() {
    let app = setup_app().await;

    let page = get_json(app, "/api/members/search?username=&size=2").await;

    assert_eq!(usernames(&page), vec!["member1", "member2"]);
    assert_eq!(page["totalElements"], 5);
    assert_eq!(page["totalPages"], 3);
}

#[tokio::test]
async fn test_search_past_last_page_keeps_total() {
    let app = setup_app().await;

    let page = get_json(app, "/api/members/search?page=9&size=2").await;

    assert!(page["content"].as_array().unwrap().is_empty());
    assert_eq!(page["totalElements"], 5);
    assert_eq!(page["number"], 9);
}

#[tokio::test]
async fn test_search_with_unknown_sort_is_bad_request() {
    let app = setup_app().await;

    let (status, body) = get(app, "/api/members/search?sort=salary,desc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Unknown sort property: salary");
}

#[tokio::test]
async fn test_search_with_zero_size_is_bad_request() {
    let app = setup_app().await;

    let (status, body) = get(app, "/api/members/search?size=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Page size must be at least one");
}

#[tokio::test]
async fn test_search_with_malformed_age_is_bad_request() {
    let app = setup_app().await;

    let (status, body) = get(app, "/api/members/search?ageGoe=old").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let message = json["error"].as_str().expect("error message in JSON body");
    assert!(message.starts_with("Invalid query string"), "got {}", message);
}

#[tokio::test]
async fn test_search_with_negative_page_is_json_bad_request() {
    let app = setup_app().await;

    let (status, body) = get(app, "/api/members/search?page=-1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_search_with_empty_form_fields_ignores_them() {
    let app = setup_app().await;

    let page = get_json(
        app,
        "/api/members/search?username=&teamName=teamA&ageGoe=&ageLoe=&page=&size=&sort=",
    )
    .await;

    assert_eq!(usernames(&page), vec!["member1", "member2"]);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["size"], 20);
    assert_eq!(page["number"], 0);
}

#[tokio::test]
async fn test_search_with_repeated_sort_applies_each_term() {
    let app = setup_app().await;

    let page = get_json(
        app,
        "/api/members/search?sort=teamName,desc&sort=age,desc",
    )
    .await;

    // members without a team sort after every team when descending
    assert_eq!(
        usernames(&page),
        vec!["member4", "member3", "member2", "member1", "member5"]
    );
}
