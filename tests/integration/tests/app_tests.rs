//! End-to-end tests for the issue tracker
//!
//! Each test spawns the real router with an in-memory store.
//!
//! Run with: cargo test -p integration-tests --test app_tests

use std::sync::Arc;

use integration_tests::{
    assert_fragments, assert_status, assert_text, fixtures::*, TestServer,
};
use issues_common::{JwtService, JwtUserDirectory};
use issues_core::{IssueStore, Notification, NotificationIndex, RequestContext, StateFilter};
use issues_store::{MemoryNotificationIndex, StaticUserDirectory, ISSUES_THREAD_TYPE};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert!(body.contains("healthy"));
}

// ============================================================================
// Issue List Tests
// ============================================================================

#[tokio::test]
async fn test_list_open_tab_by_default() {
    let server = TestServer::start().await.unwrap();
    seed_mixed(&server.store);

    let response = server.get("/").await.unwrap();
    let html = assert_text(response, StatusCode::OK).await.unwrap();

    assert!(html.contains("3 Open"));
    assert!(html.contains("2 Closed"));
    for title in ["open issue 1", "open issue 3", "open issue 5"] {
        assert!(html.contains(title), "missing {title}");
    }
    assert!(!html.contains("closed issue 2"));
    assert!(html.contains(r#"<a href="/?state=closed">"#));
}

#[tokio::test]
async fn test_list_closed_tab() {
    let server = TestServer::start().await.unwrap();
    seed_mixed(&server.store);

    let response = server.get("/?state=closed").await.unwrap();
    let html = assert_text(response, StatusCode::OK).await.unwrap();

    assert!(html.contains("closed issue 2"));
    assert!(html.contains("closed issue 4"));
    assert!(!html.contains("open issue 1"));
    assert!(html.contains(r#"<a class="selected"><span style="margin-left: 12px;">"#));
    assert!(html.contains(r#"<a href="/">"#));
}

#[tokio::test]
async fn test_list_explicit_open_matches_default() {
    let server = TestServer::start().await.unwrap();
    seed_mixed(&server.store);

    let default = assert_text(server.get("/?q=x").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let open = assert_text(server.get("/?q=x&state=open").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(default.contains(r#"<a href="/?q=x&amp;state=closed">"#));
    assert!(open.contains(r#"<a href="/?q=x&amp;state=closed">"#));
}

#[tokio::test]
async fn test_list_unknown_state_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/?state=all").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_empty() {
    let server = TestServer::start().await.unwrap();
    let html = assert_text(server.get("/").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains("0 Open"));
    assert!(html.contains("There are no open issues."));
}

#[tokio::test]
async fn test_list_marks_unread_issues() {
    let users = Arc::new(StaticUserDirectory::new(gopher()));
    let index = Arc::new(MemoryNotificationIndex::new(users.clone()));
    index.notify(
        &gopher().spec(),
        Notification {
            repo: repo(),
            thread_type: ISSUES_THREAD_TYPE.to_string(),
            thread_id: 3,
            title: "open issue 3".to_string(),
        },
    );
    let index: Arc<dyn NotificationIndex> = index;
    let server = TestServer::start_with(users, Some(index)).await.unwrap();
    seed_mixed(&server.store);

    let html = assert_text(server.get("/").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(html.matches("box-shadow: 2px 0 0 #4183c4 inset;").count(), 1);
}

// ============================================================================
// Issue Page Tests
// ============================================================================

#[tokio::test]
async fn test_issue_page() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let html = assert_text(server.get("/42").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains("Issue forty-two"));
    assert!(html.contains("<p>Body of Issue forty-two</p>"));
    assert!(html.contains(r#"id="comment-0""#));
    assert!(html.contains(r#"id="new-item-marker""#));
    assert!(html.contains(r#""BaseURI":"""#));
    assert!(html.contains(r#""ReqPath":"/42""#));
}

#[tokio::test]
async fn test_issue_not_found() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_non_numeric_issue_id() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Edit Tests
// ============================================================================

#[tokio::test]
async fn test_close_issue_returns_fragments() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42_with_history(&server.store);

    let value = json!({ "State": "closed" }).to_string();
    let response = server
        .post_form("/42/edit", &[("value", value.as_str())])
        .await
        .unwrap();
    let fragments = assert_fragments(response, StatusCode::OK).await.unwrap();

    let badge: Vec<_> = fragments.get_all("issue-state-badge").collect();
    assert_eq!(badge.len(), 1);
    assert!(badge[0].contains("Closed"));
    assert!(badge[0].contains("#bd2c00"));

    let toggle: Vec<_> = fragments.get_all("issue-toggle-button").collect();
    assert_eq!(toggle.len(), 1);
    assert!(toggle[0].contains("Reopen issue"));

    let events: Vec<_> = fragments.get_all("new-event").collect();
    assert_eq!(events.len(), 1);
    assert!(events[0].contains("closed this"));
    assert!(events[0].contains("octicon-circle-slash"));
    assert!(events[0].contains(r#"id="event-3""#));

    // The new event follows the two already on the timeline
    let html = assert_text(server.get("/42").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let position = |id: &str| {
        html.find(&format!(r#"id="{id}""#))
            .unwrap_or_else(|| panic!("missing {id}"))
    };
    assert!(position("comment-0") < position("event-1"));
    assert!(position("event-1") < position("event-2"));
    assert!(position("event-2") < position("event-3"));
    assert!(position("event-3") < position("new-item-marker"));

    let count = server
        .store
        .count(&RequestContext::anonymous(), &repo(), StateFilter::Closed)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_edit_without_change_records_no_event() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let value = json!({ "State": "open" }).to_string();
    let response = server
        .post_form("/42/edit", &[("value", value.as_str())])
        .await
        .unwrap();
    let fragments = assert_fragments(response, StatusCode::OK).await.unwrap();
    assert_eq!(fragments.get_all("new-event").count(), 0);
    assert!(fragments
        .get_all("issue-toggle-button")
        .all(|html| html.contains("Close issue")));
}

#[tokio::test]
async fn test_edit_rejects_bad_state() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let value = json!({ "State": "merged" }).to_string();
    let response = server
        .post_form("/42/edit", &[("value", value.as_str())])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.post_form("/42/edit", &[("value", "{")]).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_post_comment_renders_it() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment", &[("value", "Hello from **gopher**")])
        .await
        .unwrap();
    let html = assert_text(response, StatusCode::OK).await.unwrap();
    assert!(html.contains(r#"id="comment-1""#));
    assert!(html.contains("<strong>gopher</strong>"));
    assert!(html.contains(r#"id="comment-1-reactions-container""#));
}

#[tokio::test]
async fn test_post_empty_comment_rejected() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server.post_form("/42/comment", &[("value", "  ")]).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_edit_comment_body() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/0", &[("value", "Edited body")])
        .await
        .unwrap();
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert!(body.is_empty());

    let html = assert_text(server.get("/42").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains("<p>Edited body</p>"));
    assert!(html.contains("Edited by gopher"));
}

#[tokio::test]
async fn test_only_author_edits_comment() {
    let server = TestServer::start_with_users(Arc::new(StaticUserDirectory::new(alice())))
        .await
        .unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/0", &[("value", "Not mine")])
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_edit_missing_comment() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/7", &[("value", "x")])
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_reaction() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/0/react", &[("reaction", "+1")])
        .await
        .unwrap();
    let fragments = assert_fragments(response, StatusCode::OK).await.unwrap();
    let reactions: Vec<_> = fragments.get_all("reactions").collect();
    assert_eq!(reactions.len(), 1);
    assert!(reactions[0].contains("reaction-button-selected"));
    assert!(reactions[0].contains("You reacted with :+1:."));
    assert!(reactions[0].contains("<strong>1</strong>"));
    assert_eq!(fragments.get_all("new-reaction").count(), 1);

    // Reacting again withdraws the reaction
    let response = server
        .post_form("/42/comment/0/react", &[("reaction", "+1")])
        .await
        .unwrap();
    let fragments = assert_fragments(response, StatusCode::OK).await.unwrap();
    assert!(fragments
        .get_all("reactions")
        .all(|html| html.trim().is_empty()));
}

#[tokio::test]
async fn test_anonymous_cannot_react() {
    let server = TestServer::start_anonymous().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/0/react", &[("reaction", "+1")])
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_script_in_reaction_rejected() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form(
            "/42/comment/0/react",
            &[("reaction", "x');alert(document.cookie);//")],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let html = assert_text(server.get("/42").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(!html.contains("alert(document.cookie)"));
}

#[tokio::test]
async fn test_empty_reaction_rejected() {
    let server = TestServer::start().await.unwrap();
    seed_issue_42(&server.store);

    let response = server
        .post_form("/42/comment/0/react", &[("reaction", "")])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// New Issue Tests
// ============================================================================

#[tokio::test]
async fn test_create_issue() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_json("/new", &json!({ "title": "New bug", "body": "It broke." }))
        .await
        .unwrap();
    let location = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(location, format!("{BASE_URI}/1"));

    let html = assert_text(server.get("/1").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains("New bug"));
    assert!(html.contains("<p>It broke.</p>"));
}

#[tokio::test]
async fn test_create_issue_blank_title() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_json("/new", &json!({ "title": "  ", "body": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_anonymous_cannot_create() {
    let server = TestServer::start_anonymous().await.unwrap();

    let response = server
        .post_json("/new", &json!({ "title": "Spam", "body": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let count = server
        .store
        .count(&RequestContext::anonymous(), &repo(), StateFilter::Open)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_anonymous_create_checked_before_body() {
    let server = TestServer::start_anonymous().await.unwrap();
    let response = server
        .client
        .post(format!("{}/new", server.base_url()))
        .header("content-type", "application/json")
        .body("{\"title\":")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // A signed-in caller gets the decoder's complaint instead
    let server = TestServer::start().await.unwrap();
    let response = server
        .client
        .post(format!("{}/new", server.base_url()))
        .header("content-type", "application/json")
        .body("{\"title\":")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_new_issue_page_requires_user() {
    let server = TestServer::start_anonymous().await.unwrap();
    let response = server.get("/new").await.unwrap();
    let body = assert_text(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body, "this page requires an authenticated user");

    let server = TestServer::start().await.unwrap();
    let html = assert_text(server.get("/new").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains("Submit new issue"));
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_and_cookie_tokens() {
    let jwt = JwtService::new("integration-secret", 3600);
    let token = jwt.issue(&gopher()).unwrap();
    let server = TestServer::start_with_users(Arc::new(JwtUserDirectory::new(jwt)))
        .await
        .unwrap();

    let response = server.get("/new").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/new", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_with_cookie("/new", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/new", "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Mount Tests
// ============================================================================

#[tokio::test]
async fn test_rendered_links_resolve_under_base_uri() {
    let server = TestServer::start_mounted("/issues").await.unwrap();
    seed_issue_42(&server.store);

    let html = assert_text(server.get("/issues").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(html.contains(r#""BaseURI":"/issues""#));

    // Follow the entry link exactly as rendered
    let marker = r#"<a class="black" href=""#;
    let start = html.find(marker).expect("issue entry link") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    let href = html[start..end].replace("&#x2F;", "/");
    assert_eq!(href, "/issues/42");

    let page = assert_text(server.get(&href).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.contains("Issue forty-two"));

    // Actions are served under the mount too
    let response = server
        .post_form("/issues/42/comment", &[("value", "Mounted reply")])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/42").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
