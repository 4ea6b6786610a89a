//! Mutating handlers
//!
//! Called by the browser script. Each answers with just the markup the
//! client needs to patch the page.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Html,
};
use serde_json::json;
use tracing::instrument;

use issues_core::{EmojiId, IssueRequest, NewIssue};
use issues_render::components::{Component, IssueBadge};
use issues_render::FragmentSet;
use issues_service::{IssueService, PageRequest};

use super::{compose, compose_issue, scoped_templates};
use crate::extractors::{
    CommentPath, DeferredJson, FormBody, IssuePath, ReactionForm, RequestCtx, ValueForm,
};
use crate::response::{ApiResult, Fragments};
use crate::state::AppState;

/// Create an issue and answer with its URL. Anonymous callers get a 401
/// whatever the body holds.
///
/// POST /new
#[instrument(skip_all)]
pub async fn create_issue(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    uri: Uri,
    body: DeferredJson<NewIssue>,
) -> ApiResult<String> {
    let page = compose(&state, PageRequest::new(ctx, uri.path())).await?;
    page.require_authenticated()?;
    let issue = body.decode()?;

    let created = IssueService::new(state.service_context())
        .create(page.request(), page.repo(), issue)
        .await?;
    Ok(format!("{}/{}", page.base_uri(), created.id))
}

/// Change state and/or title. Answers with the new badge, the new toggle
/// button and one `new-event` fragment per recorded event.
///
/// POST /{id}/edit
#[instrument(skip_all, fields(issue_id = %path.id))]
pub async fn edit_issue(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<IssuePath>,
    uri: Uri,
    FormBody(form): FormBody<ValueForm>,
) -> ApiResult<Fragments> {
    let id = path.id()?;
    let request: IssueRequest = form.json()?;
    let page = compose_issue(&state, ctx, uri.path(), id).await?;

    let (issue, events) = IssueService::new(state.service_context())
        .edit(page.request(), page.repo(), id, request)
        .await?;

    let templates = scoped_templates(&state, &page);
    let mut fragments = FragmentSet::new();
    fragments.push("issue-state-badge", IssueBadge { state: &issue.state }.render());
    fragments.push(
        "issue-toggle-button",
        templates.render("toggle-button.html", &json!({ "issue": issue }))?,
    );
    for event in &events {
        fragments.push(
            "new-event",
            templates.render("event.html", &json!({ "event": event }))?,
        );
    }
    Ok(Fragments(fragments))
}

/// Post a reply and answer with the rendered comment
///
/// POST /{id}/comment
#[instrument(skip_all, fields(issue_id = %path.id))]
pub async fn post_comment(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<IssuePath>,
    uri: Uri,
    FormBody(form): FormBody<ValueForm>,
) -> ApiResult<Html<String>> {
    let id = path.id()?;
    let page = compose_issue(&state, ctx, uri.path(), id).await?;

    let comment = IssueService::new(state.service_context())
        .comment(page.request(), page.repo(), id, form.value)
        .await?;

    let html = scoped_templates(&state, &page)
        .render("comment.html", &json!({ "comment": comment }))?;
    Ok(Html(html))
}

/// Replace a comment body
///
/// POST /{id}/comment/{comment_id}
#[instrument(skip_all, fields(issue_id = %path.id, comment_id = %path.comment_id))]
pub async fn edit_comment(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<CommentPath>,
    uri: Uri,
    FormBody(form): FormBody<ValueForm>,
) -> ApiResult<StatusCode> {
    let id = path.id()?;
    let comment_id = path.comment_id()?;
    let page = compose_issue(&state, ctx, uri.path(), id).await?;

    IssueService::new(state.service_context())
        .edit_comment(page.request(), page.repo(), id, comment_id, form.value)
        .await?;
    Ok(StatusCode::OK)
}

/// Toggle the caller's reaction. Answers with the comment's reaction bar
/// and its "add reaction" button.
///
/// POST /{id}/comment/{comment_id}/react
#[instrument(skip_all, fields(issue_id = %path.id, comment_id = %path.comment_id))]
pub async fn toggle_reaction(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<CommentPath>,
    uri: Uri,
    FormBody(form): FormBody<ReactionForm>,
) -> ApiResult<Fragments> {
    let id = path.id()?;
    let comment_id = path.comment_id()?;
    let emoji = EmojiId::parse(&form.reaction)?;
    let page = compose_issue(&state, ctx, uri.path(), id).await?;

    let comment = IssueService::new(state.service_context())
        .toggle_reaction(
            page.request(),
            page.repo(),
            id,
            comment_id,
            emoji,
        )
        .await?;

    let templates = scoped_templates(&state, &page);
    let context = json!({ "comment": comment });
    let mut fragments = FragmentSet::new();
    fragments.push("reactions", templates.render("reactions.html", &context)?);
    fragments.push("new-reaction", templates.render("new-reaction.html", &context)?);
    Ok(Fragments(fragments))
}
