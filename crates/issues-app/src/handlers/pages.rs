//! Full page handlers

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Html,
};
use tracing::instrument;

use issues_render::{IndexPage, IssuePage, NewIssuePage};
use issues_service::PageRequest;

use super::{compose, scoped_templates};
use crate::extractors::{IssuePath, RequestCtx};
use crate::response::ApiResult;
use crate::state::AppState;

/// Issue list for the selected tab
///
/// GET /
#[instrument(skip_all, fields(query = ?uri.query()))]
pub async fn index(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let request = PageRequest::new(ctx, uri.path()).with_query(uri.query().map(str::to_string));
    let page = compose(&state, request).await?;

    let (issues, nav) = tokio::try_join!(page.issues(), page.nav())?;

    let templates = scoped_templates(&state, &page);
    let html = templates.render(
        "index.html",
        &IndexPage {
            base: templates.page_base(page.req_path()),
            issues,
            nav,
        },
    )?;
    Ok(Html(html))
}

/// Single issue with its timeline
///
/// GET /{id}
#[instrument(skip_all, fields(issue_id = %path.id))]
pub async fn issue(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<IssuePath>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let id = path.id()?;
    let page = compose(&state, PageRequest::new(ctx, uri.path()).with_issue(id)).await?;

    let (issue, items) = tokio::try_join!(page.issue(), page.items())?;

    let templates = scoped_templates(&state, &page);
    let html = templates.render(
        "issue.html",
        &IssuePage {
            base: templates.page_base(page.req_path()),
            issue,
            items,
        },
    )?;
    Ok(Html(html))
}

/// New issue form; anonymous viewers get a 401
///
/// GET /new
#[instrument(skip_all)]
pub async fn new_issue(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let page = compose(&state, PageRequest::new(ctx, uri.path())).await?;
    page.require_authenticated()?;

    let templates = scoped_templates(&state, &page);
    let html = templates.render(
        "new-issue.html",
        &NewIssuePage {
            base: templates.page_base(page.req_path()),
        },
    )?;
    Ok(Html(html))
}
