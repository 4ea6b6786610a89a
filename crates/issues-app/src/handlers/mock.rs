//! Template preview with fixed sample data

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Html,
};

use issues_render::mock::render_mock;
use issues_service::PageRequest;

use super::compose;
use crate::extractors::{MockPath, RequestCtx};
use crate::response::ApiResult;
use crate::state::AppState;

/// Render a template against the mock issue
///
/// GET /mock/{template}
pub async fn preview(
    State(state): State<AppState>,
    RequestCtx(ctx): RequestCtx,
    Path(path): Path<MockPath>,
    uri: Uri,
) -> ApiResult<Html<String>> {
    let page = compose(&state, PageRequest::new(ctx, uri.path())).await?;
    let html = render_mock(
        state.templates(),
        page.current_user().clone(),
        page.base_uri(),
        &path.template,
    )?;
    Ok(Html(html))
}
