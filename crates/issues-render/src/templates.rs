//! Template set
//!
//! All templates are compiled into the binary and parsed once. Requests
//! render through a [`ScopedTemplates`] copy that adds the helpers bound to
//! the viewer and the current issue; the shared set is never mutated after
//! startup.

use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::debug;

use issues_core::User;

use crate::context::{ClientState, PageBase};
use crate::error::{RenderError, RenderResult};
use crate::helpers;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("issue.html", include_str!("../templates/issue.html")),
    ("new-issue.html", include_str!("../templates/new-issue.html")),
    ("comment.html", include_str!("../templates/comment.html")),
    ("event.html", include_str!("../templates/event.html")),
    ("reactions.html", include_str!("../templates/reactions.html")),
    ("new-reaction.html", include_str!("../templates/new-reaction.html")),
    ("toggle-button.html", include_str!("../templates/toggle-button.html")),
];

/// Embedder-supplied page options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiOptions {
    /// Raw HTML emitted at the top of `<head>`
    pub head_pre: String,
    /// Raw HTML emitted at the top of `<body>`
    pub body_pre: String,
    pub disable_reactions: bool,
}

/// Request-bound values the scoped helpers close over
#[derive(Debug, Clone, Default)]
pub struct RenderScope {
    pub current_user: User,
    pub issue_id: Option<u64>,
    pub base_uri: String,
}

impl RenderScope {
    pub fn new(current_user: User, base_uri: impl Into<String>) -> Self {
        Self {
            current_user,
            issue_id: None,
            base_uri: base_uri.into(),
        }
    }

    pub fn with_issue(mut self, issue_id: u64) -> Self {
        self.issue_id = Some(issue_id);
        self
    }
}

/// Parsed templates with the scope-free helpers registered
#[derive(Debug, Clone)]
pub struct TemplateSet {
    tera: Tera,
    options: Arc<UiOptions>,
}

impl TemplateSet {
    /// Parse every template. Fails on the first syntax error.
    pub fn new(options: &UiOptions) -> RenderResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        helpers::register_static(&mut tera);
        debug!(templates = TEMPLATES.len(), "Templates loaded");
        Ok(Self {
            tera,
            options: Arc::new(options.clone()),
        })
    }

    pub fn options(&self) -> &UiOptions {
        &self.options
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Copy of the set with the request-bound helpers registered
    pub fn scoped(&self, scope: &RenderScope) -> ScopedTemplates {
        let mut tera = self.tera.clone();
        helpers::register_scoped(
            &mut tera,
            &scope.current_user,
            &scope.base_uri,
            scope.issue_id,
        );
        ScopedTemplates {
            tera,
            options: Arc::clone(&self.options),
            scope: scope.clone(),
        }
    }

    /// Render without request scope. Only the `ui` options are injected.
    pub fn render<C: Serialize>(&self, name: &str, context: &C) -> RenderResult<String> {
        let mut ctx = Context::from_serialize(context)?;
        ctx.insert("ui", self.options.as_ref());
        render_with(&self.tera, name, &ctx)
    }
}

/// Per-request template set
#[derive(Debug)]
pub struct ScopedTemplates {
    tera: Tera,
    options: Arc<UiOptions>,
    scope: RenderScope,
}

impl ScopedTemplates {
    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }

    /// Common page fields for a page at `req_path`
    pub fn page_base(&self, req_path: &str) -> PageBase {
        PageBase {
            req_path: req_path.to_string(),
            state: ClientState {
                base_uri: self.scope.base_uri.clone(),
                req_path: req_path.to_string(),
                current_user: self.scope.current_user.clone(),
                disable_reactions: self.options.disable_reactions,
            },
        }
    }

    /// Render a page or fragment.
    ///
    /// `ui`, `base_uri`, `current_user` and `issue_id` are available to
    /// every template in addition to the fields of `context`.
    pub fn render<C: Serialize>(&self, name: &str, context: &C) -> RenderResult<String> {
        let mut ctx = Context::from_serialize(context)?;
        ctx.insert("ui", self.options.as_ref());
        ctx.insert("base_uri", &self.scope.base_uri);
        ctx.insert("current_user", &self.scope.current_user);
        ctx.insert("issue_id", &self.scope.issue_id);
        render_with(&self.tera, name, &ctx)
    }
}

fn render_with(tera: &Tera, name: &str, ctx: &Context) -> RenderResult<String> {
    if !tera.get_template_names().any(|n| n == name) {
        return Err(RenderError::NotFound(name.to_string()));
    }
    Ok(tera.render(name, ctx)?)
}
