//! Template helpers
//!
//! Static helpers depend only on their arguments and are registered once
//! on the shared template set. Scoped helpers close over the viewer and the
//! current issue and are registered on each per-request copy.

use chrono::{DateTime, Utc};
use comrak::{markdown_to_html, Options};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tera::{Filter, Function, Tera, Value};

use issues_core::{Event, EventKind, Issue, IssueState, Label, Reaction, User};
use issues_service::IssuesNav as NavModel;

use crate::components::{
    Avatar, Component, EventIcon, EventText, IssueBadge, IssueEntry, IssueIcon, IssuesNav,
    LabelBadge, RelativeTime, UserLink,
};

// ============================================================================
// Plumbing
// ============================================================================

/// Deserialize a named argument
fn arg<T: DeserializeOwned>(args: &HashMap<String, Value>, name: &str) -> tera::Result<T> {
    let value = args
        .get(name)
        .ok_or_else(|| tera::Error::msg(format!("missing argument `{name}`")))?;
    serde_json::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("argument `{name}`: {e}")))
}

fn as_str<'v>(value: &'v Value, filter: &str) -> tera::Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter requires a string")))
}

/// Function returning HTML that must not be escaped again
struct HtmlFn<F>(F);

impl<F> Function for HtmlFn<F>
where
    F: Fn(&HashMap<String, Value>) -> tera::Result<String> + Send + Sync,
{
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        (self.0)(args).map(Value::String)
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Filter returning HTML that must not be escaped again
struct HtmlFilter<F>(F);

impl<F> Filter for HtmlFilter<F>
where
    F: Fn(&Value) -> tera::Result<String> + Send + Sync,
{
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        (self.0)(value).map(Value::String)
    }

    fn is_safe(&self) -> bool {
        true
    }
}

// ============================================================================
// Static helpers
// ============================================================================

/// GitHub-flavored markdown with raw HTML escaped
pub fn markdown(source: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.escape = true;
    markdown_to_html(source, &options)
}

/// Shortcodes with a Unicode rendering. Anything else is shown as `:code:`.
const EMOJI: &[(&str, &str)] = &[
    ("+1", "\u{1f44d}"),
    ("-1", "\u{1f44e}"),
    ("thumbsup", "\u{1f44d}"),
    ("thumbsdown", "\u{1f44e}"),
    ("smile", "\u{1f604}"),
    ("grinning", "\u{1f600}"),
    ("laughing", "\u{1f606}"),
    ("confused", "\u{1f615}"),
    ("heart", "\u{2764}\u{fe0f}"),
    ("tada", "\u{1f389}"),
    ("hooray", "\u{1f389}"),
    ("rocket", "\u{1f680}"),
    ("eyes", "\u{1f440}"),
    ("construction_worker", "\u{1f477}"),
    ("fire", "\u{1f525}"),
    ("100", "\u{1f4af}"),
];

/// Emoji span for a reaction shortcode (without colons)
pub fn emoji(id: &str) -> String {
    let glyph = EMOJI
        .iter()
        .find(|(code, _)| *code == id)
        .map_or_else(|| format!(":{id}:"), |(_, glyph)| (*glyph).to_string());
    format!(
        r#"<span class="emoji" title=":{}:">{}</span>"#,
        html_escape::encode_double_quoted_attribute(id),
        html_escape::encode_text(&glyph)
    )
}

/// JSON safe to embed inside a `<script>` element
pub fn script_json(value: &Value) -> tera::Result<String> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| tera::Error::msg(format!("json filter: {e}")))?;
    Ok(encoded.replace("</", "<\\/"))
}

fn reltime(value: &Value) -> tera::Result<String> {
    let raw = as_str(value, "reltime")?;
    let time: DateTime<Utc> = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| tera::Error::msg(format!("reltime filter: {e}")))?
        .with_timezone(&Utc);
    Ok(RelativeTime::new(time).render())
}

/// Register filters and component functions that need no request scope
pub(crate) fn register_static(tera: &mut Tera) {
    tera.register_filter("reltime", HtmlFilter(reltime));
    tera.register_filter(
        "markdown",
        HtmlFilter(|v: &Value| as_str(v, "markdown").map(markdown)),
    );
    tera.register_filter("emoji", HtmlFilter(|v: &Value| as_str(v, "emoji").map(emoji)));
    tera.register_filter("json", HtmlFilter(script_json));

    tera.register_function(
        "issue_badge",
        HtmlFn(|args: &HashMap<String, Value>| {
            let state: IssueState = arg(args, "state")?;
            Ok(IssueBadge { state: &state }.render())
        }),
    );
    tera.register_function(
        "issue_icon",
        HtmlFn(|args: &HashMap<String, Value>| {
            let state: IssueState = arg(args, "state")?;
            Ok(IssueIcon { state: &state }.render())
        }),
    );
    tera.register_function(
        "label_badge",
        HtmlFn(|args: &HashMap<String, Value>| {
            let label: Label = arg(args, "label")?;
            Ok(LabelBadge { label: &label }.render())
        }),
    );
    tera.register_function(
        "user_link",
        HtmlFn(|args: &HashMap<String, Value>| {
            let user: User = arg(args, "user")?;
            Ok(UserLink { user: &user }.render())
        }),
    );
    tera.register_function(
        "avatar",
        HtmlFn(|args: &HashMap<String, Value>| {
            let user: User = arg(args, "user")?;
            let size: u32 = arg(args, "size").unwrap_or(48);
            Ok(Avatar { user: &user, size }.render())
        }),
    );
    tera.register_function(
        "issue_entry",
        HtmlFn(|args: &HashMap<String, Value>| {
            let issue: Issue = arg(args, "issue")?;
            let base_uri: String = arg(args, "base_uri")?;
            Ok(IssueEntry {
                issue: &issue,
                base_uri: &base_uri,
            }
            .render())
        }),
    );
    tera.register_function(
        "issues_nav",
        HtmlFn(|args: &HashMap<String, Value>| {
            let nav: NavModel = arg(args, "nav")?;
            Ok(IssuesNav { nav: &nav }.render())
        }),
    );
    tera.register_function(
        "event_icon",
        HtmlFn(|args: &HashMap<String, Value>| {
            let kind: EventKind = arg(args, "kind")?;
            Ok(EventIcon { kind: &kind }.render())
        }),
    );
    tera.register_function(
        "event_text",
        HtmlFn(|args: &HashMap<String, Value>| {
            let event: Event = arg(args, "event")?;
            Ok(EventText { event: &event }.render())
        }),
    );
}

// ============================================================================
// Scoped helpers
// ============================================================================

/// Whether `current` is among `users`. The anonymous viewer never is.
pub fn contains_user(users: &[User], current: &User) -> bool {
    !current.is_anonymous() && users.iter().any(|u| u.same_as(current))
}

/// "You, alice and bob reacted with :+1:."
///
/// Users without a login are named "someone".
pub fn reaction_tooltip(reaction: &Reaction, current: &User) -> String {
    let count = reaction.users.len();
    let mut names = String::new();
    for (i, user) in reaction.users.iter().enumerate() {
        if i != 0 {
            names.push_str(if i < count - 1 { ", " } else { " and " });
        }
        if contains_user(std::slice::from_ref(user), current) {
            names.push_str(if i == 0 { "You" } else { "you" });
        } else if user.login.trim().is_empty() {
            names.push_str(if i == 0 { "Someone" } else { "someone" });
        } else {
            names.push_str(&user.login);
        }
    }
    format!("{names} reacted with :{}:.", reaction.emoji)
}

/// Toggle endpoint for reactions on a comment of the current issue
pub fn reaction_endpoint(base_uri: &str, issue_id: u64, comment_id: u64) -> String {
    format!("{base_uri}/{issue_id}/comment/{comment_id}/react")
}

struct ContainsCurrentUser {
    user: User,
}

impl Function for ContainsCurrentUser {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let users: Vec<User> = arg(args, "users")?;
        Ok(Value::Bool(contains_user(&users, &self.user)))
    }
}

struct ReactionTooltip {
    user: User,
}

impl Function for ReactionTooltip {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let reaction: Reaction = arg(args, "reaction")?;
        Ok(Value::String(reaction_tooltip(&reaction, &self.user)))
    }
}

struct ReactionEndpoint {
    base_uri: String,
    issue_id: Option<u64>,
}

impl Function for ReactionEndpoint {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let issue_id = self
            .issue_id
            .ok_or_else(|| tera::Error::msg("reaction_endpoint needs an issue in scope"))?;
        let comment_id: u64 = arg(args, "comment_id")?;
        Ok(Value::String(reaction_endpoint(
            &self.base_uri,
            issue_id,
            comment_id,
        )))
    }
}

/// Register the helpers that depend on the viewer and the current issue
pub(crate) fn register_scoped(tera: &mut Tera, user: &User, base_uri: &str, issue_id: Option<u64>) {
    tera.register_function("contains_current_user", ContainsCurrentUser { user: user.clone() });
    tera.register_function("reaction_tooltip", ReactionTooltip { user: user.clone() });
    tera.register_function(
        "reaction_endpoint",
        ReactionEndpoint {
            base_uri: base_uri.to_string(),
            issue_id,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use issues_core::{EmojiId, UserSpec};

    fn user(id: u64, login: &str) -> User {
        User::new(UserSpec::new(id, "example.org"), login)
    }

    fn reaction(users: Vec<User>) -> Reaction {
        Reaction::new(EmojiId::new("+1"), users)
    }

    #[test]
    fn test_tooltip_joins_names() {
        let viewer = user(1, "me");
        assert_eq!(
            reaction_tooltip(&reaction(vec![user(2, "alice")]), &viewer),
            "alice reacted with :+1:."
        );
        assert_eq!(
            reaction_tooltip(&reaction(vec![user(2, "alice"), user(3, "bob")]), &viewer),
            "alice and bob reacted with :+1:."
        );
        assert_eq!(
            reaction_tooltip(
                &reaction(vec![user(1, "me"), user(2, "alice"), user(3, "bob")]),
                &viewer
            ),
            "You, alice and bob reacted with :+1:."
        );
        assert_eq!(
            reaction_tooltip(&reaction(vec![user(2, "alice"), user(1, "me")]), &viewer),
            "alice and you reacted with :+1:."
        );
    }

    #[test]
    fn test_anonymous_viewer_never_matches() {
        let anonymous = User::anonymous();
        let users = vec![User::anonymous(), user(2, "alice")];
        assert!(!contains_user(&users, &anonymous));
        assert_eq!(
            reaction_tooltip(&reaction(users), &anonymous),
            "Someone and alice reacted with :+1:."
        );
    }

    #[test]
    fn test_tooltip_names_users_without_login() {
        let viewer = user(1, "me");
        assert_eq!(
            reaction_tooltip(&reaction(vec![user(2, "alice"), user(3, "")]), &viewer),
            "alice and someone reacted with :+1:."
        );
    }

    #[test]
    fn test_contains_user() {
        let users = vec![user(1, "me"), user(2, "alice")];
        assert!(contains_user(&users, &user(1, "renamed")));
        assert!(!contains_user(&users, &user(3, "carol")));
    }

    #[test]
    fn test_reaction_endpoint() {
        assert_eq!(reaction_endpoint("/issues", 4, 0), "/issues/4/comment/0/react");
        assert_eq!(reaction_endpoint("", 4, 2), "/4/comment/2/react");
    }

    #[test]
    fn test_markdown_escapes_raw_html() {
        let html = markdown("Fixed in [`4387efb`](https://www.example.com).\n\n<script>x</script>");
        assert!(html.contains(r#"<a href="https://www.example.com"><code>4387efb</code></a>"#));
        assert!(!html.contains("<script>"));
        assert!(markdown("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn test_emoji() {
        assert_eq!(
            emoji("+1"),
            "<span class=\"emoji\" title=\":+1:\">\u{1f44d}</span>"
        );
        assert!(emoji("unknown").contains(":unknown:</span>"));
    }

    #[test]
    fn test_script_json() {
        let value = serde_json::json!({ "BaseURI": "</script>" });
        assert_eq!(script_json(&value).unwrap(), r#"{"BaseURI":"<\/script>"}"#);
    }
}
