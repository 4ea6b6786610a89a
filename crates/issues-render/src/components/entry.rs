//! One row of the issue list

use issues_core::Issue;

use super::{attr, octicon, text, Component, IssueIcon, LabelBadge, RelativeTime};

/// Icon, linked title, labels, byline and reply count of an issue.
///
/// Unread issues get a blue bar on their left edge.
#[derive(Debug, Clone, Copy)]
pub struct IssueEntry<'a> {
    pub issue: &'a Issue,
    pub base_uri: &'a str,
}

impl Component for IssueEntry<'_> {
    fn render(&self) -> String {
        let issue = self.issue;

        let labels: String = issue
            .labels
            .iter()
            .map(|label| {
                format!(
                    r#"<span style="margin-left: 4px;">{}</span>"#,
                    LabelBadge { label }.render()
                )
            })
            .collect();

        let title = format!(
            r#"<div><a class="black" href="{href}"><strong>{title}</strong></a>{labels}</div>"#,
            href = attr(&format!("{}/{}", self.base_uri, issue.id)),
            title = text(&issue.title),
        );
        let byline = format!(
            r#"<div class="gray tiny">#{id} opened {time} by {login}</div>"#,
            id = issue.id,
            time = RelativeTime::new(issue.comment.created_at).render(),
            login = text(&issue.comment.user.login),
        );
        let replies_class = if issue.replies == 0 {
            "tiny lightgray"
        } else {
            "tiny gray"
        };
        let replies = format!(
            r#"<span title="{n} replies" class="{replies_class}">{icon} {n}</span>"#,
            n = issue.replies,
            icon = octicon("comment"),
        );

        let style = if issue.unread {
            r#" style="box-shadow: 2px 0 0 #4183c4 inset;""#
        } else {
            ""
        };
        format!(
            r#"<div class="list-entry-body multilist-entry"{style}><div style="display: flex;">{icon}<div style="flex-grow: 1;">{title}{byline}</div>{replies}</div></div>"#,
            icon = IssueIcon { state: &issue.state }.render(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issues_core::{Comment, Label, Rgb, User, UserSpec};

    fn issue() -> Issue {
        let user = User::new(UserSpec::new(1, "example.org"), "gopher");
        let mut issue = Issue::new(7, "Crash on <start>", Comment::new(0, user, "body"));
        issue.labels.push(Label::new("bug", Rgb::new(0xfc, 0x29, 0x29)));
        issue
    }

    #[test]
    fn test_entry_markup() {
        let issue = issue();
        let html = IssueEntry { issue: &issue, base_uri: "/issues" }.render();
        assert!(html.starts_with(r#"<div class="list-entry-body multilist-entry"><div"#));
        assert!(html.contains(r#"<a class="black" href="/issues/7"><strong>Crash on &lt;start&gt;</strong></a>"#));
        assert!(html.contains(r#"<span style="margin-left: 4px;"><span"#));
        assert!(html.contains("#7 opened <abbr"));
        assert!(html.contains("</abbr> by gopher</div>"));
        assert!(html.contains(r#"<span title="0 replies" class="tiny lightgray">"#));
    }

    #[test]
    fn test_unread_and_replies() {
        let mut issue = issue();
        issue.unread = true;
        issue.replies = 3;
        let html = IssueEntry { issue: &issue, base_uri: "" }.render();
        assert!(html.contains(r#"style="box-shadow: 2px 0 0 #4183c4 inset;""#));
        assert!(html.contains(r#"<span title="3 replies" class="tiny gray">"#));
        assert!(html.contains(r#"href="/7""#));
    }
}
