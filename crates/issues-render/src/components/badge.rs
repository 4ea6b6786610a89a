//! Issue state badge and icon

use issues_core::IssueState;

use super::{octicon, text, Component};

const OPEN_COLOR: &str = "#6cc644";
const CLOSED_COLOR: &str = "#bd2c00";

/// Glyph, label and color for the two known states
fn known_state(state: &IssueState) -> Option<(&'static str, &'static str, &'static str)> {
    match state {
        IssueState::Open => Some(("issue-opened", "Open", OPEN_COLOR)),
        IssueState::Closed => Some(("issue-closed", "Closed", CLOSED_COLOR)),
        IssueState::Other(_) => None,
    }
}

/// Colored badge showing the issue's state.
///
/// Unknown states render as their escaped name.
#[derive(Debug, Clone, Copy)]
pub struct IssueBadge<'a> {
    pub state: &'a IssueState,
}

impl Component for IssueBadge<'_> {
    fn render(&self) -> String {
        let Some((glyph, label, color)) = known_state(self.state) else {
            return text(self.state.as_str()).into_owned();
        };
        format!(
            concat!(
                r#"<span style="display: inline-block; padding: 4px 6px 4px 6px; margin: 4px; color: #fff; background-color: {color};">"#,
                r#"<span style="margin-right: 6px;">{icon}</span>{label}</span>"#,
            ),
            color = color,
            icon = octicon(glyph),
            label = label,
        )
    }
}

/// Colored state glyph used in issue lists
#[derive(Debug, Clone, Copy)]
pub struct IssueIcon<'a> {
    pub state: &'a IssueState,
}

impl Component for IssueIcon<'_> {
    fn render(&self) -> String {
        match known_state(self.state) {
            Some((glyph, _, color)) => format!(
                r#"<span style="margin-right: 6px; color: {color};">{}</span>"#,
                octicon(glyph)
            ),
            None => text(self.state.as_str()).into_owned(),
        }
    }
}
