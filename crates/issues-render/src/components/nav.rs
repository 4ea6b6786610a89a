//! Open/Closed tab header

use issues_service::tabs::{IssuesNav as NavModel, Tab};

use super::{attr, octicon, Component};

/// Header over the issue list with one link per tab
#[derive(Debug, Clone, Copy)]
pub struct IssuesNav<'a> {
    pub nav: &'a NavModel,
}

impl IssuesNav<'_> {
    fn link(tab: &Tab, label: String) -> String {
        match &tab.href {
            None => format!(r#"<a class="selected">{label}</a>"#),
            Some(href) => format!(r#"<a href="{}">{label}</a>"#, attr(href)),
        }
    }
}

impl Component for IssuesNav<'_> {
    fn render(&self) -> String {
        let open = Self::link(
            &self.nav.open,
            OpenIssuesTab {
                count: self.nav.open.count,
            }
            .render(),
        );
        let closed = Self::link(
            &self.nav.closed,
            ClosedIssuesTab {
                count: self.nav.closed.count,
            }
            .render(),
        );
        format!(r#"<div class="list-entry-header"><nav>{open}{closed}</nav></div>"#)
    }
}

/// "N Open" tab label
#[derive(Debug, Clone, Copy)]
pub struct OpenIssuesTab {
    pub count: u64,
}

impl Component for OpenIssuesTab {
    fn render(&self) -> String {
        format!(
            r#"<span><span style="margin-right: 4px;">{}</span>{} Open</span>"#,
            octicon("issue-opened"),
            self.count
        )
    }
}

/// "N Closed" tab label
#[derive(Debug, Clone, Copy)]
pub struct ClosedIssuesTab {
    pub count: u64,
}

impl Component for ClosedIssuesTab {
    fn render(&self) -> String {
        format!(
            r#"<span style="margin-left: 12px;"><span style="margin-right: 4px;">{}</span>{} Closed</span>"#,
            octicon("check"),
            self.count
        )
    }
}
