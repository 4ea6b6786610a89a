//! Timeline event icon and text

use issues_core::{Event, EventKind};

use super::{text, Component};

/// Octicon class for an event kind
#[derive(Debug, Clone, Copy)]
pub struct EventIcon<'a> {
    pub kind: &'a EventKind,
}

impl EventIcon<'_> {
    pub fn class(&self) -> &'static str {
        match self.kind {
            EventKind::Closed => "octicon-circle-slash",
            EventKind::Renamed => "octicon-pencil",
            EventKind::Labeled | EventKind::Unlabeled => "octicon-tag",
            EventKind::Reopened | EventKind::Other(_) => "octicon-primitive-dot",
        }
    }
}

impl Component for EventIcon<'_> {
    fn render(&self) -> String {
        format!(r#"<span class="octicon {}"></span>"#, self.class())
    }
}

/// What an event says, e.g. "closed this"
#[derive(Debug, Clone, Copy)]
pub struct EventText<'a> {
    pub event: &'a Event,
}

impl Component for EventText<'_> {
    fn render(&self) -> String {
        match (&self.event.kind, &self.event.rename, &self.event.label) {
            (EventKind::Reopened | EventKind::Closed, _, _) => format!("{} this", self.event.kind),
            (EventKind::Renamed, Some(rename), _) => format!(
                "changed the title from <strong>{}</strong> to <strong>{}</strong>",
                text(&rename.from),
                text(&rename.to)
            ),
            (EventKind::Labeled, _, Some(label)) => {
                format!("added the <strong>{}</strong> label", text(&label.name))
            }
            (EventKind::Unlabeled, _, Some(label)) => {
                format!("removed the <strong>{}</strong> label", text(&label.name))
            }
            (kind, _, _) => text(kind.as_str()).into_owned(),
        }
    }
}
