//! Event and label mappers

use issues_core::{Event, EventKind, Label, Rename, Rgb};

use crate::models::{EventRecord, LabelRecord, RenameRecord};

impl From<LabelRecord> for Label {
    fn from(record: LabelRecord) -> Self {
        let [r, g, b] = record.color;
        Label::new(record.name, Rgb::new(r, g, b))
    }
}

impl From<&Label> for LabelRecord {
    fn from(label: &Label) -> Self {
        LabelRecord {
            name: label.name.clone(),
            color: [label.color.r, label.color.g, label.color.b],
        }
    }
}

impl EventRecord {
    /// Event entity stored under `id`
    pub fn into_event(self, id: u64) -> Event {
        Event {
            id,
            actor: self.actor.into(),
            created_at: self.created_at,
            kind: EventKind::from(self.kind),
            rename: self.rename.map(|r| Rename {
                from: r.from,
                to: r.to,
            }),
            label: self.label.map(Label::from),
        }
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        EventRecord {
            actor: (&event.actor).into(),
            created_at: event.created_at,
            kind: event.kind.to_string(),
            rename: event.rename.as_ref().map(|r| RenameRecord {
                from: r.from.clone(),
                to: r.to.clone(),
            }),
            label: event.label.as_ref().map(LabelRecord::from),
        }
    }
}
