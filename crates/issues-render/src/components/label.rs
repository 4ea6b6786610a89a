//! Label badge

use issues_core::Label;

use super::{text, Component};

/// A label in its own color, with black or white text for contrast
#[derive(Debug, Clone, Copy)]
pub struct LabelBadge<'a> {
    pub label: &'a Label,
}

impl LabelBadge<'_> {
    /// Text color for the label's background: white below luminance 128
    pub fn foreground(&self) -> &'static str {
        if self.label.color.luminance() < 128 {
            "#fff"
        } else {
            "#000"
        }
    }
}

impl Component for LabelBadge<'_> {
    fn render(&self) -> String {
        format!(
            r#"<span style="display: inline-block; font-size: 12px; line-height: 1.2; padding: 0px 3px 0px 3px; border-radius: 2px; color: {fg}; background-color: {bg};">{name}</span>"#,
            fg = self.foreground(),
            bg = self.label.color.hex(),
            name = text(&self.label.name),
        )
    }
}
