//! User link and avatar

use issues_core::User;

use super::{attr, text, Component};

/// Login in bold, linked to the profile when there is one
#[derive(Debug, Clone, Copy)]
pub struct UserLink<'a> {
    pub user: &'a User,
}

impl Component for UserLink<'_> {
    fn render(&self) -> String {
        let login = format!("<strong>{}</strong>", text(&self.user.login));
        if self.user.html_url.is_empty() {
            return login;
        }
        format!(
            r#"<a class="black" href="{}">{login}</a>"#,
            attr(&self.user.html_url)
        )
    }
}

/// Square avatar image
#[derive(Debug, Clone, Copy)]
pub struct Avatar<'a> {
    pub user: &'a User,
    /// Edge length in pixels
    pub size: u32,
}

impl Component for Avatar<'_> {
    fn render(&self) -> String {
        let img = format!(
            r#"<img style="width: {size}px; height: {size}px; border-radius: 3px;" src="{src}" alt="{alt}">"#,
            size = self.size,
            src = attr(&self.user.avatar_url),
            alt = attr(&self.user.login),
        );
        if self.user.html_url.is_empty() {
            return img;
        }
        format!(
            r#"<a class="avatar" href="{}">{img}</a>"#,
            attr(&self.user.html_url)
        )
    }
}
