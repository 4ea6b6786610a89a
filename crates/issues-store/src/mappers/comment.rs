//! Comment, reaction and user mappers

use issues_core::{Comment, Edited, EmojiId, Reaction, User};

use crate::models::{CommentRecord, EditedRecord, ReactionRecord, UserRecord};

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            domain: record.domain,
            login: record.login,
            avatar_url: record.avatar_url,
            html_url: record.html_url,
        }
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        UserRecord {
            id: user.id,
            domain: user.domain.clone(),
            login: user.login.clone(),
            avatar_url: user.avatar_url.clone(),
            html_url: user.html_url.clone(),
        }
    }
}

impl From<ReactionRecord> for Reaction {
    fn from(record: ReactionRecord) -> Self {
        Reaction::new(
            EmojiId::new(record.emoji),
            record.users.into_iter().map(User::from).collect(),
        )
    }
}

impl From<&Reaction> for ReactionRecord {
    fn from(reaction: &Reaction) -> Self {
        ReactionRecord {
            emoji: reaction.emoji.to_string(),
            users: reaction.users.iter().map(UserRecord::from).collect(),
        }
    }
}

impl CommentRecord {
    /// Comment entity stored under `id`
    pub fn into_comment(self, id: u64) -> Comment {
        Comment {
            id,
            user: self.author.into(),
            created_at: self.created_at,
            edited: self.edited.map(|e| Edited {
                by: e.by.into(),
                at: e.at,
            }),
            body: self.body,
            reactions: self.reactions.into_iter().map(Reaction::from).collect(),
        }
    }
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        CommentRecord {
            author: (&comment.user).into(),
            created_at: comment.created_at,
            edited: comment.edited.as_ref().map(|e| EditedRecord {
                by: (&e.by).into(),
                at: e.at,
            }),
            body: comment.body.clone(),
            reactions: comment.reactions.iter().map(ReactionRecord::from).collect(),
        }
    }
}
