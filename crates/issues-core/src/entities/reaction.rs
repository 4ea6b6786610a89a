//! Reaction entity - an emoji and the users who reacted with it

use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::value_objects::EmojiId;

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: EmojiId,
    pub users: Vec<User>,
}

impl Reaction {
    pub fn new(emoji: EmojiId, users: Vec<User>) -> Self {
        Self { emoji, users }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.users.len()
    }

    /// Whether `user` is among the reactors
    pub fn contains(&self, user: &User) -> bool {
        self.users.iter().any(|u| u.same_as(user))
    }

    /// Toggle `user`'s `emoji` reaction within an ordered reaction list.
    ///
    /// Adding appends the user (or a new reaction entry at the end); removing
    /// drops the user and then the whole entry once nobody is left. Applying
    /// the same toggle twice restores the original list.
    pub fn toggle(reactions: &mut Vec<Reaction>, emoji: &EmojiId, user: &User) {
        match reactions.iter().position(|r| &r.emoji == emoji) {
            Some(idx) => {
                let reaction = &mut reactions[idx];
                if let Some(pos) = reaction.users.iter().position(|u| u.same_as(user)) {
                    reaction.users.remove(pos);
                    if reaction.users.is_empty() {
                        reactions.remove(idx);
                    }
                } else {
                    reaction.users.push(user.clone());
                }
            }
            None => reactions.push(Reaction::new(emoji.clone(), vec![user.clone()])),
        }
    }
}
