//! Sample data for the in-memory store

use issues_core::{Comment, EmojiId, Issue, Reaction, RepoSpec, User, UserSpec};

use super::MemoryIssueStore;

/// Insert the sample issue a fresh development server starts with.
///
/// Returns the ID it was stored under.
pub fn seed_sample_issue(store: &MemoryIssueStore, repo: &RepoSpec, author: &User) -> u64 {
    let mut comment = Comment::new(0, author.clone(), "This is a test issue.");
    let bystander = User::new(UserSpec::new(2, author.domain.clone()), "bystander");
    comment.reactions = vec![
        Reaction::new(EmojiId::new("grinning"), vec![author.clone()]),
        Reaction::new(EmojiId::new("+1"), vec![author.clone(), bystander.clone()]),
        Reaction::new(EmojiId::new("construction_worker"), vec![bystander]),
    ];
    store.insert_issue(repo, Issue::new(0, "Title", comment))
}
