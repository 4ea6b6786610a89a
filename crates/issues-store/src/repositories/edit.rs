//! Mutation rules shared by the stores

use issues_core::{
    Comment, CommentRequest, DomainError, Event, EventKind, IssueRequest, IssueState,
    Reaction, RepoResult, User,
};

/// Apply `req` to an issue's state and title.
///
/// Returns the events the change produced; an edit that changes nothing
/// produces none. `next_event_id` is called once per produced event.
pub fn apply_issue_request(
    state: &mut IssueState,
    title: &mut String,
    req: &IssueRequest,
    actor: &User,
    mut next_event_id: impl FnMut() -> u64,
) -> Vec<Event> {
    let mut events = Vec::new();

    if let Some(new_state) = req.state() {
        if new_state != *state {
            let kind = match new_state {
                IssueState::Closed => EventKind::Closed,
                _ => EventKind::Reopened,
            };
            *state = new_state;
            events.push(Event::new(next_event_id(), actor.clone(), kind));
        }
    }

    if let Some(new_title) = &req.title {
        if new_title != title {
            let from = std::mem::replace(title, new_title.clone());
            events.push(Event::renamed(
                next_event_id(),
                actor.clone(),
                from,
                new_title.clone(),
            ));
        }
    }

    events
}

/// Apply `req` to a comment on behalf of `actor`.
///
/// Only the author may change a body; anyone signed in may react.
pub fn apply_comment_request(
    comment: &mut Comment,
    req: &CommentRequest,
    actor: &User,
) -> RepoResult<()> {
    if let Some(body) = &req.body {
        if !comment.user.same_as(actor) {
            return Err(DomainError::permission_denied(
                "only the author can edit this comment",
            ));
        }
        comment.edit_body(body.clone(), actor);
    }
    if let Some(emoji) = &req.reaction {
        Reaction::toggle(&mut comment.reactions, emoji, actor);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use issues_core::{EmojiId, UserSpec};

    fn gopher() -> User {
        User::new(UserSpec::new(1, "example.org"), "gopher")
    }

    fn counter(start: u64) -> impl FnMut() -> u64 {
        let mut next = start;
        move || {
            let id = next;
            next += 1;
            id
        }
    }

    #[test]
    fn test_close_emits_closed_event() {
        let mut state = IssueState::Open;
        let mut title = "Title".to_string();
        let events =
            apply_issue_request(&mut state, &mut title, &IssueRequest::close(), &gopher(), counter(1));
        assert_eq!(state, IssueState::Closed);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Closed);
        assert_eq!(events[0].id, 1);
    }

    #[test]
    fn test_noop_edit_emits_nothing() {
        let mut state = IssueState::Closed;
        let mut title = "Title".to_string();
        let req = IssueRequest {
            state: Some("closed".into()),
            title: Some("Title".into()),
        };
        let events = apply_issue_request(&mut state, &mut title, &req, &gopher(), counter(1));
        assert!(events.is_empty());
    }

    #[test]
    fn test_reopen_and_rename() {
        let mut state = IssueState::Closed;
        let mut title = "Old".to_string();
        let req = IssueRequest {
            state: Some("open".into()),
            title: Some("New".into()),
        };
        let events = apply_issue_request(&mut state, &mut title, &req, &gopher(), counter(7));
        assert_eq!(title, "New");
        assert_eq!(events[0].kind, EventKind::Reopened);
        let rename = events[1].rename.as_ref().unwrap();
        assert_eq!((rename.from.as_str(), rename.to.as_str()), ("Old", "New"));
        assert_eq!(events[1].id, 8);
    }

    #[test]
    fn test_body_edit_requires_author() {
        let mut comment = Comment::new(1, gopher(), "hello");
        let stranger = User::new(UserSpec::new(2, "example.org"), "alice");

        let err = apply_comment_request(&mut comment, &CommentRequest::body(1, "x"), &stranger)
            .unwrap_err();
        assert!(err.is_authorization());

        apply_comment_request(&mut comment, &CommentRequest::body(1, "edited"), &gopher()).unwrap();
        assert_eq!(comment.body, "edited");
        assert!(comment.edited.is_some());
    }

    #[test]
    fn test_anyone_can_react() {
        let mut comment = Comment::new(1, gopher(), "hello");
        let stranger = User::new(UserSpec::new(2, "example.org"), "alice");
        let req = CommentRequest::reaction(1, EmojiId::new("tada"));
        apply_comment_request(&mut comment, &req, &stranger).unwrap();
        assert_eq!(comment.reactions.len(), 1);
        apply_comment_request(&mut comment, &req, &stranger).unwrap();
        assert!(comment.reactions.is_empty());
    }
}
