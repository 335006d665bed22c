use std::time::Duration;

use super::prelude::*;
use crate::{
    authorization::{require_principal, require_verified_principal},
    content_policy::ContentPolicy,
    util::validate::has_char_len,
};

pub const DEFAULT_EDIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewComment {
    pub event_id  : Id,
    pub parent_id : Option<Id>,
    pub body      : String,
}

fn check_body(content_policy: &ContentPolicy, body: &str) -> Result<String> {
    let body = body.trim();
    if !has_char_len(body, 1..=MAX_COMMENT_BODY_LEN) {
        return Err(Error::CommentBody);
    }
    content_policy.evaluate(body)?;
    Ok(body.to_owned())
}

pub fn create_comment<R>(
    repo: &R,
    content_policy: &ContentPolicy,
    principal: Option<&Principal>,
    c: NewComment,
    now: Timestamp,
) -> Result<Comment>
where
    R: EventRepo + CommentRepo,
{
    let principal = require_verified_principal(principal)?;
    let NewComment {
        event_id,
        parent_id,
        body,
    } = c;
    let event = repo.get_event(&event_id).not_found_as(Error::EventNotFound)?;
    if event.status == EventStatus::Removed {
        return Err(Error::EventNotFound);
    }
    if let Some(parent_id) = &parent_id {
        let parent = repo
            .get_comment(parent_id)
            .not_found_as(Error::ParentCommentNotFound)?;
        if parent.event_id != event.id {
            return Err(Error::ParentCommentNotFound);
        }
        if !parent.is_top_level() {
            return Err(Error::MaxDepthReached);
        }
    }
    let body = check_body(content_policy, &body)?;
    let comment = Comment {
        id: Id::new(),
        event_id: event.id,
        author_id: principal.user_id.clone(),
        parent_id,
        body,
        created_at: now,
        edited_at: None,
        status: CommentStatus::Visible,
    };
    repo.create_comment(comment.clone())?;
    log::debug!("Created comment {} on event {}", comment.id, comment.event_id);
    Ok(comment)
}

pub fn edit_comment<R: CommentRepo>(
    repo: &R,
    content_policy: &ContentPolicy,
    principal: Option<&Principal>,
    comment_id: &Id,
    new_body: &str,
    edit_window: Duration,
    now: Timestamp,
) -> Result<Comment> {
    let principal = require_principal(principal)?;
    let mut comment = repo
        .get_comment(comment_id)
        .not_found_as(Error::CommentNotFound)?;
    if comment.status == CommentStatus::Removed {
        return Err(Error::CommentNotFound);
    }
    policy::check_comment_edit(principal, &comment, now, edit_window)?;
    comment.body = check_body(content_policy, new_body)?;
    comment.edited_at = Some(now);
    repo.update_comment(&comment)?;
    log::debug!("Edited comment {}", comment.id);
    Ok(comment)
}

/// Marks a comment as removed without touching its replies.
pub fn soft_delete_comment<R: CommentRepo>(
    repo: &R,
    principal: Option<&Principal>,
    comment_id: &Id,
) -> Result<()> {
    let principal = require_principal(principal)?;
    let mut comment = repo
        .get_comment(comment_id)
        .not_found_as(Error::CommentNotFound)?;
    if !policy::can_delete_comment(principal, &comment) {
        return Err(Error::CommentNotDeletable);
    }
    if comment.status != CommentStatus::Removed {
        comment.status = CommentStatus::Removed;
        repo.update_comment(&comment)?;
    }
    log::info!("Comment {} removed by {}", comment.id, principal.user_id);
    Ok(())
}

/// Visible top-level comments (newest first) with their
/// visible replies (oldest first).
///
/// Replies of a flagged or removed parent are not listed.
pub fn list_threaded<R: CommentRepo>(repo: &R, event_id: &Id) -> Result<Vec<Thread>> {
    let (mut top_level, replies): (Vec<_>, Vec<_>) = repo
        .load_comments_of_event(event_id)?
        .into_iter()
        .filter(|c| c.status == CommentStatus::Visible)
        .partition(Comment::is_top_level);
    top_level.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let mut threads: Vec<_> = top_level
        .into_iter()
        .map(|comment| Thread {
            comment,
            replies: vec![],
        })
        .collect();
    for reply in replies {
        if let Some(thread) = threads
            .iter_mut()
            .find(|t| reply.parent_id.as_ref() == Some(&t.comment.id))
        {
            thread.replies.push(reply);
        }
    }
    for thread in &mut threads {
        thread.replies.sort_by_key(|r| r.created_at);
    }
    Ok(threads)
}
