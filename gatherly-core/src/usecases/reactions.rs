use super::prelude::*;
use crate::authorization::{require_principal, require_verified_principal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSummary {
    pub emoji: Emoji,
    pub count: usize,
    pub user_ids: Vec<Id>,
}

fn get_reactable_comment<R: CommentRepo>(repo: &R, comment_id: &Id) -> Result<Comment> {
    let comment = repo
        .get_comment(comment_id)
        .not_found_as(Error::CommentNotFound)?;
    if comment.status == CommentStatus::Removed {
        return Err(Error::CommentNotFound);
    }
    Ok(comment)
}

/// Adding the same reaction twice returns the existing one.
pub fn add_reaction<R>(
    repo: &R,
    principal: Option<&Principal>,
    comment_id: &Id,
    emoji: &str,
    now: Timestamp,
) -> Result<Reaction>
where
    R: CommentRepo + ReactionRepo,
{
    let principal = require_verified_principal(principal)?;
    let emoji: Emoji = emoji.parse()?;
    let comment = get_reactable_comment(repo, comment_id)?;
    if let Some(existing) = repo.try_get_reaction(&comment.id, &principal.user_id, &emoji)? {
        return Ok(existing);
    }
    let reaction = Reaction {
        comment_id: comment.id,
        user_id: principal.user_id.clone(),
        emoji,
        created_at: now,
    };
    match repo.add_reaction(&reaction) {
        Ok(()) => {}
        Err(RepoError::AlreadyExists) => {
            log::debug!("Reaction of {} already exists", reaction.user_id);
        }
        Err(err) => return Err(err.into()),
    }
    Ok(reaction)
}

pub fn remove_reaction<R: ReactionRepo>(
    repo: &R,
    principal: Option<&Principal>,
    comment_id: &Id,
    emoji: &str,
) -> Result<()> {
    let principal = require_principal(principal)?;
    let emoji: Emoji = emoji.parse()?;
    repo.delete_reaction(comment_id, &principal.user_id, &emoji)
        .not_found_as(Error::ReactionNotFound)
}

/// Reactions grouped by emoji in the order of their first use.
pub fn reactions_of_comment<R>(repo: &R, comment_id: &Id) -> Result<Vec<ReactionSummary>>
where
    R: CommentRepo + ReactionRepo,
{
    let comment = get_reactable_comment(repo, comment_id)?;
    let mut reactions = repo.load_reactions_of_comment(&comment.id)?;
    reactions.sort_by_key(|r| r.created_at);
    let mut summaries: Vec<ReactionSummary> = vec![];
    for r in reactions {
        match summaries.iter_mut().find(|s| s.emoji == r.emoji) {
            Some(summary) => {
                summary.count += 1;
                summary.user_ids.push(r.user_id);
            }
            None => summaries.push(ReactionSummary {
                emoji: r.emoji,
                count: 1,
                user_ids: vec![r.user_id],
            }),
        }
    }
    Ok(summaries)
}
