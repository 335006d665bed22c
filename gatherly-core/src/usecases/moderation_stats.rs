use super::prelude::*;
use crate::authorization::require_moderator;

const RECENT_REPORTS: u64 = 10;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationStats {
    pub open_reports     : usize,
    pub flagged_events   : usize,
    pub flagged_comments : usize,
    pub total_users      : usize,
    pub recent_reports   : Vec<Report>,
}

pub fn moderation_stats<R>(repo: &R, principal: Option<&Principal>) -> Result<ModerationStats>
where
    R: ReportRepo + EventRepo + CommentRepo + UserRepo,
{
    require_moderator(principal)?;
    let recent_reports = repo.load_open_reports(&Pagination {
        offset: None,
        limit: Some(RECENT_REPORTS),
    })?;
    Ok(ModerationStats {
        open_reports: repo.count_open_reports()?,
        flagged_events: repo.count_events_with_status(EventStatus::Flagged)?,
        flagged_comments: repo.count_comments_with_status(CommentStatus::Flagged)?,
        total_users: repo.count_users()?,
        recent_reports,
    })
}
