use super::prelude::*;
use crate::{
    authorization::{require_moderator, require_principal},
    util::validate::{has_char_len, non_empty},
};

fn check_target_exists<R>(repo: &R, target: &ReportTarget) -> Result<()>
where
    R: EventRepo + CommentRepo + UserRepo,
{
    let res = match target {
        ReportTarget::Event(id) => repo.get_event(id).map(|_| ()),
        ReportTarget::Comment(id) => repo.get_comment(id).map(|_| ()),
        ReportTarget::User(id) => repo.get_user(id).map(|_| ()),
    };
    res.not_found_as(Error::TargetNotFound(target.kind()))
}

/// Files a report against an event, a comment or a user.
///
/// A reporter can only have a single open report per target.
pub fn file_report<R>(
    repo: &R,
    principal: Option<&Principal>,
    target: ReportTarget,
    reason: &str,
    now: Timestamp,
) -> Result<Report>
where
    R: ReportRepo + EventRepo + CommentRepo + UserRepo,
{
    let principal = require_principal(principal)?;
    let reason = reason.trim();
    if !has_char_len(reason, MIN_REASON_LEN..=MAX_REASON_LEN) {
        return Err(Error::ReportReason);
    }
    check_target_exists(repo, &target)?;
    if repo
        .try_get_open_report(&principal.user_id, &target)?
        .is_some()
    {
        return Err(Error::DuplicateReport);
    }
    let report = Report {
        id: Id::new(),
        target,
        reporter_id: principal.user_id.clone(),
        reason: reason.to_owned(),
        status: ReportStatus::Open,
        moderator_notes: None,
        resolved_by: None,
        created_at: now,
        resolved_at: None,
    };
    repo.create_report(report.clone()).map_err(|err| match err {
        RepoError::AlreadyExists => Error::DuplicateReport,
        err => err.into(),
    })?;
    log::info!(
        "Report {} filed against {} {}",
        report.id,
        report.target.kind(),
        report.target.id()
    );
    Ok(report)
}

pub fn resolve_report<R: ReportRepo>(
    repo: &R,
    principal: Option<&Principal>,
    report_id: &Id,
    resolution: Resolution,
    moderator_notes: Option<String>,
    now: Timestamp,
) -> Result<Report> {
    let principal = require_principal(principal)?;
    if !policy::can_resolve_report(principal) {
        return Err(Error::Forbidden);
    }
    let moderator_notes = non_empty(moderator_notes);
    if moderator_notes
        .as_deref()
        .is_some_and(|n| !has_char_len(n, 0..=MAX_MODERATOR_NOTES_LEN))
    {
        return Err(Error::ModeratorNotes);
    }
    let mut report = repo
        .get_report(report_id)
        .not_found_as(Error::ReportNotFound)?;
    if !report.status.is_open() {
        return Err(Error::ReportAlreadyResolved);
    }
    report.status = resolution.into();
    report.moderator_notes = moderator_notes;
    report.resolved_by = Some(principal.user_id.clone());
    report.resolved_at = Some(now);
    repo.update_report(&report)?;
    log::info!("Report {} {} by {}", report.id, report.status, principal.user_id);
    Ok(report)
}

pub fn list_open_reports<R: ReportRepo>(
    repo: &R,
    principal: Option<&Principal>,
    pagination: &Pagination,
) -> Result<Vec<Report>> {
    require_moderator(principal)?;
    Ok(repo.load_open_reports(pagination)?)
}
