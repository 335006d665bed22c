use gatherly_core::authorization::require_principal;
use usecases::{ModeratedStatus, ModerationStats};

use super::*;

pub fn file_report(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    notify: &dyn NotificationGateway,
    principal: Option<&Principal>,
    target: ReportTarget,
    reason: &str,
) -> Result<Report> {
    let user_id = &require_principal(principal)?.user_id;
    guard.enforce(&format!("report:{user_id}"), guard.rate_limits.report)?;
    let now = Timestamp::now();
    let report = connections
        .exclusive()?
        .transaction(|conn| usecases::file_report(conn, principal, target, reason, now))?;

    // The report stays even if support could not be notified.
    if let Err(err) = notify_report_filed(connections, notify, &report) {
        error!(
            "Failed to send notification for report {}: {}",
            report.id, err
        );
    }
    Ok(report)
}

fn notify_report_filed(
    connections: &memory::Connections,
    notify: &dyn NotificationGateway,
    report: &Report,
) -> Result<()> {
    let reporter = connections.shared()?.get_user(&report.reporter_id)?;
    notify.notify(NotificationEvent::ReportFiled {
        report,
        reporter: &reporter,
    })?;
    Ok(())
}

pub fn resolve_report(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    report_id: &Id,
    resolution: Resolution,
    moderator_notes: Option<String>,
) -> Result<Report> {
    let now = Timestamp::now();
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::resolve_report(conn, principal, report_id, resolution, moderator_notes, now)
    })?)
}

pub fn open_reports(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    pagination: &Pagination,
) -> Result<Vec<Report>> {
    Ok(usecases::list_open_reports(
        &connections.shared()?,
        principal,
        pagination,
    )?)
}

pub fn moderate(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    target: &ModerationTarget,
    action: ModerationAction,
) -> Result<ModeratedStatus> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::moderate(conn, principal, target, action))?)
}

pub fn moderation_stats(
    connections: &memory::Connections,
    principal: Option<&Principal>,
) -> Result<ModerationStats> {
    Ok(usecases::moderation_stats(&connections.shared()?, principal)?)
}
