use anyhow::Result;
use askama::Template;
use gatherly_entities::{contact::*, email::*, report::*, time::*, user::*};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const DATE_TIME_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute] UTC");

fn format_timestamp(ts: Timestamp) -> String {
    OffsetDateTime::from(ts)
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| ts.to_string())
}

#[derive(Template)]
#[template(path = "email_user_registration/subject.txt")]
struct UserRegistrationSubject;

#[derive(Template)]
#[template(path = "email_user_registration/body.txt")]
struct UserRegistrationBody<'a> {
    url: &'a str,
}

pub fn user_registration_email(url: &str) -> Result<EmailContent> {
    let subject = UserRegistrationSubject.render()?;
    let body = UserRegistrationBody { url }.render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "email_reset_password/subject.txt")]
struct ResetPasswordSubject;

#[derive(Template)]
#[template(path = "email_reset_password/body.txt")]
struct ResetPasswordBody<'a> {
    url: &'a str,
}

pub fn user_reset_password_email(url: &str) -> Result<EmailContent> {
    let subject = ResetPasswordSubject.render()?;
    let body = ResetPasswordBody { url }.render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "email_report_filed/subject.txt")]
struct ReportFiledSubject<'a> {
    kind: &'a str,
}

#[derive(Template)]
#[template(path = "email_report_filed/body.txt")]
struct ReportFiledBody<'a> {
    kind: &'a str,
    target_id: &'a str,
    reporter: &'a str,
    reason: &'a str,
    created_at: String,
}

pub fn report_filed_email(report: &Report, reporter: &User) -> Result<EmailContent> {
    let kind = report.target.kind();
    let subject = ReportFiledSubject {
        kind: kind.as_ref(),
    }
    .render()?;
    let body = ReportFiledBody {
        kind: kind.as_ref(),
        target_id: report.target.id().as_str(),
        reporter: reporter.email.as_str(),
        reason: &report.reason,
        created_at: format_timestamp(report.created_at),
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[derive(Template)]
#[template(path = "email_contact_ticket/subject.txt")]
struct ContactTicketSubject<'a> {
    subject: &'a str,
}

#[derive(Template)]
#[template(path = "email_contact_ticket/body.txt")]
struct ContactTicketBody<'a> {
    ticket: &'a ContactTicket,
    email: &'a str,
    created_at: String,
}

pub fn contact_ticket_email(ticket: &ContactTicket) -> Result<EmailContent> {
    let subject = ContactTicketSubject {
        subject: &ticket.subject,
    }
    .render()?;
    let body = ContactTicketBody {
        ticket,
        email: ticket.email.as_str(),
        created_at: format_timestamp(ticket.created_at),
    }
    .render()?;
    Ok(EmailContent { subject, body })
}

#[cfg(test)]
mod tests {
    use gatherly_entities::builders::*;

    use super::*;

    #[test]
    fn registration_mail_contains_the_link() {
        let mail = user_registration_email("https://gatherly.app/confirm-email/t0k3n").unwrap();
        assert_eq!(mail.subject, "Gatherly: Please confirm your e-mail address");
        assert!(mail.body.contains("https://gatherly.app/confirm-email/t0k3n"));
    }

    #[test]
    fn report_mail() {
        let reporter = User::build().email("reporter@b.org").finish();
        let report = Report {
            id: "r1".into(),
            target: ReportTarget::Comment("c1".into()),
            reporter_id: reporter.id.clone(),
            reason: "This comment is hateful".into(),
            status: ReportStatus::Open,
            moderator_notes: None,
            resolved_by: None,
            created_at: Timestamp::try_from_secs(1_700_000_000).unwrap(),
            resolved_at: None,
        };
        let mail = report_filed_email(&report, &reporter).unwrap();
        assert_eq!(mail.subject, "Gatherly: New comment report");
        assert!(mail.body.contains("c1"));
        assert!(mail.body.contains("reporter@b.org"));
        assert!(mail.body.contains("This comment is hateful"));
        assert!(mail.body.contains("2023-11-14 22:13 UTC"));
    }
}
