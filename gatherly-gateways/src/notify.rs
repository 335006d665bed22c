use std::{collections::HashSet, sync::Arc};

use anyhow::Result;
use gatherly_core::gateways::notify::{NotificationEvent, NotificationGateway, NotificationType};
use gatherly_entities::email::*;

use crate::{email::EmailGateway, user_communication};

/// Turns notification events into e-mails.
#[derive(Clone)]
pub struct Notify {
    email_gw: Arc<dyn EmailGateway + Send + Sync + 'static>,
    notify_on: HashSet<NotificationType>,
    support_inbox: Option<EmailAddress>,
}

impl Notify {
    pub fn new<G>(
        gw: G,
        notify_on: HashSet<NotificationType>,
        support_inbox: Option<EmailAddress>,
    ) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self {
            email_gw: Arc::new(gw),
            notify_on,
            support_inbox,
        }
    }

    fn skip(&self, ev: &NotificationEvent) -> bool {
        !self.notify_on.contains(&ev.kind())
    }

    fn send_to_support(&self, content: &EmailContent) -> Result<()> {
        let Some(inbox) = &self.support_inbox else {
            log::debug!("No support inbox configured: dropping '{}'", content.subject);
            return Ok(());
        };
        self.email_gw
            .compose_and_send(std::slice::from_ref(inbox), content)
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, event: NotificationEvent) -> Result<()> {
        use NotificationEvent as E;
        if self.skip(&event) {
            return Ok(());
        }
        match event {
            E::UserRegistered {
                user,
                confirmation_url,
            } => {
                let content = user_communication::user_registration_email(confirmation_url)?;
                log::info!("Sending confirmation e-mail to user {}", user.id);
                self.email_gw
                    .compose_and_send(&[user.email.clone()], &content)
            }
            E::UserResetPasswordRequested { email, reset_url } => {
                let content = user_communication::user_reset_password_email(reset_url)?;
                log::info!("Sending e-mail to {email} after password reset request");
                self.email_gw.compose_and_send(&[email.clone()], &content)
            }
            E::ReportFiled { report, reporter } => {
                let content = user_communication::report_filed_email(report, reporter)?;
                log::info!("Notifying support about report {}", report.id);
                self.send_to_support(&content)
            }
            E::ContactTicketSubmitted { ticket } => {
                let content = user_communication::contact_ticket_email(ticket)?;
                log::info!("Forwarding contact ticket {}", ticket.id);
                self.send_to_support(&content)
            }
        }
    }
}
