use gatherly_entities::{
    contact::ContactTicket, email::EmailAddress, report::Report, user::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    UserRegistered,
    UserResetPasswordRequested,
    ReportFiled,
    ContactTicketSubmitted,
}

#[derive(Debug)]
pub enum NotificationEvent<'a> {
    UserRegistered {
        user: &'a User,
        confirmation_url: &'a str,
    },
    UserResetPasswordRequested {
        email: &'a EmailAddress,
        reset_url: &'a str,
    },
    ReportFiled {
        report: &'a Report,
        reporter: &'a User,
    },
    ContactTicketSubmitted {
        ticket: &'a ContactTicket,
    },
}

impl NotificationEvent<'_> {
    pub const fn kind(&self) -> NotificationType {
        match self {
            Self::UserRegistered { .. } => NotificationType::UserRegistered,
            Self::UserResetPasswordRequested { .. } => {
                NotificationType::UserResetPasswordRequested
            }
            Self::ReportFiled { .. } => NotificationType::ReportFiled,
            Self::ContactTicketSubmitted { .. } => NotificationType::ContactTicketSubmitted,
        }
    }
}

pub trait NotificationGateway {
    fn notify(&self, event: NotificationEvent) -> anyhow::Result<()>;
}
