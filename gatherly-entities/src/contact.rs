use strum::{AsRefStr, Display, EnumString};

use crate::{email::EmailAddress, id::Id, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTicket {
    pub id         : Id,
    pub name       : String,
    pub email      : EmailAddress,
    pub subject    : String,
    pub message    : String,
    pub status     : TicketStatus,
    pub created_at : Timestamp,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}
