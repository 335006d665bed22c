use super::prelude::*;
use crate::util::validate::has_char_len;

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewContactTicket {
    pub name    : String,
    pub email   : String,
    pub subject : String,
    pub message : String,
}

pub fn submit_contact_ticket<R: ContactTicketRepo>(
    repo: &R,
    t: NewContactTicket,
    now: Timestamp,
) -> Result<ContactTicket> {
    let NewContactTicket {
        name,
        email,
        subject,
        message,
    } = t;
    let name = name.trim();
    if !has_char_len(name, 2..=100) {
        return Err(Error::Name);
    }
    let email = super::create_new_user::parse_email(&email)?;
    let subject = subject.trim();
    if !has_char_len(subject, 5..=200) {
        return Err(Error::Subject);
    }
    let message = message.trim();
    if !has_char_len(message, 20..=5000) {
        return Err(Error::Message);
    }
    let ticket = ContactTicket {
        id: Id::new(),
        name: name.to_owned(),
        email,
        subject: subject.to_owned(),
        message: message.to_owned(),
        status: TicketStatus::Open,
        created_at: now,
    };
    repo.create_contact_ticket(ticket.clone())?;
    log::info!("New contact ticket {}", ticket.id);
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    fn new_ticket() -> NewContactTicket {
        NewContactTicket {
            name: "Alex".into(),
            email: "Alex@Example.org".into(),
            subject: "Partnership".into(),
            message: "We would love to list our events here.".into(),
        }
    }

    #[test]
    fn submit_open_ticket() {
        let db = MockDb::default();
        let ticket = submit_contact_ticket(&db, new_ticket(), Timestamp::now()).unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.email.as_str(), "alex@example.org");
        assert_eq!(db.get_contact_ticket(&ticket.id).unwrap(), ticket);
    }

    #[test]
    fn reject_invalid_tickets() {
        let db = MockDb::default();
        let now = Timestamp::now();
        let mut t = new_ticket();
        t.subject = "Hi".into();
        assert!(matches!(submit_contact_ticket(&db, t, now), Err(Error::Subject)));
        let mut t = new_ticket();
        t.message = "Too short".into();
        assert!(matches!(submit_contact_ticket(&db, t, now), Err(Error::Message)));
        let mut t = new_ticket();
        t.email = "nope".into();
        assert!(matches!(submit_contact_ticket(&db, t, now), Err(Error::EmailAddress)));
        assert!(db.tickets.borrow().is_empty());
    }
}
