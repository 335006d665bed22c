use usecases::NewContactTicket;

use super::*;

pub fn submit_contact_ticket(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    notify: &dyn NotificationGateway,
    remote_ip: &str,
    new_ticket: NewContactTicket,
) -> Result<ContactTicket> {
    guard.enforce(&format!("contact:{remote_ip}"), guard.rate_limits.contact)?;
    let now = Timestamp::now();
    let ticket = connections
        .exclusive()?
        .transaction(|conn| usecases::submit_contact_ticket(conn, new_ticket, now))?;
    if let Err(err) = notify.notify(NotificationEvent::ContactTicketSubmitted { ticket: &ticket }) {
        error!("Failed to forward contact ticket {}: {}", ticket.id, err);
    }
    Ok(ticket)
}
