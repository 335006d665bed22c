use super::*;

impl ContactTicketRepo for DbConnection<'_> {
    fn create_contact_ticket(&self, ticket: ContactTicket) -> Result<()> {
        self.write(|data| {
            if data.tickets.contains_key(&ticket.id) {
                return Err(repo::Error::AlreadyExists);
            }
            data.tickets.insert(ticket.id.clone(), ticket);
            Ok(())
        })
    }
    fn get_contact_ticket(&self, id: &Id) -> Result<ContactTicket> {
        self.read(|data| data.tickets.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
}
