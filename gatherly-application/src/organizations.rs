use usecases::NewOrganization;

use super::*;

pub fn create_organization(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    new_org: NewOrganization,
) -> Result<Organization> {
    let now = Timestamp::now();
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_organization(conn, principal, new_org, now))?)
}
