use usecases::ReactionSummary;

use super::*;

pub fn add_reaction(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    comment_id: &Id,
    emoji: &str,
) -> Result<Reaction> {
    let now = Timestamp::now();
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::add_reaction(conn, principal, comment_id, emoji, now))?)
}

pub fn remove_reaction(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    comment_id: &Id,
    emoji: &str,
) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::remove_reaction(conn, principal, comment_id, emoji))?)
}

pub fn reactions_of_comment(
    connections: &memory::Connections,
    comment_id: &Id,
) -> Result<Vec<ReactionSummary>> {
    Ok(usecases::reactions_of_comment(
        &connections.shared()?,
        comment_id,
    )?)
}
