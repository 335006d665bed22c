use std::time::Duration;

use gatherly_core::authorization::require_principal;
use usecases::NewComment;

use super::*;

pub fn post_comment(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    principal: Option<&Principal>,
    remote_ip: &str,
    bot_token: Option<&str>,
    new_comment: NewComment,
) -> Result<Comment> {
    let user_id = &require_principal(principal)?.user_id;
    guard.enforce(&format!("comment:{user_id}"), guard.rate_limits.comment)?;
    guard.verify_human(bot_token, remote_ip)?;
    let now = Timestamp::now();
    let comment = connections.exclusive()?.transaction(|conn| {
        usecases::create_comment(conn, &guard.content_policy, principal, new_comment, now)
    })?;
    debug!(
        "Posted comment {} on event {}",
        comment.id, comment.event_id
    );
    Ok(comment)
}

pub fn edit_comment(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    edit_window: Duration,
    principal: Option<&Principal>,
    comment_id: &Id,
    new_body: &str,
) -> Result<Comment> {
    let now = Timestamp::now();
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::edit_comment(
            conn,
            &guard.content_policy,
            principal,
            comment_id,
            new_body,
            edit_window,
            now,
        )
    })?)
}

pub fn delete_comment(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    comment_id: &Id,
) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::soft_delete_comment(conn, principal, comment_id))?)
}

pub fn comments_of_event(connections: &memory::Connections, event_id: &Id) -> Result<Vec<Thread>> {
    Ok(usecases::list_threaded(&connections.shared()?, event_id)?)
}
