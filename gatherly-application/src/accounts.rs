use std::{result, time::Duration};

use usecases::{EmailConfirmation, Error, NewUser, UserSettingsUpdate};

use super::*;

fn register_user<R>(
    repo: &R,
    new_user: NewUser,
    token_ttl: Duration,
    now: Timestamp,
) -> result::Result<(User, VerificationToken), Error>
where
    R: UserRepo + VerificationTokenRepo,
{
    let user = usecases::create_new_user(repo, new_user, now)?;
    let token =
        usecases::issue_verification_token(repo, user.email.clone(), TokenKind::Email, token_ttl, now)?;
    Ok((user, token))
}

pub fn sign_up(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    notify: &dyn NotificationGateway,
    links: &Links,
    token_ttl: Duration,
    remote_ip: &str,
    new_user: NewUser,
) -> Result<User> {
    guard.enforce(&format!("signup:{remote_ip}"), guard.rate_limits.auth)?;
    let now = Timestamp::now();
    let (user, token) = connections
        .exclusive()?
        .transaction(|conn| register_user(conn, new_user, token_ttl, now))?;
    info!("Registered new user {}", user.id);

    // The account stays even if the confirmation e-mail could not be sent.
    let confirmation_url = links.email_confirmation(&token.token);
    if let Err(err) = notify.notify(NotificationEvent::UserRegistered {
        user: &user,
        confirmation_url: &confirmation_url,
    }) {
        warn!(
            "Failed to send confirmation e-mail to user {}: {}",
            user.id, err
        );
    }
    Ok(user)
}

/// Sends a new confirmation link.
///
/// Succeeds silently for unknown or already verified addresses.
pub fn resend_email_verification(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    notify: &dyn NotificationGateway,
    links: &Links,
    token_ttl: Duration,
    email: &str,
) -> Result<()> {
    let key = format!("verify:{}", email.trim().to_lowercase());
    guard.enforce(&key, guard.rate_limits.auth)?;
    let now = Timestamp::now();
    let token = connections.exclusive()?.transaction(|conn| {
        usecases::refresh_email_verification(conn, email, token_ttl, now)
    })?;
    let Some(token) = token else {
        return Ok(());
    };
    let user = connections.shared()?.get_user_by_email(&token.email)?;
    let confirmation_url = links.email_confirmation(&token.token);
    if let Err(err) = notify.notify(NotificationEvent::UserRegistered {
        user: &user,
        confirmation_url: &confirmation_url,
    }) {
        warn!(
            "Failed to resend confirmation e-mail to user {}: {}",
            user.id, err
        );
    }
    Ok(())
}

fn consume_token(
    connections: &memory::Connections,
    token: &str,
    kind: TokenKind,
) -> Result<VerificationToken> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::consume_verification_token(conn, token, kind).map_err(|err| {
            warn!("Missing or invalid {kind} token: {err}");
            err
        })
    })?)
}

pub fn confirm_email(
    connections: &memory::Connections,
    token: &str,
) -> Result<EmailConfirmation> {
    // The token should be consumed only once, even if the
    // following transaction for updating the user fails!
    let token = consume_token(connections, token, TokenKind::Email)?;
    let now = Timestamp::now();
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::confirm_email_address(conn, &token, now))?)
}

/// Sends a link for choosing a new password.
///
/// Succeeds silently for unknown addresses.
pub fn request_password_reset(
    connections: &memory::Connections,
    guard: &AbuseGuard,
    notify: &dyn NotificationGateway,
    links: &Links,
    token_ttl: Duration,
    remote_ip: &str,
    email: &str,
) -> Result<()> {
    guard.enforce(&format!("reset:{remote_ip}"), guard.rate_limits.auth)?;
    let now = Timestamp::now();
    let token = connections.exclusive()?.transaction(|conn| {
        usecases::request_password_reset(conn, email, token_ttl, now)
    })?;
    if let Some(token) = token {
        let reset_url = links.password_reset(&token.token);
        if let Err(err) = notify.notify(NotificationEvent::UserResetPasswordRequested {
            email: &token.email,
            reset_url: &reset_url,
        }) {
            warn!("Failed to send password reset e-mail: {err}");
        }
    }
    Ok(())
}

pub fn reset_password(
    connections: &memory::Connections,
    token: &str,
    new_password: &str,
) -> Result<()> {
    let token = consume_token(connections, token, TokenKind::Password)?;
    let now = Timestamp::now();
    connections.exclusive()?.transaction(|conn| {
        usecases::reset_password(conn, &token, new_password, now).map_err(|err| {
            warn!("Failed to reset password of {}: {}", token.email, err);
            err
        })
    })?;
    Ok(())
}

/// Returns the account of an identity provider login,
/// creating it on first use.
pub fn sign_in_with_identity(
    connections: &memory::Connections,
    email: &str,
    name: &str,
) -> Result<User> {
    let now = Timestamp::now();
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_user_from_identity(conn, email, name, now))?)
}

pub fn update_user_settings(
    connections: &memory::Connections,
    principal: Option<&Principal>,
    update: UserSettingsUpdate,
) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_user_settings(conn, principal, update))?)
}

pub fn delete_expired_verification_tokens(connections: &memory::Connections) -> Result<usize> {
    let now = Timestamp::now();
    let count = connections
        .exclusive()?
        .transaction(|conn| usecases::delete_expired_verification_tokens(conn, now))?;
    if count > 0 {
        info!("Deleted {count} expired verification token(s)");
    }
    Ok(count)
}
