use super::prelude::*;
use std::time::Duration;

/// Issues a password reset token.
///
/// Succeeds with `None` for unknown addresses so that the
/// existence of an account is not disclosed.
pub fn request_password_reset<R>(
    repo: &R,
    email: &str,
    ttl: Duration,
    now: Timestamp,
) -> Result<Option<VerificationToken>>
where
    R: UserRepo + VerificationTokenRepo,
{
    let email = super::create_new_user::parse_email(email)?;
    let Some(user) = repo.try_get_user_by_email(&email)? else {
        log::debug!("Password reset requested for unknown address");
        return Ok(None);
    };
    super::issue_verification_token(repo, user.email, TokenKind::Password, ttl, now).map(Some)
}

/// Sets a new password using a consumed reset token.
///
/// Receiving the token proves ownership of the mailbox,
/// so an unverified address becomes verified.
pub fn reset_password<R: UserRepo>(
    repo: &R,
    token: &VerificationToken,
    new_password: &str,
    now: Timestamp,
) -> Result<()> {
    if token.kind != TokenKind::Password {
        return Err(Error::TokenInvalid);
    }
    if token.is_expired(now) {
        return Err(Error::TokenExpired);
    }
    let password = new_password.parse::<Password>()?;
    let mut user = repo
        .try_get_user_by_email(&token.email)?
        .ok_or(Error::UserNotFound)?;
    user.password = Some(password);
    if user.email_verified.is_none() {
        user.email_verified = Some(now);
    }
    repo.update_user(&user)?;
    log::info!("Reset password of user {}", user.id);
    Ok(())
}
