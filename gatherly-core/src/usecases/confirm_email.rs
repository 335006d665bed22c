use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailConfirmation {
    Verified,
    AlreadyVerified,
}

/// Marks the email address of a consumed token as verified.
pub fn confirm_email_address<R>(
    repo: &R,
    token: &VerificationToken,
    now: Timestamp,
) -> Result<EmailConfirmation>
where
    R: UserRepo,
{
    if token.kind != TokenKind::Email {
        return Err(Error::TokenInvalid);
    }
    if token.is_expired(now) {
        return Err(Error::TokenExpired);
    }
    let mut user = repo
        .try_get_user_by_email(&token.email)?
        .ok_or(Error::UserNotFound)?;
    if user.is_verified() {
        return Ok(EmailConfirmation::AlreadyVerified);
    }
    user.email_verified = Some(now);
    repo.update_user(&user)?;
    log::info!("Verified email address of user {}", user.id);
    Ok(EmailConfirmation::Verified)
}
