use super::prelude::*;
use std::time::Duration;

/// Issues a new token that replaces any previous token
/// of the same kind for this email address.
pub fn issue_verification_token<R: VerificationTokenRepo>(
    repo: &R,
    email: EmailAddress,
    kind: TokenKind,
    ttl: Duration,
    now: Timestamp,
) -> Result<VerificationToken> {
    let token = VerificationToken {
        token: new_token_string(),
        email,
        kind,
        expires_at: now + ttl,
        created_at: now,
    };
    repo.replace_verification_token(token.clone())?;
    log::debug!("Issued {} token for {}", token.kind, token.email);
    Ok(token)
}

/// Deletes the token and returns it.
///
/// The token is consumed even if it has already expired.
pub fn consume_verification_token<R: VerificationTokenRepo>(
    repo: &R,
    token: &str,
    kind: TokenKind,
) -> Result<VerificationToken> {
    let token = repo
        .get_verification_token(token)
        .not_found_as(Error::TokenInvalid)?;
    if token.kind != kind {
        return Err(Error::TokenInvalid);
    }
    repo.delete_verification_token(&token.token)?;
    Ok(token)
}

/// Issues a new email verification token unless the user
/// is unknown or already verified.
pub fn refresh_email_verification<R>(
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
        log::debug!("No account for {email}");
        return Ok(None);
    };
    if user.is_verified() {
        return Ok(None);
    }
    issue_verification_token(repo, user.email, TokenKind::Email, ttl, now).map(Some)
}

pub fn delete_expired_verification_tokens<R: VerificationTokenRepo>(
    repo: &R,
    now: Timestamp,
) -> Result<usize> {
    Ok(repo.delete_expired_verification_tokens(now)?)
}
