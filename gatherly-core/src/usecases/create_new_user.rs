use super::prelude::*;
use crate::util::validate::{self, has_char_len};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub pronouns: Option<String>,
}

pub fn create_new_user<R: UserRepo>(repo: &R, u: NewUser, now: Timestamp) -> Result<User> {
    let NewUser {
        name,
        email,
        password,
        pronouns,
    } = u;
    let name = name.trim().to_owned();
    if !has_char_len(&name, 2..=100) {
        return Err(Error::Name);
    }
    let email = parse_email(&email)?;
    let password = password.parse::<Password>()?;
    let pronouns = validate::non_empty(pronouns);
    if pronouns.as_deref().is_some_and(|p| !has_char_len(p, 0..=50)) {
        return Err(Error::Pronouns);
    }
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }
    let new_user = User {
        id: Id::new(),
        name,
        display_name: None,
        email,
        email_verified: None,
        password: Some(password),
        pronouns,
        role: Role::Member,
        org_ids: vec![],
        settings: UserSettings::default(),
        created_at: now,
    };
    log::debug!("Creating new user: email = {}", new_user.email);
    repo.create_user(&new_user).map_err(|err| match err {
        RepoError::AlreadyExists => Error::UserExists,
        err => err.into(),
    })?;
    Ok(new_user)
}

/// Returns the account of an identity provider login,
/// creating a verified account without password on first login.
pub fn create_user_from_identity<R: UserRepo>(
    repo: &R,
    email: &str,
    name: &str,
    now: Timestamp,
) -> Result<User> {
    let email = parse_email(email)?;
    if let Some(user) = repo.try_get_user_by_email(&email)? {
        return Ok(user);
    }
    let name = name.trim();
    let name = if has_char_len(name, 2..=100) {
        name.to_owned()
    } else {
        email.as_str().split('@').next().unwrap_or_default().to_owned()
    };
    let new_user = User {
        id: Id::new(),
        name,
        display_name: None,
        email,
        email_verified: Some(now),
        password: None,
        pronouns: None,
        role: Role::Member,
        org_ids: vec![],
        settings: UserSettings::default(),
        created_at: now,
    };
    log::info!("Creating new user {} from identity provider", new_user.id);
    repo.create_user(&new_user)?;
    Ok(new_user)
}

pub(crate) fn parse_email(email: &str) -> Result<EmailAddress> {
    let email = email.parse::<EmailAddress>()?;
    if !validate::is_valid_email(email.as_str()) {
        return Err(Error::EmailAddress);
    }
    Ok(email)
}
