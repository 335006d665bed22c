use super::prelude::*;
use crate::util::validate::has_char_len;

/// Only the provided fields are changed.
///
/// An empty display name or empty pronouns clear the field.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct UserSettingsUpdate {
    pub display_name       : Option<String>,
    pub pronouns           : Option<String>,
    pub email_opt_in       : Option<bool>,
    pub profile_visibility : Option<ProfileVisibility>,
}

pub fn update_user_settings<R: UserRepo>(
    repo: &R,
    principal: Option<&Principal>,
    update: UserSettingsUpdate,
) -> Result<User> {
    let principal = crate::authorization::require_principal(principal)?;
    let mut user = repo
        .get_user(&principal.user_id)
        .not_found_as(Error::UserNotFound)?;
    let UserSettingsUpdate {
        display_name,
        pronouns,
        email_opt_in,
        profile_visibility,
    } = update;
    if let Some(display_name) = display_name {
        let display_name = display_name.trim();
        if !has_char_len(display_name, 0..=100) {
            return Err(Error::DisplayName);
        }
        user.display_name = Some(display_name.to_owned()).filter(|n| !n.is_empty());
    }
    if let Some(pronouns) = pronouns {
        let pronouns = pronouns.trim();
        if !has_char_len(pronouns, 0..=50) {
            return Err(Error::Pronouns);
        }
        user.pronouns = Some(pronouns.to_owned()).filter(|p| !p.is_empty());
    }
    if let Some(email_opt_in) = email_opt_in {
        user.settings.email_opt_in = email_opt_in;
    }
    if let Some(profile_visibility) = profile_visibility {
        user.settings.profile_visibility = profile_visibility;
    }
    repo.update_user(&user)?;
    log::debug!("Updated settings of user {}", user.id);
    Ok(user)
}
