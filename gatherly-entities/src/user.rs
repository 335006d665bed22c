use strum::{AsRefStr, Display, EnumString};

use crate::{email::EmailAddress, id::Id, password::Password, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id             : Id,
    pub name           : String,
    pub display_name   : Option<String>,
    pub email          : EmailAddress,
    /// `None` means the address has not been verified yet.
    pub email_verified : Option<Timestamp>,
    /// `None` for accounts that only log in through an identity provider.
    pub password       : Option<Password>,
    pub pronouns       : Option<String>,
    pub role           : Role,
    pub org_ids        : Vec<Id>,
    pub settings       : UserSettings,
    pub created_at     : Timestamp,
}

impl User {
    pub const fn is_verified(&self) -> bool {
        self.email_verified.is_some()
    }
}

/// The role of a user.
///
/// Roles are not ordered: every capability is
/// checked by explicit membership.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    #[default]
    Member,
    OrgAdmin,
    Moderator,
    Admin,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Members,
    Private,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSettings {
    pub email_opt_in       : bool,
    pub profile_visibility : ProfileVisibility,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email_opt_in: true,
            profile_visibility: ProfileVisibility::default(),
        }
    }
}
