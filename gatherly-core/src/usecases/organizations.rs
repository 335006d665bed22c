use super::prelude::*;
use crate::{
    authorization::require_verified_principal,
    util::{
        slug,
        validate::{has_char_len, normalize_labels},
    },
};

#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Creates an organization owned by the principal.
///
/// Plain members are promoted to organization admins.
pub fn create_organization<R>(
    repo: &R,
    principal: Option<&Principal>,
    o: NewOrganization,
    now: Timestamp,
) -> Result<Organization>
where
    R: OrganizationRepo + UserRepo,
{
    let principal = require_verified_principal(principal)?;
    let NewOrganization {
        name,
        description,
        tags,
    } = o;
    let name = name.trim().to_owned();
    if !has_char_len(&name, 2..=100) {
        return Err(Error::Name);
    }
    let description = description.trim().to_owned();
    if !has_char_len(&description, 10..=1000) {
        return Err(Error::OrganizationDescription);
    }
    let mut user = repo
        .get_user(&principal.user_id)
        .not_found_as(Error::UserNotFound)?;
    let slug = slug::unique_slug(slug::slugify(&name, "org"), |s| repo.is_org_slug_taken(s))?;
    let org = Organization {
        id: Id::new(),
        name,
        slug,
        description,
        verified: false,
        owners: vec![user.id.clone()],
        members: vec![user.id.clone()],
        tags: normalize_labels(tags.into_iter().map(|t| t.to_lowercase()).collect()),
        created_at: now,
    };
    repo.create_org(org.clone())?;
    user.org_ids.push(org.id.clone());
    if user.role == Role::Member {
        user.role = Role::OrgAdmin;
    }
    repo.update_user(&user)?;
    log::info!("Created organization {} ({}) owned by {}", org.id, org.slug, user.id);
    Ok(org)
}
