use super::*;

impl OrganizationRepo for DbConnection<'_> {
    fn create_org(&self, org: Organization) -> Result<()> {
        self.write(|data| {
            if data.orgs.contains_key(&org.id) || data.org_slugs.contains_key(&org.slug) {
                return Err(repo::Error::AlreadyExists);
            }
            data.org_slugs.insert(org.slug.clone(), org.id.clone());
            data.orgs.insert(org.id.clone(), org);
            Ok(())
        })
    }
    fn get_org(&self, id: &Id) -> Result<Organization> {
        self.read(|data| data.orgs.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn is_org_slug_taken(&self, slug: &str) -> Result<bool> {
        Ok(self.read(|data| data.org_slugs.contains_key(slug)))
    }
}
