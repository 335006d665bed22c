use super::*;

fn create_user(data: &mut Collections, user: &User) -> Result<()> {
    let email = user.email.as_str().to_owned();
    if data.users.contains_key(&user.id) || data.user_emails.contains_key(&email) {
        return Err(repo::Error::AlreadyExists);
    }
    data.user_emails.insert(email, user.id.clone());
    data.users.insert(user.id.clone(), user.clone());
    Ok(())
}

fn update_user(data: &mut Collections, user: &User) -> Result<()> {
    let old_email = data
        .users
        .get(&user.id)
        .map(|u| u.email.as_str().to_owned())
        .ok_or(repo::Error::NotFound)?;
    let new_email = user.email.as_str().to_owned();
    if old_email != new_email {
        if data.user_emails.contains_key(&new_email) {
            return Err(repo::Error::AlreadyExists);
        }
        data.user_emails.remove(&old_email);
        data.user_emails.insert(new_email, user.id.clone());
    }
    data.users.insert(user.id.clone(), user.clone());
    Ok(())
}

fn try_get_user_by_email(data: &Collections, email: &EmailAddress) -> Option<User> {
    data.user_emails
        .get(email.as_str())
        .and_then(|id| data.users.get(id))
        .cloned()
}

impl UserRepo for DbConnection<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        self.write(|data| create_user(data, user))
    }
    fn update_user(&self, user: &User) -> Result<()> {
        self.write(|data| update_user(data, user))
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        self.read(|data| data.users.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        self.read(|data| try_get_user_by_email(data, email))
            .ok_or(repo::Error::NotFound)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        Ok(self.read(|data| try_get_user_by_email(data, email)))
    }

    fn count_users(&self) -> Result<usize> {
        Ok(self.read(|data| data.users.len()))
    }
}
