use gatherly_core::entities::Url;

/// Builds absolute links to pages of the public website.
#[derive(Debug, Clone)]
pub struct Links {
    base_url: Url,
}

impl Links {
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }

    fn link(&self, path: &str) -> String {
        match self.base_url.join(path) {
            Ok(url) => url.into(),
            Err(_) => format!("{}{path}", self.base_url),
        }
    }

    pub fn email_confirmation(&self, token: &str) -> String {
        self.link(&format!("confirm-email/{token}"))
    }

    pub fn password_reset(&self, token: &str) -> String {
        self.link(&format!("reset-password/{token}"))
    }

    pub fn event(&self, slug: &str) -> String {
        self.link(&format!("events/{slug}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_the_base_path() {
        let links = Links::new("https://example.org/gatherly".parse().unwrap());
        assert_eq!(
            links.event("picnic"),
            "https://example.org/gatherly/events/picnic"
        );
        let links = Links::new("https://gatherly.app".parse().unwrap());
        assert_eq!(
            links.email_confirmation("abc"),
            "https://gatherly.app/confirm-email/abc"
        );
        assert_eq!(
            links.password_reset("xyz"),
            "https://gatherly.app/reset-password/xyz"
        );
    }
}
