use std::{fmt, str::FromStr};
use thiserror::Error;

/// An e-mail address, normalized to lowercase.
///
/// Uniqueness of user accounts is case-insensitive, so the address
/// is stored in its lowercase form.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EmailAddress {
    address: String,
    display_name: Option<String>,
}

impl EmailAddress {
    pub fn new_unchecked(address: String) -> Self {
        Self {
            address: address.to_lowercase(),
            display_name: None,
        }
    }
    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..self
        }
    }
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
    pub fn into_string(self) -> String {
        self.address
    }
    pub fn as_str(&self) -> &str {
        self.address.as_str()
    }
}

#[derive(Debug, Error)]
#[error("Invalid E-Mail address")]
pub struct EmailAddressParseError;

impl FromStr for EmailAddress {
    type Err = EmailAddressParseError;
    fn from_str(s: &str) -> Result<EmailAddress, Self::Err> {
        let info = mailparse::addrparse(s.trim())
            .ok()
            .and_then(|list| list.extract_single_info())
            .ok_or(EmailAddressParseError)?;
        let (local, domain) = info.addr.split_once('@').ok_or(EmailAddressParseError)?;
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(EmailAddressParseError);
        }
        Ok(Self {
            address: info.addr.to_lowercase(),
            display_name: info.display_name,
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let EmailAddress {
            address,
            display_name,
        } = self;
        if let Some(display_name) = &display_name {
            write!(
                f,
                r#""{display_name}" <{address}>"#,
                display_name = display_name.replace('"', r#"\""#)
            )
        } else {
            write!(f, "{address}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_normalize() {
        let addr: EmailAddress = "Jane.Doe@Example.ORG".parse().unwrap();
        assert_eq!(addr.as_str(), "jane.doe@example.org");
    }

    #[test]
    fn parse_with_display_name() {
        let addr: EmailAddress = r#""Jane" <jane@example.org>"#.parse().unwrap();
        assert_eq!(addr.display_name(), Some("Jane"));
        assert_eq!(addr.to_string(), r#""Jane" <jane@example.org>"#);
    }

    #[test]
    fn reject_invalid_addresses() {
        assert!("".parse::<EmailAddress>().is_err());
        assert!("no-at-sign".parse::<EmailAddress>().is_err());
        assert!("foo@bar".parse::<EmailAddress>().is_err());
    }
}
