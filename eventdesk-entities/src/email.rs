use std::{fmt, str::FromStr};
use thiserror::Error;

/// Address of an organizer, a reviewer or a submitting user.
///
/// An optional display name is kept for formatting,
/// ownership checks only compare the address itself.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EmailAddress {
    address: String,
    display_name: Option<String>,
}

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Whether both refer to the same mailbox (case-insensitive).
    pub fn is_same_mailbox(&self, other: &EmailAddress) -> bool {
        self.address.eq_ignore_ascii_case(&other.address)
    }
}

#[derive(Debug, Error)]
#[error("Invalid email address")]
pub struct EmailAddressParseError;

impl FromStr for EmailAddress {
    type Err = EmailAddressParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let info = mailparse::addrparse(s)
            .ok()
            .and_then(|list| list.extract_single_info())
            .filter(|info| info.addr.contains('@'))
            .ok_or(EmailAddressParseError)?;
        Ok(Self {
            address: info.addr,
            display_name: info.display_name.filter(|name| !name.trim().is_empty()),
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, r#""{}" <{}>"#, name.replace('"', r#"\""#), self.address),
            None => f.write_str(&self.address),
        }
    }
}
