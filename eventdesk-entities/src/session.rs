use strum::{Display, EnumString};

use crate::email::EmailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Role {
    Organizer,
    Admin,
}

/// The caller of a use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: EmailAddress,
    pub role: Role,
}

impl Session {
    pub fn organizer(email: EmailAddress) -> Self {
        Self {
            email,
            role: Role::Organizer,
        }
    }

    pub fn admin(email: EmailAddress) -> Self {
        Self {
            email,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
