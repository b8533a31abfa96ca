use std::fmt;

use uuid::Uuid;

/// Identifier of an event.
///
/// The records of an event are stored under its id,
/// so a valid id must be usable as a file name.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Id(String);

impl Id {
    /// A random id (simple UUID v4, 32 hex digits).
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn is_valid(&self) -> bool {
        is_valid_id(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-blank, without path separators and not hidden.
pub fn is_valid_id(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains(['/', '\\']) && !id.starts_with('.')
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Id {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl From<Id> for String {
    fn from(from: Id) -> Self {
        from.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
