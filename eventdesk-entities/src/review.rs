use strum::{Display, EnumIter, EnumString};

/// Review state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum ReviewState {
    /// Never approved by an administrator.
    New,
    /// Approved and publicly visible.
    Approved,
    /// Approved, with edits awaiting review.
    PendingEdit,
}

impl ReviewState {
    pub const fn default() -> Self {
        Self::New
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::New)
    }
}
