use crate::{email::EmailAddress, event::EventDetails, id::Id, time::Timestamp};

/// Pending edits of an approved event.
///
/// A draft exists only while the event is awaiting review of the
/// edit. It is removed when an administrator approves it.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub event_id     : Id,
    pub details      : EventDetails,
    pub submitted_at : Timestamp,
    pub submitted_by : Option<EmailAddress>,
}
