use std::fmt;

use crate::entities::{Draft, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    EventSubmitted,
    EditSubmitted,
    EventApproved,
    EditApproved,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::EventSubmitted => "event-submitted",
            Self::EditSubmitted => "edit-submitted",
            Self::EventApproved => "event-approved",
            Self::EditApproved => "edit-approved",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NotificationEvent<'a> {
    EventSubmitted { event: &'a Event },
    EditSubmitted { event: &'a Event, draft: &'a Draft },
    EventApproved { event: &'a Event },
    EditApproved { event: &'a Event },
}

impl NotificationEvent<'_> {
    pub const fn kind(&self) -> NotificationType {
        match self {
            Self::EventSubmitted { .. } => NotificationType::EventSubmitted,
            Self::EditSubmitted { .. } => NotificationType::EditSubmitted,
            Self::EventApproved { .. } => NotificationType::EventApproved,
            Self::EditApproved { .. } => NotificationType::EditApproved,
        }
    }

    pub fn event(&self) -> &Event {
        match self {
            Self::EventSubmitted { event }
            | Self::EditSubmitted { event, .. }
            | Self::EventApproved { event }
            | Self::EditApproved { event } => *event,
        }
    }

    /// Both kinds of approval.
    pub fn is_approval(&self) -> bool {
        matches!(self, Self::EventApproved { .. } | Self::EditApproved { .. })
    }
}

pub trait NotificationGateway {
    fn notify(&self, event: NotificationEvent);
}
