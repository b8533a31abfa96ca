use crate::{
    email::EmailAddress, faq::Faq, id::Id, media::MediaItem, occurrence::*, review::ReviewState,
    speaker::Speaker, time::Timestamp,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Organizer {
    pub name: String,
    pub email: Option<EmailAddress>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start                 : Timestamp,
    pub end                   : Option<Timestamp>,
    pub registration_deadline : Option<Timestamp>,
}

impl Schedule {
    pub const fn starting_at(start: Timestamp) -> Self {
        Self {
            start,
            end: None,
            registration_deadline: None,
        }
    }

    /// The end of the event or the start if no end is given.
    pub fn end_or_start(&self) -> Timestamp {
        self.end.unwrap_or(self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Venue {
    Physical { address: String },
    Online { link: String },
    Hybrid { address: String, link: String },
}

impl Venue {
    pub fn display_location(&self) -> String {
        match self {
            Self::Physical { address } => address.clone(),
            Self::Online { .. } => "Online".to_string(),
            Self::Hybrid { address, .. } => format!("{address} / Online"),
        }
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self::Physical {
            address: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pricing {
    #[default]
    Free,
    Paid {
        amount_cents: u64,
        currency: String,
    },
}

impl Pricing {
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

/// The editable part of an event.
///
/// The same field set is used for the published record and for a
/// pending [`Draft`](crate::draft::Draft).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub title       : String,
    pub organizer   : Organizer,
    pub schedule    : Schedule,
    pub capacity    : Option<u32>,
    pub recurrence  : Recurrence,
    pub venue       : Venue,
    pub category    : Option<String>,
    pub pricing     : Pricing,
    // Rich text in wire form, i.e. inline media replaced by placeholders
    pub description : Option<String>,
    pub cover_image : Option<String>,
    pub promo_video : Option<String>,
    pub speakers    : Vec<Speaker>,
    pub faqs        : Vec<Faq>,
    // Derived from schedule, recurrence and venue
    pub occurrences : Vec<Occurrence>,
    // Uploaded inline media in placeholder order
    pub media       : Vec<MediaItem>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id         : Id,
    pub details    : EventDetails,
    pub state      : ReviewState,
    // Number of accepted edits, not counting the initial submission
    pub edit_count : u32,
    pub created_by : Option<EmailAddress>,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}

impl Event {
    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn is_approved(&self) -> bool {
        self.state == ReviewState::Approved
    }

    pub fn has_pending_edit(&self) -> bool {
        self.state == ReviewState::PendingEdit
    }
}
