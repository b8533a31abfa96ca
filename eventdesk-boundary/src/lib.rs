//! Serializable event records in the canonical camelCase schema.
//!
//! The [`legacy`] module reads and writes records of the previous
//! storage layout that encoded the review state in two flags and kept
//! pending edits as a PascalCase JSON string.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub mod legacy;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Organizer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Faq {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct CustomDate {
    pub start: i64,
    pub end: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Occurrence {
    pub start: i64,
    pub end: i64,
    pub location: String,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Once,
    Daily {
        until: i64,
    },
    Weekly {
        until: i64,
    },
    Monthly {
        until: i64,
    },
    Custom {
        dates: Vec<CustomDate>,
    },
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Venue {
    Physical { address: String },
    Online { link: String },
    Hybrid { address: String, link: String },
}

impl Default for Venue {
    fn default() -> Self {
        Self::Physical {
            address: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Pricing {
    #[default]
    Free,
    Paid {
        #[serde(rename = "amountCents")]
        amount_cents: u64,
        currency: String,
    },
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "kebab-case")]
pub enum ReviewState {
    #[default]
    New,
    Approved,
    PendingEdit,
}

/// The editable fields of an event.
///
/// Missing fields are filled with defaults to be able to
/// read partial records.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(default, rename_all = "camelCase")]
pub struct EventDetails {
    pub title                 : String,
    pub organizer             : Organizer,
    pub event_start           : i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_end             : Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline : Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity              : Option<u32>,
    pub recurrence            : Recurrence,
    pub venue                 : Venue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category              : Option<String>,
    pub pricing               : Pricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description           : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image           : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_video           : Option<String>,
    pub speakers              : Vec<Speaker>,
    pub faqs                  : Vec<Faq>,
    pub occurrences           : Vec<Occurrence>,
    pub media                 : Vec<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id         : String,
    #[serde(flatten)]
    pub details    : EventDetails,
    #[serde(default)]
    pub state      : ReviewState,
    #[serde(default)]
    pub edit_count : u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by : Option<String>,
    pub created_at : i64,
    pub updated_at : i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub event_id     : String,
    #[serde(flatten)]
    pub details      : EventDetails,
    pub submitted_at : i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by : Option<String>,
}

/// A submission of a new event or of an edit.
///
/// The description is expected in authoring form, i.e. it
/// may contain inline `data:` images.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(default, rename_all = "camelCase")]
pub struct NewEvent {
    pub title                 : String,
    pub organizer_name        : String,
    pub organizer_email       : Option<String>,
    pub event_start           : i64,
    pub event_end             : Option<i64>,
    pub registration_deadline : Option<i64>,
    pub capacity              : Option<u32>,
    pub recurrence            : Recurrence,
    pub venue                 : Venue,
    pub category              : Option<String>,
    pub pricing               : Pricing,
    pub description           : Option<String>,
    pub cover_image           : Option<String>,
    pub promo_video           : Option<String>,
    pub speakers              : Vec<Speaker>,
    pub faqs                  : Vec<Faq>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct SpeakerView {
    pub name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub title                 : String,
    pub organizer             : Organizer,
    pub event_start           : i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_end             : Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline : Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity              : Option<u32>,
    pub recurrence            : Recurrence,
    pub location              : String,
    pub venue                 : Venue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category              : Option<String>,
    pub pricing               : Pricing,
    pub description_html      : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url       : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_video_url       : Option<String>,
    pub speakers              : Vec<SpeakerView>,
    pub faqs                  : Vec<Faq>,
    pub occurrences           : Vec<Occurrence>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct ReviewPresentation {
    pub event_id   : String,
    pub state      : ReviewState,
    pub edit_count : u32,
    pub current    : EventView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited     : Option<EventView>,
}
