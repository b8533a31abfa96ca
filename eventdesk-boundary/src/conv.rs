use super::*;
use eventdesk_entities as e;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid email address '{0}'")]
    Email(String),
}

fn parse_email(email: Option<String>) -> Result<Option<e::email::EmailAddress>, ConversionError> {
    email
        .filter(|email| !email.trim().is_empty())
        .map(|email| email.parse().map_err(|_| ConversionError::Email(email)))
        .transpose()
}

fn secs(ts: e::time::Timestamp) -> i64 {
    ts.as_secs()
}

fn timestamp(secs: i64) -> e::time::Timestamp {
    e::time::Timestamp::from_secs(secs)
}

impl From<e::review::ReviewState> for ReviewState {
    fn from(from: e::review::ReviewState) -> Self {
        use e::review::ReviewState as E;
        match from {
            E::New => Self::New,
            E::Approved => Self::Approved,
            E::PendingEdit => Self::PendingEdit,
        }
    }
}

impl From<ReviewState> for e::review::ReviewState {
    fn from(from: ReviewState) -> Self {
        match from {
            ReviewState::New => Self::New,
            ReviewState::Approved => Self::Approved,
            ReviewState::PendingEdit => Self::PendingEdit,
        }
    }
}

impl From<e::event::Organizer> for Organizer {
    fn from(from: e::event::Organizer) -> Self {
        let e::event::Organizer { name, email } = from;
        Self {
            name,
            email: email.map(|e| e.to_string()),
        }
    }
}

impl TryFrom<Organizer> for e::event::Organizer {
    type Error = ConversionError;
    fn try_from(from: Organizer) -> Result<Self, Self::Error> {
        let Organizer { name, email } = from;
        Ok(Self {
            name,
            email: parse_email(email)?,
        })
    }
}

impl From<e::speaker::Speaker> for Speaker {
    fn from(from: e::speaker::Speaker) -> Self {
        let e::speaker::Speaker { name, bio, photo } = from;
        Self { name, bio, photo }
    }
}

impl From<Speaker> for e::speaker::Speaker {
    fn from(from: Speaker) -> Self {
        let Speaker { name, bio, photo } = from;
        Self { name, bio, photo }
    }
}

impl From<e::faq::Faq> for Faq {
    fn from(from: e::faq::Faq) -> Self {
        let e::faq::Faq { question, answer } = from;
        Self { question, answer }
    }
}

impl From<Faq> for e::faq::Faq {
    fn from(from: Faq) -> Self {
        let Faq { question, answer } = from;
        Self { question, answer }
    }
}

impl From<e::occurrence::CustomDate> for CustomDate {
    fn from(from: e::occurrence::CustomDate) -> Self {
        Self {
            start: secs(from.start),
            end: secs(from.end),
        }
    }
}

impl From<CustomDate> for e::occurrence::CustomDate {
    fn from(from: CustomDate) -> Self {
        Self {
            start: timestamp(from.start),
            end: timestamp(from.end),
        }
    }
}

impl From<e::occurrence::Occurrence> for Occurrence {
    fn from(from: e::occurrence::Occurrence) -> Self {
        let e::occurrence::Occurrence {
            start,
            end,
            location,
        } = from;
        Self {
            start: secs(start),
            end: secs(end),
            location,
        }
    }
}

impl From<Occurrence> for e::occurrence::Occurrence {
    fn from(from: Occurrence) -> Self {
        let Occurrence {
            start,
            end,
            location,
        } = from;
        Self {
            start: timestamp(start),
            end: timestamp(end),
            location,
        }
    }
}

impl From<e::occurrence::Recurrence> for Recurrence {
    fn from(from: e::occurrence::Recurrence) -> Self {
        use e::occurrence::Recurrence as E;
        match from {
            E::Once => Self::Once,
            E::Daily { until } => Self::Daily { until: secs(until) },
            E::Weekly { until } => Self::Weekly { until: secs(until) },
            E::Monthly { until } => Self::Monthly { until: secs(until) },
            E::Custom(dates) => Self::Custom {
                dates: dates.into_iter().map(Into::into).collect(),
            },
        }
    }
}

impl From<Recurrence> for e::occurrence::Recurrence {
    fn from(from: Recurrence) -> Self {
        match from {
            Recurrence::Once => Self::Once,
            Recurrence::Daily { until } => Self::Daily {
                until: timestamp(until),
            },
            Recurrence::Weekly { until } => Self::Weekly {
                until: timestamp(until),
            },
            Recurrence::Monthly { until } => Self::Monthly {
                until: timestamp(until),
            },
            Recurrence::Custom { dates } => Self::Custom(dates.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<e::event::Venue> for Venue {
    fn from(from: e::event::Venue) -> Self {
        use e::event::Venue as E;
        match from {
            E::Physical { address } => Self::Physical { address },
            E::Online { link } => Self::Online { link },
            E::Hybrid { address, link } => Self::Hybrid { address, link },
        }
    }
}

impl From<Venue> for e::event::Venue {
    fn from(from: Venue) -> Self {
        match from {
            Venue::Physical { address } => Self::Physical { address },
            Venue::Online { link } => Self::Online { link },
            Venue::Hybrid { address, link } => Self::Hybrid { address, link },
        }
    }
}

impl From<e::event::Pricing> for Pricing {
    fn from(from: e::event::Pricing) -> Self {
        use e::event::Pricing as E;
        match from {
            E::Free => Self::Free,
            E::Paid {
                amount_cents,
                currency,
            } => Self::Paid {
                amount_cents,
                currency,
            },
        }
    }
}

impl From<Pricing> for e::event::Pricing {
    fn from(from: Pricing) -> Self {
        match from {
            Pricing::Free => Self::Free,
            Pricing::Paid {
                amount_cents,
                currency,
            } => Self::Paid {
                amount_cents,
                currency,
            },
        }
    }
}

impl From<e::event::EventDetails> for EventDetails {
    fn from(from: e::event::EventDetails) -> Self {
        let e::event::EventDetails {
            title,
            organizer,
            schedule,
            capacity,
            recurrence,
            venue,
            category,
            pricing,
            description,
            cover_image,
            promo_video,
            speakers,
            faqs,
            occurrences,
            media,
        } = from;
        Self {
            title,
            organizer: organizer.into(),
            event_start: secs(schedule.start),
            event_end: schedule.end.map(secs),
            registration_deadline: schedule.registration_deadline.map(secs),
            capacity,
            recurrence: recurrence.into(),
            venue: venue.into(),
            category,
            pricing: pricing.into(),
            description,
            cover_image,
            promo_video,
            speakers: speakers.into_iter().map(Into::into).collect(),
            faqs: faqs.into_iter().map(Into::into).collect(),
            occurrences: occurrences.into_iter().map(Into::into).collect(),
            media: media.into_iter().map(|m| m.url).collect(),
        }
    }
}

impl TryFrom<EventDetails> for e::event::EventDetails {
    type Error = ConversionError;
    fn try_from(from: EventDetails) -> Result<Self, Self::Error> {
        let EventDetails {
            title,
            organizer,
            event_start,
            event_end,
            registration_deadline,
            capacity,
            recurrence,
            venue,
            category,
            pricing,
            description,
            cover_image,
            promo_video,
            speakers,
            faqs,
            occurrences,
            media,
        } = from;
        Ok(Self {
            title,
            organizer: organizer.try_into()?,
            schedule: e::event::Schedule {
                start: timestamp(event_start),
                end: event_end.map(timestamp),
                registration_deadline: registration_deadline.map(timestamp),
            },
            capacity,
            recurrence: recurrence.into(),
            venue: venue.into(),
            category,
            pricing: pricing.into(),
            description,
            cover_image,
            promo_video,
            speakers: speakers.into_iter().map(Into::into).collect(),
            faqs: faqs.into_iter().map(Into::into).collect(),
            occurrences: occurrences.into_iter().map(Into::into).collect(),
            media: media.into_iter().map(e::media::MediaItem::new).collect(),
        })
    }
}

impl From<e::event::Event> for Event {
    fn from(from: e::event::Event) -> Self {
        let e::event::Event {
            id,
            details,
            state,
            edit_count,
            created_by,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            details: details.into(),
            state: state.into(),
            edit_count,
            created_by: created_by.map(|e| e.to_string()),
            created_at: secs(created_at),
            updated_at: secs(updated_at),
        }
    }
}

impl TryFrom<Event> for e::event::Event {
    type Error = ConversionError;
    fn try_from(from: Event) -> Result<Self, Self::Error> {
        let Event {
            id,
            details,
            state,
            edit_count,
            created_by,
            created_at,
            updated_at,
        } = from;
        Ok(Self {
            id: id.into(),
            details: details.try_into()?,
            state: state.into(),
            edit_count,
            created_by: parse_email(created_by)?,
            created_at: timestamp(created_at),
            updated_at: timestamp(updated_at),
        })
    }
}

impl From<e::draft::Draft> for Draft {
    fn from(from: e::draft::Draft) -> Self {
        let e::draft::Draft {
            event_id,
            details,
            submitted_at,
            submitted_by,
        } = from;
        Self {
            event_id: event_id.into(),
            details: details.into(),
            submitted_at: secs(submitted_at),
            submitted_by: submitted_by.map(|e| e.to_string()),
        }
    }
}

impl TryFrom<Draft> for e::draft::Draft {
    type Error = ConversionError;
    fn try_from(from: Draft) -> Result<Self, Self::Error> {
        let Draft {
            event_id,
            details,
            submitted_at,
            submitted_by,
        } = from;
        Ok(Self {
            event_id: event_id.into(),
            details: details.try_into()?,
            submitted_at: timestamp(submitted_at),
            submitted_by: parse_email(submitted_by)?,
        })
    }
}
