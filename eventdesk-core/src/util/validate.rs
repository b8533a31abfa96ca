use eventdesk_entities::{
    event::{EventDetails, Organizer, Pricing, Venue},
    occurrence::Recurrence,
    time::Timestamp,
};
use thiserror::Error;

pub use fast_chemail::is_valid_email;

use crate::normalize::normalize_entities;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

impl AutoCorrect for Organizer {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }
}

impl AutoCorrect for Recurrence {
    fn auto_correct(self) -> Self {
        match self {
            Self::Custom(dates) => Self::Custom(normalize_entities(dates)),
            other => other,
        }
    }
}

impl AutoCorrect for EventDetails {
    fn auto_correct(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.organizer = self.organizer.auto_correct();
        self.recurrence = self.recurrence.auto_correct();
        self.category = non_blank(self.category);
        self.description = self.description.filter(|x| !x.trim().is_empty());
        self.cover_image = non_blank(self.cover_image);
        self.promo_video = non_blank(self.promo_video);
        self.speakers = normalize_entities(self.speakers);
        for speaker in &mut self.speakers {
            speaker.photo = non_blank(speaker.photo.take());
        }
        self.faqs = normalize_entities(self.faqs);
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventInvalidation {
    #[error("Invalid title")]
    Title,
    #[error("Missing organizer name")]
    Organizer,
    #[error("Invalid organizer email")]
    Email,
    #[error("A date is out of range")]
    DateOutOfRange,
    #[error("The end date is before the start date")]
    EndDateBeforeStart,
    #[error("The registration deadline is after the end of the event")]
    RegistrationDeadline,
    #[error("The capacity must be positive")]
    Capacity,
    #[error("A paid event requires an amount and a currency")]
    Price,
    #[error("Invalid recurrence")]
    Recurrence,
    #[error("Invalid custom date")]
    CustomDate,
    #[error("Online events require a link")]
    Venue,
}

fn timestamps(details: &EventDetails) -> Vec<Timestamp> {
    let schedule = &details.schedule;
    let mut timestamps = vec![schedule.start];
    timestamps.extend(schedule.end);
    timestamps.extend(schedule.registration_deadline);
    match &details.recurrence {
        Recurrence::Once => {}
        Recurrence::Daily { until }
        | Recurrence::Weekly { until }
        | Recurrence::Monthly { until } => timestamps.push(*until),
        Recurrence::Custom(dates) => {
            timestamps.extend(dates.iter().flat_map(|d| [d.start, d.end]));
        }
    }
    timestamps
}

impl Validate for EventDetails {
    type Error = EventInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() {
            return Err(Self::Error::Title);
        }
        if self.organizer.name.trim().is_empty() {
            return Err(Self::Error::Organizer);
        }
        if let Some(ref email) = self.organizer.email {
            if !is_valid_email(email.as_str()) {
                return Err(Self::Error::Email);
            }
        }
        if timestamps(self).iter().any(|ts| ts.to_date_time().is_none()) {
            return Err(Self::Error::DateOutOfRange);
        }
        let schedule = &self.schedule;
        if let Some(end) = schedule.end {
            if end < schedule.start {
                return Err(Self::Error::EndDateBeforeStart);
            }
        }
        if let Some(deadline) = schedule.registration_deadline {
            if deadline > schedule.end_or_start() {
                return Err(Self::Error::RegistrationDeadline);
            }
        }
        if self.capacity == Some(0) {
            return Err(Self::Error::Capacity);
        }
        if let Pricing::Paid {
            amount_cents,
            currency,
        } = &self.pricing
        {
            if *amount_cents == 0 || currency.trim().is_empty() {
                return Err(Self::Error::Price);
            }
        }
        match &self.recurrence {
            Recurrence::Once => {}
            Recurrence::Daily { until }
            | Recurrence::Weekly { until }
            | Recurrence::Monthly { until } => {
                if *until < schedule.start {
                    return Err(Self::Error::Recurrence);
                }
            }
            Recurrence::Custom(dates) => {
                if dates.is_empty() || dates.iter().any(|d| d.end < d.start) {
                    return Err(Self::Error::CustomDate);
                }
            }
        }
        match &self.venue {
            Venue::Physical { .. } => {}
            Venue::Online { link } | Venue::Hybrid { link, .. } => {
                if link.trim().is_empty() {
                    return Err(Self::Error::Venue);
                }
            }
        }
        Ok(())
    }
}
