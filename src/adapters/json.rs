pub use eventdesk_boundary::*;

use eventdesk_core::{entities as e, usecases};

pub mod from_json {
    //! JSON -> Use case parameters

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn new_event(from: NewEvent) -> usecases::NewEvent {
        let NewEvent {
            title,
            organizer_name,
            organizer_email,
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
        } = from;
        usecases::NewEvent {
            title,
            organizer_name,
            organizer_email,
            start: event_start,
            end: event_end,
            registration_deadline,
            capacity,
            recurrence: recurrence.into(),
            venue: venue.into(),
            category,
            pricing: pricing.into(),
            description,
            cover_image,
            promo_video,
            speakers: speakers.into_iter().map(e::Speaker::from).collect(),
            faqs: faqs.into_iter().map(e::Faq::from).collect(),
        }
    }
}

pub mod to_json {
    //! Use case results -> JSON

    use super::*;

    pub fn speaker_view(from: usecases::SpeakerView) -> SpeakerView {
        let usecases::SpeakerView {
            name,
            bio,
            photo_url,
        } = from;
        SpeakerView {
            name,
            bio,
            photo_url,
        }
    }

    pub fn event_view(from: usecases::EventView) -> EventView {
        let usecases::EventView {
            title,
            organizer,
            schedule,
            capacity,
            recurrence,
            location,
            venue,
            category,
            pricing,
            description_html,
            cover_image_url,
            promo_video_url,
            speakers,
            faqs,
            occurrences,
        } = from;
        EventView {
            title,
            organizer: organizer.into(),
            event_start: schedule.start.as_secs(),
            event_end: schedule.end.map(e::Timestamp::as_secs),
            registration_deadline: schedule.registration_deadline.map(e::Timestamp::as_secs),
            capacity,
            recurrence: recurrence.into(),
            location,
            venue: venue.into(),
            category,
            pricing: pricing.into(),
            description_html,
            cover_image_url,
            promo_video_url,
            speakers: speakers.into_iter().map(speaker_view).collect(),
            faqs: faqs.into_iter().map(Into::into).collect(),
            occurrences: occurrences.into_iter().map(Into::into).collect(),
        }
    }

    pub fn review_presentation(from: usecases::ReviewPresentation) -> ReviewPresentation {
        let usecases::ReviewPresentation {
            event_id,
            state,
            edit_count,
            current,
            edited,
        } = from;
        ReviewPresentation {
            event_id: event_id.to_string(),
            state: state.into(),
            edit_count,
            current: event_view(current),
            edited: edited.map(event_view),
        }
    }
}
