use super::prelude::*;
use crate::{
    content::{media_url, to_display_form, MediaPaths, EMPTY_DESCRIPTION_HTML},
    normalize::normalize_entities,
};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerView {
    pub name      : String,
    pub bio       : String,
    pub photo_url : Option<String>,
}

/// Event details ready to be displayed.
///
/// All media references are absolute URLs.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub title            : String,
    pub organizer        : Organizer,
    pub schedule         : Schedule,
    pub capacity         : Option<u32>,
    pub recurrence       : Recurrence,
    pub location         : String,
    pub venue            : Venue,
    pub category         : Option<String>,
    pub pricing          : Pricing,
    pub description_html : String,
    pub cover_image_url  : Option<String>,
    pub promo_video_url  : Option<String>,
    pub speakers         : Vec<SpeakerView>,
    pub faqs             : Vec<Faq>,
    pub occurrences      : Vec<Occurrence>,
}

/// The published version of an event side by side with
/// its pending edit, if any.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPresentation {
    pub event_id   : Id,
    pub state      : ReviewState,
    pub edit_count : u32,
    pub current    : EventView,
    pub edited     : Option<EventView>,
}

impl ReviewPresentation {
    /// Whether an edited version must be compared with the current one.
    pub fn is_comparison(&self) -> bool {
        self.edited.is_some()
    }
}

fn absolute_url(url: Option<&String>, paths: &MediaPaths) -> Option<String> {
    url.map(|url| media_url(url, paths))
        .filter(|url| !url.is_empty())
}

/// Decodes stored details into their display form.
pub fn present_details(details: &EventDetails, paths: &MediaPaths) -> EventView {
    let description_html = details
        .description
        .as_deref()
        .map(|markup| to_display_form(markup, paths, &details.media))
        .unwrap_or_else(|| EMPTY_DESCRIPTION_HTML.to_owned());
    let speakers = normalize_entities(details.speakers.clone())
        .into_iter()
        .map(|speaker| SpeakerView {
            photo_url: absolute_url(speaker.photo.as_ref(), paths),
            name: speaker.name,
            bio: speaker.bio,
        })
        .collect();
    let recurrence = match &details.recurrence {
        Recurrence::Custom(dates) => Recurrence::Custom(normalize_entities(dates.clone())),
        other => other.clone(),
    };
    EventView {
        title: details.title.clone(),
        organizer: details.organizer.clone(),
        schedule: details.schedule,
        capacity: details.capacity,
        recurrence,
        location: details.venue.display_location(),
        venue: details.venue.clone(),
        category: details.category.clone(),
        pricing: details.pricing.clone(),
        description_html,
        cover_image_url: absolute_url(details.cover_image.as_ref(), paths),
        promo_video_url: absolute_url(details.promo_video.as_ref(), paths),
        speakers,
        faqs: normalize_entities(details.faqs.clone()),
        occurrences: details.occurrences.clone(),
    }
}

pub fn present_event(event: &Event, draft: Option<&Draft>, paths: &MediaPaths) -> ReviewPresentation {
    let edited = match (event.state, draft) {
        (ReviewState::PendingEdit, Some(draft)) => Some(present_details(&draft.details, paths)),
        (ReviewState::PendingEdit, None) => {
            log::warn!("Event {} is awaiting review but has no draft", event.id);
            None
        }
        _ => None,
    };
    ReviewPresentation {
        event_id: event.id.clone(),
        state: event.state,
        edit_count: event.edit_count,
        current: present_details(&event.details, paths),
        edited,
    }
}

pub fn load_review<R>(repo: &R, id: &str, paths: &MediaPaths) -> Result<ReviewPresentation>
where
    R: EventRepo + DraftRepo,
{
    let (event, draft) = super::get_event_with_draft(repo, id)?;
    Ok(present_event(&event, draft.as_ref(), paths))
}
