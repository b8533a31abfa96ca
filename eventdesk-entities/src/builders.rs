pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{draft_builder::*, event_builder::*};

pub mod event_builder {

    use super::*;
    use crate::{
        event::*, faq::*, id::*, media::*, occurrence::*, review::*, speaker::*, time::*,
    };

    #[derive(Debug)]
    pub struct EventBuild {
        event: Event,
    }

    impl EventBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.event.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.event.details.title = title.into();
            self
        }
        pub fn organizer(mut self, name: &str, email: &str) -> Self {
            self.event.details.organizer = Organizer {
                name: name.into(),
                email: Some(email.parse().unwrap()),
            };
            self
        }
        pub fn start(mut self, secs: i64) -> Self {
            self.event.details.schedule.start = Timestamp::from_secs(secs);
            self
        }
        pub fn end(mut self, secs: i64) -> Self {
            self.event.details.schedule.end = Some(Timestamp::from_secs(secs));
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.event.details.description = Some(desc.into());
            self
        }
        pub fn cover_image(mut self, path: &str) -> Self {
            self.event.details.cover_image = Some(path.into());
            self
        }
        pub fn media(mut self, urls: Vec<&str>) -> Self {
            self.event.details.media = urls.into_iter().map(MediaItem::new).collect();
            self
        }
        pub fn speakers(mut self, speakers: Vec<(&str, &str)>) -> Self {
            self.event.details.speakers = speakers
                .into_iter()
                .map(|(name, bio)| Speaker::new(name, bio))
                .collect();
            self
        }
        pub fn faqs(mut self, faqs: Vec<(&str, &str)>) -> Self {
            self.event.details.faqs = faqs
                .into_iter()
                .map(|(q, a)| Faq::new(q, a))
                .collect();
            self
        }
        pub fn venue(mut self, venue: Venue) -> Self {
            self.event.details.venue = venue;
            self
        }
        pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
            self.event.details.recurrence = recurrence;
            self
        }
        pub fn state(mut self, state: ReviewState) -> Self {
            self.event.state = state;
            self
        }
        pub fn edit_count(mut self, count: u32) -> Self {
            self.event.edit_count = count;
            self
        }
        pub fn finish(self) -> Event {
            self.event
        }
    }

    pub fn default_details() -> EventDetails {
        EventDetails {
            title: "".into(),
            organizer: Organizer::default(),
            schedule: Schedule::starting_at(Timestamp::from_secs(0)),
            capacity: None,
            recurrence: Recurrence::Once,
            venue: Venue::default(),
            category: None,
            pricing: Pricing::Free,
            description: None,
            cover_image: None,
            promo_video: None,
            speakers: vec![],
            faqs: vec![],
            occurrences: vec![],
            media: vec![],
        }
    }

    impl Builder for Event {
        type Build = EventBuild;
        fn build() -> EventBuild {
            let now = Timestamp::now();
            EventBuild {
                event: Event {
                    id: Id::new(),
                    details: default_details(),
                    state: ReviewState::New,
                    edit_count: 0,
                    created_by: None,
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod draft_builder {

    use super::*;
    use crate::{draft::*, event::*, media::*, time::*};

    #[derive(Debug)]
    pub struct DraftBuild {
        draft: Draft,
    }

    impl DraftBuild {
        /// Starts from a copy of the event's current details.
        pub fn of(mut self, event: &Event) -> Self {
            self.draft.event_id = event.id.clone();
            self.draft.details = event.details.clone();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.draft.details.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.draft.details.description = Some(desc.into());
            self
        }
        pub fn media(mut self, urls: Vec<&str>) -> Self {
            self.draft.details.media = urls.into_iter().map(MediaItem::new).collect();
            self
        }
        pub fn finish(self) -> Draft {
            self.draft
        }
    }

    impl Builder for Draft {
        type Build = DraftBuild;
        fn build() -> DraftBuild {
            DraftBuild {
                draft: Draft {
                    event_id: Default::default(),
                    details: event_builder::default_details(),
                    submitted_at: Timestamp::now(),
                    submitted_by: None,
                },
            }
        }
    }
}
