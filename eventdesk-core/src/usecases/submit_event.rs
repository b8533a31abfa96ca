use super::{authorize_editing, prelude::*};
use crate::{
    content::{expand_placeholders, placeholder_ordinals, to_wire_form, Attachment, WireContent},
    gateways::media::{discard_media, MediaGateway},
    repositories::Error as RepoError,
    util::{
        recurrence::derive_occurrences,
        validate::{AutoCorrect, Validate},
    },
};

#[rustfmt::skip]
#[derive(Default, Debug, Clone)]
pub struct NewEvent {
    pub title                 : String,
    pub organizer_name        : String,
    pub organizer_email       : Option<String>,
    pub start                 : i64,
    pub end                   : Option<i64>,
    pub registration_deadline : Option<i64>,
    pub capacity              : Option<u32>,
    pub recurrence            : Recurrence,
    pub venue                 : Venue,
    pub category              : Option<String>,
    pub pricing               : Pricing,
    // Rich text in authoring form
    pub description           : Option<String>,
    pub cover_image           : Option<String>,
    pub promo_video           : Option<String>,
    pub speakers              : Vec<Speaker>,
    pub faqs                  : Vec<Faq>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewEventMode<'a> {
    Create,
    Update(&'a str),
}

/// How a submission is persisted, depending on the current review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPlan {
    /// Store a new event awaiting its first review.
    Create,
    /// Replace the details of an event that has never been approved.
    DirectUpdate,
    /// Keep the published details and store the submission as a draft.
    Draft,
}

impl SubmissionPlan {
    pub fn for_state(state: Option<ReviewState>) -> Self {
        match state {
            None => Self::Create,
            Some(ReviewState::New) => Self::DirectUpdate,
            Some(ReviewState::Approved | ReviewState::PendingEdit) => Self::Draft,
        }
    }
}

/// A validated submission that is ready to be stored.
#[derive(Debug, Clone)]
pub struct Storable {
    plan: SubmissionPlan,
    event_id: Id,
    details: EventDetails,
    attachments: Vec<Attachment>,
    submitted_by: EmailAddress,
    current: Option<Event>,
}

impl Storable {
    pub fn plan(&self) -> SubmissionPlan {
        self.plan
    }
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Created(Event),
    Updated(Event),
    Drafted { event: Event, draft: Draft },
}

impl SubmitOutcome {
    pub fn event(&self) -> &Event {
        match self {
            Self::Created(event) | Self::Updated(event) | Self::Drafted { event, .. } => event,
        }
    }
}

impl NewEvent {
    fn into_details(self) -> Result<EventDetails> {
        let NewEvent {
            title,
            organizer_name,
            organizer_email,
            start,
            end,
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
        } = self;
        let email = organizer_email
            .map(|email| email.trim().to_owned())
            .filter(|email| !email.is_empty())
            .map(|email| email.parse::<EmailAddress>().map_err(|_| Error::Email))
            .transpose()?;
        Ok(EventDetails {
            title,
            organizer: Organizer {
                name: organizer_name,
                email,
            },
            schedule: Schedule {
                start: Timestamp::from_secs(start),
                end: end.map(Timestamp::from_secs),
                registration_deadline: registration_deadline.map(Timestamp::from_secs),
            },
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
            occurrences: vec![],
            media: vec![],
        })
    }
}

/// Validates a submission and decides how it will be stored.
///
/// All field and inline media checks run before the repository is
/// accessed. Placeholders left over from the edited version are
/// expanded into the stored media references of that version before
/// the description is encoded again.
pub fn import_event<R>(
    repo: &R,
    session: &Session,
    new_event: NewEvent,
    mode: NewEventMode,
) -> Result<Storable>
where
    R: EventRepo + DraftRepo,
{
    let mut details = new_event.into_details()?.auto_correct();
    details.validate()?;
    let authoring = details.description.take();
    let mut wire = authoring.as_deref().map(to_wire_form).transpose()?;

    let (plan, event_id, current) = match mode {
        NewEventMode::Create => (SubmissionPlan::Create, Id::new(), None),
        NewEventMode::Update(id) => {
            let event = repo.get_event(id)?;
            authorize_editing(session, &event)?;
            let plan = SubmissionPlan::for_state(Some(event.state));
            (plan, event.id.clone(), Some(event))
        }
    };

    if let (Some(authoring), Some(event)) = (&authoring, &current) {
        if !placeholder_ordinals(authoring).is_empty() {
            let draft = if event.has_pending_edit() {
                repo.find_draft(event.id.as_str())?
            } else {
                None
            };
            let edited_media = draft
                .as_ref()
                .map(|d| &d.details.media)
                .unwrap_or(&event.details.media);
            let expanded = expand_placeholders(authoring, edited_media);
            wire = Some(to_wire_form(&expanded)?);
        }
    }

    let WireContent {
        markup,
        attachments,
    } = wire.unwrap_or_default();
    details.description = Some(markup).filter(|m| !m.trim().is_empty());
    details.occurrences = derive_occurrences(&details);

    Ok(Storable {
        plan,
        event_id,
        details,
        attachments,
        submitted_by: session.email.clone(),
        current,
    })
}

fn upload_attachments<M>(
    media: &M,
    event_id: &Id,
    attachments: &[Attachment],
) -> Result<Vec<MediaItem>>
where
    M: MediaGateway + ?Sized,
{
    let mut uploaded = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        match media.store_attachment(event_id, attachment) {
            Ok(item) => uploaded.push(item),
            Err(err) => {
                discard_media(media, &uploaded);
                return Err(err.into());
            }
        }
    }
    Ok(uploaded)
}

/// Uploads the extracted media and persists the submission.
///
/// Uploaded media are removed again if the submission
/// could not be persisted.
pub fn store_event<R, M>(repo: &R, media: &M, storable: Storable) -> Result<SubmitOutcome>
where
    R: EventRepo + DraftRepo,
    M: MediaGateway + ?Sized,
{
    let Storable {
        plan,
        event_id,
        mut details,
        attachments,
        submitted_by,
        current,
    } = storable;
    let uploaded = upload_attachments(media, &event_id, &attachments)?;
    details.media = uploaded.clone();
    persist(repo, plan, current, event_id, details, submitted_by).inspect_err(|err| {
        log::warn!("Failed to store submission: {err}");
        discard_media(media, &uploaded);
    })
}

fn persist<R>(
    repo: &R,
    plan: SubmissionPlan,
    current: Option<Event>,
    event_id: Id,
    details: EventDetails,
    submitted_by: EmailAddress,
) -> Result<SubmitOutcome>
where
    R: EventRepo + DraftRepo,
{
    let now = Timestamp::now();
    match (plan, current) {
        (SubmissionPlan::Create, _) => {
            let event = Event {
                id: event_id,
                details,
                state: ReviewState::New,
                edit_count: 0,
                created_by: Some(submitted_by),
                created_at: now,
                updated_at: now,
            };
            log::debug!("Storing new event {}", event.id);
            repo.create_event(event.clone())?;
            Ok(SubmitOutcome::Created(event))
        }
        (SubmissionPlan::DirectUpdate, Some(mut event)) => {
            event.details = details;
            event.edit_count = event.edit_count.saturating_add(1);
            event.updated_at = now;
            log::debug!("Updating event {} (edit #{})", event.id, event.edit_count);
            repo.update_event(&event)?;
            Ok(SubmitOutcome::Updated(event))
        }
        (SubmissionPlan::Draft, Some(mut event)) => {
            let draft = Draft {
                event_id,
                details,
                submitted_at: now,
                submitted_by: Some(submitted_by),
            };
            log::debug!("Storing pending edit of event {}", event.id);
            repo.save_draft(&draft)?;
            if event.state != ReviewState::PendingEdit {
                event.state = ReviewState::PendingEdit;
                event.updated_at = now;
                repo.update_event(&event)?;
                log::info!("Event {} is awaiting review of an edit", event.id);
            }
            Ok(SubmitOutcome::Drafted { event, draft })
        }
        (_, None) => Err(RepoError::NotFound.into()),
    }
}
