use crate::{
    content::ContentError, entities::ReviewState, gateways::media::MediaError, repositories,
    util::validate::EventInvalidation,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("Missing organizer")]
    Organizer,
    #[error("Invalid email address")]
    Email,
    #[error("A date is out of range")]
    DateOutOfRange,
    #[error("The end date is before the start")]
    EndDateBeforeStart,
    #[error("The registration deadline is after the end of the event")]
    RegistrationDeadline,
    #[error("Invalid capacity")]
    Capacity,
    #[error("Invalid price")]
    Price,
    #[error("Invalid recurrence")]
    Recurrence,
    #[error("Invalid custom date")]
    CustomDate,
    #[error("Invalid venue")]
    Venue,
    #[error("Invalid inline media at position {ordinal}")]
    InlineMedia { ordinal: usize },
    #[error("Invalid media configuration")]
    MediaConfig,
    #[error("This is not allowed")]
    Forbidden,
    #[error("Expected an event in state '{expected}' but found '{actual}'")]
    InvalidReviewState {
        expected: ReviewState,
        actual: ReviewState,
    },
    #[error("The event has already been approved")]
    AlreadyApproved,
    #[error("The pending edit of the event is missing")]
    MissingDraft,
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    /// Errors that are detected without touching any storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Title
                | Self::Organizer
                | Self::Email
                | Self::DateOutOfRange
                | Self::EndDateBeforeStart
                | Self::RegistrationDeadline
                | Self::Capacity
                | Self::Price
                | Self::Recurrence
                | Self::CustomDate
                | Self::Venue
                | Self::InlineMedia { .. }
        )
    }
}

impl From<EventInvalidation> for Error {
    fn from(err: EventInvalidation) -> Self {
        match err {
            EventInvalidation::Title => Self::Title,
            EventInvalidation::Organizer => Self::Organizer,
            EventInvalidation::Email => Self::Email,
            EventInvalidation::DateOutOfRange => Self::DateOutOfRange,
            EventInvalidation::EndDateBeforeStart => Self::EndDateBeforeStart,
            EventInvalidation::RegistrationDeadline => Self::RegistrationDeadline,
            EventInvalidation::Capacity => Self::Capacity,
            EventInvalidation::Price => Self::Price,
            EventInvalidation::Recurrence => Self::Recurrence,
            EventInvalidation::CustomDate => Self::CustomDate,
            EventInvalidation::Venue => Self::Venue,
        }
    }
}

impl From<ContentError> for Error {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InlineData { ordinal } => Self::InlineMedia { ordinal },
            ContentError::BaseUrl => Self::MediaConfig,
        }
    }
}
