// Low-level storage access traits.
// Each repository is responsible for a single entity.
// Drafts only reference their event by id.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait EventRepo {
    fn get_event(&self, id: &str) -> Result<Event>;
    fn all_events(&self) -> Result<Vec<Event>>;

    fn create_event(&self, event: Event) -> Result<()>;
    fn update_event(&self, event: &Event) -> Result<()>;
}

pub trait DraftRepo {
    fn get_draft(&self, event_id: &str) -> Result<Draft>;
    fn all_drafts(&self) -> Result<Vec<Draft>>;

    /// Inserts or replaces the draft of an event.
    fn save_draft(&self, draft: &Draft) -> Result<()>;
    fn delete_draft(&self, event_id: &str) -> Result<()>;

    fn find_draft(&self, event_id: &str) -> Result<Option<Draft>> {
        match self.get_draft(event_id) {
            Ok(draft) => Ok(Some(draft)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
