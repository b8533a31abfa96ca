use std::cell::RefCell;

use super::prelude::*;
use crate::{
    content::Attachment,
    gateways::media::{MediaError, MediaGateway},
};

pub use crate::RepoError;

type RepoResult<T> = std::result::Result<T, RepoError>;

#[derive(Debug, Default)]
pub struct MockDb {
    pub events: RefCell<Vec<Event>>,
    pub drafts: RefCell<Vec<Draft>>,
}

trait Key {
    fn key(&self) -> &str;
}

impl Key for Event {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Draft {
    fn key(&self) -> &str {
        self.event_id.as_str()
    }
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    match objects.iter().find(|x| x.key() == id) {
        Some(x) => Ok(x.clone()),
        None => Err(RepoError::NotFound),
    }
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn create_or_replace<T: Clone + Key>(objects: &mut Vec<T>, e: &T) -> RepoResult<()> {
    for elem in objects.iter_mut() {
        if elem.key() == e.key() {
            *elem = e.clone();
            return Ok(());
        }
    }
    objects.push(e.clone());
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    if let Some(pos) = objects.iter().position(|x| x.key() == e.key()) {
        objects[pos] = e.clone();
    } else {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

impl EventRepo for MockDb {
    fn get_event(&self, id: &str) -> RepoResult<Event> {
        get(&self.events.borrow(), id)
    }
    fn all_events(&self) -> RepoResult<Vec<Event>> {
        Ok(self.events.borrow().clone())
    }
    fn create_event(&self, e: Event) -> RepoResult<()> {
        create(&mut self.events.borrow_mut(), e)
    }
    fn update_event(&self, e: &Event) -> RepoResult<()> {
        update(&mut self.events.borrow_mut(), e)
    }
}

impl DraftRepo for MockDb {
    fn get_draft(&self, event_id: &str) -> RepoResult<Draft> {
        get(&self.drafts.borrow(), event_id)
    }
    fn all_drafts(&self) -> RepoResult<Vec<Draft>> {
        Ok(self.drafts.borrow().clone())
    }
    fn save_draft(&self, draft: &Draft) -> RepoResult<()> {
        create_or_replace(&mut self.drafts.borrow_mut(), draft)
    }
    fn delete_draft(&self, event_id: &str) -> RepoResult<()> {
        let mut drafts = self.drafts.borrow_mut();
        let len = drafts.len();
        drafts.retain(|d| d.event_id.as_str() != event_id);
        if drafts.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Fails on every access to make sure that no storage is touched.
#[derive(Debug)]
pub struct FailingDb;

impl EventRepo for FailingDb {
    fn get_event(&self, _: &str) -> RepoResult<Event> {
        panic!("unexpected repository access");
    }
    fn all_events(&self) -> RepoResult<Vec<Event>> {
        panic!("unexpected repository access");
    }
    fn create_event(&self, _: Event) -> RepoResult<()> {
        panic!("unexpected repository access");
    }
    fn update_event(&self, _: &Event) -> RepoResult<()> {
        panic!("unexpected repository access");
    }
}

impl DraftRepo for FailingDb {
    fn get_draft(&self, _: &str) -> RepoResult<Draft> {
        panic!("unexpected repository access");
    }
    fn all_drafts(&self) -> RepoResult<Vec<Draft>> {
        panic!("unexpected repository access");
    }
    fn save_draft(&self, _: &Draft) -> RepoResult<()> {
        panic!("unexpected repository access");
    }
    fn delete_draft(&self, _: &str) -> RepoResult<()> {
        panic!("unexpected repository access");
    }
}

#[derive(Debug, Default)]
pub struct MockMediaStore {
    pub stored: RefCell<Vec<(Id, Attachment)>>,
    pub removed: RefCell<Vec<MediaItem>>,
    // Rejects attachments of this type
    pub reject: Option<&'static str>,
}

impl MediaGateway for MockMediaStore {
    fn store_attachment(
        &self,
        event_id: &Id,
        attachment: &Attachment,
    ) -> std::result::Result<MediaItem, MediaError> {
        if self.reject == Some(attachment.mime_type.as_str()) {
            return Err(MediaError::UnsupportedType(attachment.mime_type.clone()));
        }
        self.stored
            .borrow_mut()
            .push((event_id.clone(), attachment.clone()));
        Ok(MediaItem::new(format!(
            "/uploads/{}/{}.{}",
            event_id,
            attachment.ordinal,
            attachment.file_extension()
        )))
    }

    fn remove_media(&self, item: &MediaItem) -> std::result::Result<(), MediaError> {
        self.removed.borrow_mut().push(item.clone());
        Ok(())
    }
}
