use anyhow::anyhow;
use eventdesk_boundary as json;
use eventdesk_core::{entities::*, repositories::*};
use std::{collections::HashMap, convert::TryFrom, fs, io, path::PathBuf};

use super::*;

type Result<T> = std::result::Result<T, repo::Error>;

fn check_id(id: &str) -> Result<()> {
    if !is_valid_id(id) {
        return Err(repo::Error::Other(anyhow!("Invalid record id '{id}'")));
    }
    Ok(())
}

fn exists(store: &Store, id: &str) -> Result<bool> {
    check_id(id)?;
    Ok(record_path(store, id).exists())
}

fn load_event(store: &JsonStore, id: &str) -> Result<Event> {
    check_id(id)?;
    let record: json::Event = store.events.get(id).map_err(from_io_err)?;
    Event::try_from(record).map_err(|err| repo::Error::Other(err.into()))
}

fn load_all_events(store: &JsonStore) -> Result<Vec<Event>> {
    store
        .events
        .all::<json::Event>()
        .map_err(from_io_err)?
        .into_values()
        .map(|record| Event::try_from(record).map_err(|err| repo::Error::Other(err.into())))
        .collect()
}

fn write_event(store: &JsonStore, event: &Event) -> Result<()> {
    check_id(event.id.as_str())?;
    let record = json::Event::from(event.clone());
    log::debug!("Writing event {}", event.id);
    store
        .events
        .save_with_id(&record, event.id.as_str())
        .map_err(from_io_err)?;
    Ok(())
}

fn load_draft(store: &JsonStore, event_id: &str) -> Result<Draft> {
    check_id(event_id)?;
    let record: json::Draft = store.drafts.get(event_id).map_err(from_io_err)?;
    Draft::try_from(record).map_err(|err| repo::Error::Other(err.into()))
}

fn load_all_drafts(store: &JsonStore) -> Result<Vec<Draft>> {
    store
        .drafts
        .all::<json::Draft>()
        .map_err(from_io_err)?
        .into_values()
        .map(|record| Draft::try_from(record).map_err(|err| repo::Error::Other(err.into())))
        .collect()
}

fn write_draft(store: &JsonStore, draft: &Draft) -> Result<()> {
    check_id(draft.event_id.as_str())?;
    let record = json::Draft::from(draft.clone());
    log::debug!("Writing draft of event {}", draft.event_id);
    store
        .drafts
        .save_with_id(&record, draft.event_id.as_str())
        .map_err(from_io_err)?;
    Ok(())
}

fn remove_draft(store: &JsonStore, event_id: &str) -> Result<()> {
    check_id(event_id)?;
    log::debug!("Deleting draft of event {}", event_id);
    store.drafts.delete(event_id).map_err(from_io_err)
}

fn create_event(store: &JsonStore, event: &Event) -> Result<()> {
    if exists(&store.events, event.id.as_str())? {
        return Err(repo::Error::AlreadyExists);
    }
    write_event(store, event)
}

fn update_event(store: &JsonStore, event: &Event) -> Result<()> {
    if !exists(&store.events, event.id.as_str())? {
        return Err(repo::Error::NotFound);
    }
    write_event(store, event)
}

/// Pending writes of a transaction.
#[derive(Default)]
pub(crate) struct Staging {
    events: HashMap<String, Event>,
    // `None` marks a deleted draft
    drafts: HashMap<String, Option<Draft>>,
}

impl Staging {
    pub(crate) fn len(&self) -> usize {
        self.events.len() + self.drafts.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes all staged changes, drafts before events.
    ///
    /// The previous content of every touched file is kept and
    /// restored if any write fails.
    pub(crate) fn commit(self, store: &JsonStore) -> Result<()> {
        let mut snapshots = Vec::with_capacity(self.len());
        let result = self.apply(store, &mut snapshots);
        if result.is_err() {
            log::warn!("Rolling back {} written file(s)", snapshots.len());
            for snapshot in snapshots.into_iter().rev() {
                snapshot.restore();
            }
        }
        result
    }

    fn apply(self, store: &JsonStore, snapshots: &mut Vec<Snapshot>) -> Result<()> {
        let Self { events, drafts } = self;
        for (event_id, draft) in drafts {
            snapshots.push(Snapshot::take(record_path(&store.drafts, &event_id))?);
            match draft {
                Some(draft) => write_draft(store, &draft)?,
                None => match remove_draft(store, &event_id) {
                    Ok(()) | Err(repo::Error::NotFound) => {}
                    Err(err) => return Err(err),
                },
            }
        }
        for (id, event) in events {
            snapshots.push(Snapshot::take(record_path(&store.events, &id))?);
            write_event(store, &event)?;
        }
        Ok(())
    }
}

fn record_path(store: &Store, id: &str) -> PathBuf {
    store.path().join(format!("{id}.json"))
}

/// The content of a record file before it was written.
struct Snapshot {
    path: PathBuf,
    // `None` if the file did not exist
    content: Option<Vec<u8>>,
}

impl Snapshot {
    fn take(path: PathBuf) -> Result<Self> {
        let content = match fs::read(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(repo::Error::Io(err)),
        };
        Ok(Self { path, content })
    }

    fn restore(self) {
        let Self { path, content } = self;
        let result = match content {
            Some(content) => fs::write(&path, content),
            None => match fs::remove_file(&path) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                res => res,
            },
        };
        if let Err(err) = result {
            log::error!("Failed to restore {}: {err}", path.display());
        }
    }
}

impl EventRepo for DbReadOnly<'_> {
    fn get_event(&self, id: &str) -> Result<Event> {
        load_event(&self.store, id)
    }
    fn all_events(&self) -> Result<Vec<Event>> {
        load_all_events(&self.store)
    }

    fn create_event(&self, _event: Event) -> Result<()> {
        unreachable!();
    }
    fn update_event(&self, _event: &Event) -> Result<()> {
        unreachable!();
    }
}

impl DraftRepo for DbReadOnly<'_> {
    fn get_draft(&self, event_id: &str) -> Result<Draft> {
        load_draft(&self.store, event_id)
    }
    fn all_drafts(&self) -> Result<Vec<Draft>> {
        load_all_drafts(&self.store)
    }

    fn save_draft(&self, _draft: &Draft) -> Result<()> {
        unreachable!();
    }
    fn delete_draft(&self, _event_id: &str) -> Result<()> {
        unreachable!();
    }
}

impl EventRepo for DbReadWrite<'_> {
    fn get_event(&self, id: &str) -> Result<Event> {
        load_event(&self.store, id)
    }
    fn all_events(&self) -> Result<Vec<Event>> {
        load_all_events(&self.store)
    }

    fn create_event(&self, event: Event) -> Result<()> {
        create_event(&self.store, &event)
    }
    fn update_event(&self, event: &Event) -> Result<()> {
        update_event(&self.store, event)
    }
}

impl DraftRepo for DbReadWrite<'_> {
    fn get_draft(&self, event_id: &str) -> Result<Draft> {
        load_draft(&self.store, event_id)
    }
    fn all_drafts(&self) -> Result<Vec<Draft>> {
        load_all_drafts(&self.store)
    }

    fn save_draft(&self, draft: &Draft) -> Result<()> {
        write_draft(&self.store, draft)
    }
    fn delete_draft(&self, event_id: &str) -> Result<()> {
        remove_draft(&self.store, event_id)
    }
}

impl EventRepo for DbConnection<'_> {
    fn get_event(&self, id: &str) -> Result<Event> {
        if let Some(event) = self.staged.borrow().events.get(id) {
            return Ok(event.clone());
        }
        load_event(self.store, id)
    }
    fn all_events(&self) -> Result<Vec<Event>> {
        let staged = self.staged.borrow();
        let mut events: Vec<_> = load_all_events(self.store)?
            .into_iter()
            .filter(|e| !staged.events.contains_key(e.id.as_str()))
            .collect();
        events.extend(staged.events.values().cloned());
        Ok(events)
    }

    fn create_event(&self, event: Event) -> Result<()> {
        let id = event.id.to_string();
        if self.staged.borrow().events.contains_key(&id) || exists(&self.store.events, &id)? {
            return Err(repo::Error::AlreadyExists);
        }
        self.staged.borrow_mut().events.insert(id, event);
        Ok(())
    }
    fn update_event(&self, event: &Event) -> Result<()> {
        let id = event.id.to_string();
        if !self.staged.borrow().events.contains_key(&id) && !exists(&self.store.events, &id)? {
            return Err(repo::Error::NotFound);
        }
        self.staged.borrow_mut().events.insert(id, event.clone());
        Ok(())
    }
}

impl DraftRepo for DbConnection<'_> {
    fn get_draft(&self, event_id: &str) -> Result<Draft> {
        match self.staged.borrow().drafts.get(event_id) {
            Some(Some(draft)) => return Ok(draft.clone()),
            Some(None) => return Err(repo::Error::NotFound),
            None => {}
        }
        load_draft(self.store, event_id)
    }
    fn all_drafts(&self) -> Result<Vec<Draft>> {
        let staged = self.staged.borrow();
        let mut drafts: Vec<_> = load_all_drafts(self.store)?
            .into_iter()
            .filter(|d| !staged.drafts.contains_key(d.event_id.as_str()))
            .collect();
        drafts.extend(staged.drafts.values().flatten().cloned());
        Ok(drafts)
    }

    fn save_draft(&self, draft: &Draft) -> Result<()> {
        check_id(draft.event_id.as_str())?;
        self.staged
            .borrow_mut()
            .drafts
            .insert(draft.event_id.to_string(), Some(draft.clone()));
        Ok(())
    }
    fn delete_draft(&self, event_id: &str) -> Result<()> {
        // Fails if the draft is neither staged nor stored
        self.get_draft(event_id)?;
        self.staged
            .borrow_mut()
            .drafts
            .insert(event_id.to_owned(), None);
        Ok(())
    }
}
