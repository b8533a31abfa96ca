use anyhow::Result as Fallible;
use eventdesk_core::{repositories as repo, usecases as uc};
use jfs::Store;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{cell::RefCell, fs, path::Path, sync::Arc};

mod repo_impl;

const EVENTS_DIR: &str = "events";
const DRAFTS_DIR: &str = "drafts";

/// One JSON file per record, grouped by entity.
pub struct JsonStore {
    events: Store,
    drafts: Store,
}

impl JsonStore {
    fn open(root: &Path, pretty: bool) -> Fallible<Self> {
        fs::create_dir_all(root)?;
        let cfg = || jfs::Config {
            pretty,
            indent: 2,
            single: false,
            ..Default::default()
        };
        let events = Store::new_with_cfg(root.join(EVENTS_DIR), cfg()).inspect_err(|err| {
            log::error!("Failed to open event store in {}: {err}", root.display());
        })?;
        let drafts = Store::new_with_cfg(root.join(DRAFTS_DIR), cfg()).inspect_err(|err| {
            log::error!("Failed to open draft store in {}: {err}", root.display());
        })?;
        Ok(Self { events, drafts })
    }
}

type SharedStore = Arc<RwLock<JsonStore>>;

pub struct DbReadOnly<'a> {
    store: RwLockReadGuard<'a, JsonStore>,
}

pub struct DbReadWrite<'a> {
    store: RwLockWriteGuard<'a, JsonStore>,
}

/// Access within a transaction.
///
/// Writes are staged in memory and only reach the files
/// after the transaction has succeeded.
pub struct DbConnection<'a> {
    store: &'a JsonStore,
    staged: RefCell<repo_impl::Staging>,
}

impl<'a> DbConnection<'a> {
    fn new(store: &'a JsonStore) -> Self {
        Self {
            store,
            staged: RefCell::new(Default::default()),
        }
    }
}

impl DbReadWrite<'_> {
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        let conn = DbConnection::new(&self.store);
        match f(&conn) {
            Ok(result) => {
                let staged = conn.staged.into_inner();
                log::debug!("Committing {} staged change(s)", staged.len());
                staged.commit(&self.store).map_err(uc::Error::Repo)?;
                Ok(result)
            }
            Err(err) => {
                let staged = conn.staged.into_inner();
                if !staged.is_empty() {
                    log::debug!("Discarding {} staged change(s)", staged.len());
                }
                Err(err.into())
            }
        }
    }
}

#[derive(Clone)]
pub struct Connections {
    // Multiple readers may access the files concurrently,
    // but only a single writer at a time.
    store: SharedStore,
}

impl Connections {
    pub fn init<P: AsRef<Path>>(root: P, pretty: bool) -> Fallible<Self> {
        let root = root.as_ref();
        log::info!("Opening JSON store in {}", root.display());
        let store = JsonStore::open(root, pretty)?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        Ok(DbReadOnly {
            store: self.store.read(),
        })
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        Ok(DbReadWrite {
            store: self.store.write(),
        })
    }
}

pub(crate) fn from_io_err(err: std::io::Error) -> repo::Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => repo::Error::NotFound,
        _ => repo::Error::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::{entities::*, repositories::*, RepoError};
    use eventdesk_entities::builders::*;

    fn connections() -> (tempfile::TempDir, Connections) {
        let dir = tempfile::tempdir().unwrap();
        let connections = Connections::init(dir.path(), false).unwrap();
        (dir, connections)
    }

    fn event(id: &str) -> Event {
        Event::build()
            .id(id)
            .title("Meetup")
            .organizer("Ferris", "ferris@example.org")
            .start(1_000)
            .description(r#"<img src="__MEDIA_0__">"#)
            .media(vec!["/uploads/e1/0.png"])
            .speakers(vec![("Alice", "bio1")])
            .finish()
    }

    #[test]
    fn create_and_load_event() {
        let (_dir, connections) = connections();
        let db = connections.exclusive().unwrap();
        db.create_event(event("e1")).unwrap();
        assert!(matches!(
            db.create_event(event("e1")),
            Err(RepoError::AlreadyExists)
        ));
        drop(db);
        let db = connections.shared().unwrap();
        let loaded = db.get_event("e1").unwrap();
        assert_eq!(event("e1").details, loaded.details);
        assert_eq!(1, db.all_events().unwrap().len());
        assert!(matches!(db.get_event("e2"), Err(RepoError::NotFound)));
    }

    #[test]
    fn update_missing_event() {
        let (_dir, connections) = connections();
        let db = connections.exclusive().unwrap();
        assert!(matches!(
            db.update_event(&event("e1")),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn save_and_delete_draft() {
        let (_dir, connections) = connections();
        let db = connections.exclusive().unwrap();
        let e = event("e1");
        let draft = Draft::build().of(&e).title("Edited").finish();
        db.save_draft(&draft).unwrap();
        db.save_draft(&draft).unwrap();
        assert_eq!("Edited", db.get_draft("e1").unwrap().details.title);
        assert_eq!(1, db.all_drafts().unwrap().len());
        db.delete_draft("e1").unwrap();
        assert!(db.find_draft("e1").unwrap().is_none());
        assert!(matches!(db.delete_draft("e1"), Err(RepoError::NotFound)));
    }

    #[test]
    fn commit_transaction() {
        let (_dir, connections) = connections();
        let mut db = connections.exclusive().unwrap();
        db.transaction(|conn| {
            conn.create_event(event("e1"))?;
            let mut e = conn.get_event("e1")?;
            e.state = ReviewState::PendingEdit;
            conn.update_event(&e)?;
            conn.save_draft(&Draft::build().of(&e).title("Edited").finish())?;
            Ok::<_, RepoError>(())
        })
        .unwrap();
        assert_eq!(ReviewState::PendingEdit, db.get_event("e1").unwrap().state);
        assert_eq!("Edited", db.get_draft("e1").unwrap().details.title);
    }

    #[test]
    fn rollback_transaction() {
        let (_dir, connections) = connections();
        let mut db = connections.exclusive().unwrap();
        let e = event("e1");
        db.create_event(e.clone()).unwrap();
        db.save_draft(&Draft::build().of(&e).finish()).unwrap();
        let err = db
            .transaction(|conn| {
                let mut e = conn.get_event("e1")?;
                e.state = ReviewState::Approved;
                conn.update_event(&e)?;
                conn.delete_draft("e1")?;
                assert!(conn.find_draft("e1")?.is_none());
                assert_eq!(ReviewState::Approved, conn.get_event("e1")?.state);
                Err::<(), _>(uc::Error::Forbidden)
            })
            .unwrap_err();
        assert!(matches!(err, uc::Error::Forbidden));
        assert_eq!(ReviewState::New, db.get_event("e1").unwrap().state);
        assert!(db.find_draft("e1").unwrap().is_some());
    }

    fn replace_dir_with_file(dir: &Path) {
        fs::remove_dir_all(dir).unwrap();
        fs::write(dir, "").unwrap();
    }

    #[test]
    fn failed_draft_write_leaves_event_untouched() {
        let (dir, connections) = connections();
        let mut db = connections.exclusive().unwrap();
        let mut e = event("e1");
        e.state = ReviewState::Approved;
        db.create_event(e.clone()).unwrap();
        replace_dir_with_file(&dir.path().join(DRAFTS_DIR));
        let result = db.transaction(|conn| {
            conn.save_draft(&Draft::build().of(&e).title("Edited").finish())?;
            let mut e = conn.get_event("e1")?;
            e.state = ReviewState::PendingEdit;
            conn.update_event(&e)?;
            Ok::<_, RepoError>(())
        });
        assert!(result.is_err());
        assert_eq!(ReviewState::Approved, db.get_event("e1").unwrap().state);
    }

    #[test]
    fn failed_event_write_restores_previous_draft() {
        let (dir, connections) = connections();
        let mut db = connections.exclusive().unwrap();
        let mut e = event("e1");
        e.state = ReviewState::PendingEdit;
        db.create_event(e.clone()).unwrap();
        db.save_draft(&Draft::build().of(&e).title("Old").finish())
            .unwrap();
        db.create_event(event("e2")).unwrap();
        let result = db.transaction(|conn| {
            conn.save_draft(&Draft::build().of(&e).title("New").finish())?;
            conn.save_draft(&Draft::build().of(&event("e2")).title("Other").finish())?;
            conn.update_event(&e)?;
            replace_dir_with_file(&dir.path().join(EVENTS_DIR));
            Ok::<_, RepoError>(())
        });
        assert!(result.is_err());
        assert_eq!("Old", db.get_draft("e1").unwrap().details.title);
        assert!(db.find_draft("e2").unwrap().is_none());
    }

    #[test]
    fn reject_ids_with_path_separators() {
        let (_dir, connections) = connections();
        let db = connections.exclusive().unwrap();
        assert!(db.create_event(event("../e1")).is_err());
        assert!(db.get_event("a/b").is_err());
    }
}
