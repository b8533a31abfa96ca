pub mod prelude {

    use std::{cell::RefCell, collections::HashMap};

    pub use eventdesk_core::{
        content::{Attachment, MediaPaths},
        entities::*,
        gateways::{
            media::{MediaError, MediaGateway},
            notify::{NotificationEvent, NotificationGateway, NotificationType},
        },
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod jfs {
        pub use super::super::super::jfs::*;
    }

    pub use crate::{error::AppError, prelude as flows, InFlightActions};

    #[derive(Default)]
    pub struct RecordingNotifyGW {
        pub sent: RefCell<Vec<(NotificationType, String)>>,
    }

    impl NotificationGateway for RecordingNotifyGW {
        fn notify(&self, event: NotificationEvent) {
            self.sent
                .borrow_mut()
                .push((event.kind(), event.event().id.to_string()));
        }
    }

    #[derive(Default)]
    pub struct DummyMediaGW {
        pub fail: bool,
        pub stored: RefCell<HashMap<String, usize>>,
        pub removed: RefCell<Vec<MediaItem>>,
    }

    impl MediaGateway for DummyMediaGW {
        fn store_attachment(
            &self,
            event_id: &Id,
            attachment: &Attachment,
        ) -> Result<MediaItem, MediaError> {
            if self.fail {
                return Err(MediaError::TooLarge(attachment.data.len()));
            }
            let mut stored = self.stored.borrow_mut();
            let count = stored.entry(event_id.to_string()).or_default();
            *count += 1;
            Ok(MediaItem::new(format!(
                "uploads/{event_id}/{count}.{}",
                attachment.file_extension()
            )))
        }

        fn remove_media(&self, item: &MediaItem) -> Result<(), MediaError> {
            self.removed.borrow_mut().push(item.clone());
            Ok(())
        }
    }

    pub struct BackendFixture {
        // Keeps the directory alive
        _dir: tempfile::TempDir,
        pub db_connections: jfs::Connections,
        pub in_flight: InFlightActions,
        pub media: DummyMediaGW,
        pub notify: RecordingNotifyGW,
        pub paths: MediaPaths,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let dir = tempfile::tempdir().unwrap();
            let db_connections = jfs::Connections::init(dir.path(), true).unwrap();
            Self {
                _dir: dir,
                db_connections,
                in_flight: InFlightActions::default(),
                media: DummyMediaGW::default(),
                notify: RecordingNotifyGW::default(),
                paths: MediaPaths::try_new("https://events.example.org", "uploads").unwrap(),
            }
        }

        pub fn submit(
            &self,
            session: &Session,
            id: Option<&str>,
            new_event: usecases::NewEvent,
        ) -> Result<usecases::SubmitOutcome, AppError> {
            flows::submit_event(
                &self.db_connections,
                &self.in_flight,
                &self.media,
                &self.notify,
                session,
                id,
                new_event,
            )
        }

        pub fn approve(&self, session: &Session, id: &str) -> Result<usecases::Approval, AppError> {
            flows::approve(
                &self.db_connections,
                &self.in_flight,
                &self.notify,
                session,
                id,
            )
        }

        pub fn store_dir(&self) -> &std::path::Path {
            self._dir.path()
        }

        pub fn try_get_event(&self, id: &str) -> Option<Event> {
            match self.db_connections.shared().unwrap().get_event(id) {
                Ok(event) => Some(event),
                Err(RepoError::NotFound) => None,
                x => x.map(|_| None).unwrap(),
            }
        }

        pub fn try_get_draft(&self, id: &str) -> Option<Draft> {
            self.db_connections
                .shared()
                .unwrap()
                .find_draft(id)
                .unwrap()
        }

        pub fn sent_notifications(&self) -> Vec<NotificationType> {
            self.notify.sent.borrow().iter().map(|(t, _)| *t).collect()
        }
    }

    pub fn organizer() -> Session {
        Session::organizer("ferris@example.org".parse().unwrap())
    }

    pub fn admin() -> Session {
        Session::admin("admin@example.org".parse().unwrap())
    }

    pub fn default_new_event() -> usecases::NewEvent {
        usecases::NewEvent {
            title: "Rust Meetup".into(),
            organizer_name: "Ferris".into(),
            organizer_email: Some("ferris@example.org".into()),
            start: 1_700_000_000,
            end: Some(1_700_007_200),
            description: Some("<p>Welcome</p>".into()),
            ..Default::default()
        }
    }
}
