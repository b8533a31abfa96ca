use std::cell::RefCell;

use eventdesk_core::{
    content::Attachment,
    gateways::{
        media::{discard_media, MediaError, MediaGateway},
        notify::{NotificationEvent, NotificationGateway},
    },
};

use super::*;
use crate::in_flight::{Action, InFlightActions};
use usecases::{NewEvent, NewEventMode, SubmitOutcome};

/// Creates a new event or submits an edit of an existing event.
pub fn submit_event(
    connections: &jfs::Connections,
    in_flight: &InFlightActions,
    media: &dyn MediaGateway,
    notify: &dyn NotificationGateway,
    session: &Session,
    event_id: Option<&str>,
    new_event: NewEvent,
) -> Result<SubmitOutcome> {
    let _action = in_flight.try_begin(session, Action::Submit, event_id)?;
    let mode = match event_id {
        Some(id) => NewEventMode::Update(id),
        None => NewEventMode::Create,
    };
    let uploads = TrackUploads::new(media);
    let mut connection = connections.exclusive()?;
    let outcome = connection
        .transaction(|conn| {
            let storable = usecases::import_event(conn, session, new_event, mode)?;
            debug!("Storing submission as {:?}", storable.plan());
            usecases::store_event(conn, &uploads, storable)
        })
        .map_err(|err| {
            warn!("Failed to store submitted event: {}", err);
            discard_media(media, &uploads.into_inner());
            err
        })?;
    drop(connection);

    match &outcome {
        SubmitOutcome::Created(event) | SubmitOutcome::Updated(event) => {
            notify.notify(NotificationEvent::EventSubmitted { event });
        }
        SubmitOutcome::Drafted { event, draft } => {
            notify.notify(NotificationEvent::EditSubmitted { event, draft });
        }
    }
    Ok(outcome)
}

/// Remembers the uploads of a submission until the
/// transaction is either committed or rolled back.
struct TrackUploads<'a> {
    media: &'a dyn MediaGateway,
    stored: RefCell<Vec<MediaItem>>,
}

impl<'a> TrackUploads<'a> {
    fn new(media: &'a dyn MediaGateway) -> Self {
        Self {
            media,
            stored: RefCell::default(),
        }
    }

    fn into_inner(self) -> Vec<MediaItem> {
        self.stored.into_inner()
    }
}

impl MediaGateway for TrackUploads<'_> {
    fn store_attachment(
        &self,
        event_id: &Id,
        attachment: &Attachment,
    ) -> std::result::Result<MediaItem, MediaError> {
        let item = self.media.store_attachment(event_id, attachment)?;
        self.stored.borrow_mut().push(item.clone());
        Ok(item)
    }

    fn remove_media(&self, item: &MediaItem) -> std::result::Result<(), MediaError> {
        self.media.remove_media(item)?;
        self.stored.borrow_mut().retain(|stored| stored != item);
        Ok(())
    }
}
