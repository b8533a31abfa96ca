use eventdesk_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;
use crate::in_flight::{Action, InFlightActions};
use usecases::{Approval, ApprovalKind};

fn notify_approval(notify: &dyn NotificationGateway, approval: &Approval) {
    let event = &approval.event;
    match approval.kind {
        ApprovalKind::Event => notify.notify(NotificationEvent::EventApproved { event }),
        ApprovalKind::Edit => notify.notify(NotificationEvent::EditApproved { event }),
    }
}

pub fn approve_event(
    connections: &jfs::Connections,
    in_flight: &InFlightActions,
    notify: &dyn NotificationGateway,
    session: &Session,
    id: &str,
) -> Result<Event> {
    let _action = in_flight.try_begin(session, Action::Approve, Some(id))?;
    let event = connections
        .exclusive()?
        .transaction(|conn| usecases::approve_event(conn, session, id))?;
    notify_approval(
        notify,
        &Approval {
            kind: ApprovalKind::Event,
            event: event.clone(),
        },
    );
    Ok(event)
}

pub fn approve_pending_edit(
    connections: &jfs::Connections,
    in_flight: &InFlightActions,
    notify: &dyn NotificationGateway,
    session: &Session,
    id: &str,
) -> Result<Event> {
    let _action = in_flight.try_begin(session, Action::Approve, Some(id))?;
    let event = connections
        .exclusive()?
        .transaction(|conn| usecases::approve_pending_edit(conn, session, id))?;
    notify_approval(
        notify,
        &Approval {
            kind: ApprovalKind::Edit,
            event: event.clone(),
        },
    );
    Ok(event)
}

/// Approves either the event or its pending edit.
pub fn approve(
    connections: &jfs::Connections,
    in_flight: &InFlightActions,
    notify: &dyn NotificationGateway,
    session: &Session,
    id: &str,
) -> Result<Approval> {
    let _action = in_flight.try_begin(session, Action::Approve, Some(id))?;
    let approval = connections
        .exclusive()?
        .transaction(|conn| usecases::approve(conn, session, id))
        .map_err(|err| {
            warn!("Failed to approve event {}: {}", id, err);
            err
        })?;
    notify_approval(notify, &approval);
    Ok(approval)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn create_event(fixture: &BackendFixture) -> String {
        fixture
            .submit(&organizer(), None, default_new_event())
            .unwrap()
            .event()
            .id
            .to_string()
    }

    #[test]
    fn publish_edit_and_approve_edit() {
        let fixture = BackendFixture::new();
        let id = create_event(&fixture);

        let approval = fixture.approve(&admin(), &id).unwrap();
        assert_eq!(usecases::ApprovalKind::Event, approval.kind);
        assert_eq!(ReviewState::Approved, approval.event.state);

        let mut edit = default_new_event();
        edit.title = "Rust Meetup (moved)".into();
        let outcome = fixture.submit(&organizer(), Some(&id), edit).unwrap();
        assert!(matches!(outcome, usecases::SubmitOutcome::Drafted { .. }));
        let live = fixture.try_get_event(&id).unwrap();
        assert_eq!("Rust Meetup", live.title());
        assert_eq!(ReviewState::PendingEdit, live.state);

        let review = flows::load_review(&fixture.db_connections, &id, &fixture.paths).unwrap();
        assert_eq!("Rust Meetup", review.current.title);
        assert_eq!("Rust Meetup (moved)", review.edited.unwrap().title);

        let approval = fixture.approve(&admin(), &id).unwrap();
        assert_eq!(usecases::ApprovalKind::Edit, approval.kind);
        let live = fixture.try_get_event(&id).unwrap();
        assert_eq!("Rust Meetup (moved)", live.title());
        assert_eq!(ReviewState::Approved, live.state);
        assert_eq!(1, live.edit_count);
        assert!(fixture.try_get_draft(&id).is_none());

        assert!(matches!(
            fixture.approve(&admin(), &id).unwrap_err().parameter(),
            Some(usecases::Error::AlreadyApproved)
        ));
        assert_eq!(
            vec![
                NotificationType::EventSubmitted,
                NotificationType::EventApproved,
                NotificationType::EditSubmitted,
                NotificationType::EditApproved,
            ],
            fixture.sent_notifications()
        );
    }

    #[test]
    fn organizers_cannot_approve() {
        let fixture = BackendFixture::new();
        let id = create_event(&fixture);
        let err = fixture.approve(&organizer(), &id).unwrap_err();
        assert!(matches!(err.parameter(), Some(usecases::Error::Forbidden)));
        assert_eq!(
            ReviewState::New,
            fixture.try_get_event(&id).unwrap().state
        );
    }

    #[test]
    fn approve_pending_edit_of_new_event_fails() {
        let fixture = BackendFixture::new();
        let id = create_event(&fixture);
        let before = fixture.try_get_event(&id).unwrap();
        let err = flows::approve_pending_edit(
            &fixture.db_connections,
            &fixture.in_flight,
            &fixture.notify,
            &admin(),
            &id,
        )
        .unwrap_err();
        assert!(matches!(
            err.parameter(),
            Some(usecases::Error::InvalidReviewState { .. })
        ));
        assert_eq!(before, fixture.try_get_event(&id).unwrap());

        let event = flows::approve_event(
            &fixture.db_connections,
            &fixture.in_flight,
            &fixture.notify,
            &admin(),
            &id,
        )
        .unwrap();
        assert_eq!(ReviewState::Approved, event.state);
    }
}
