use super::{authorize_admin, prelude::*};

/// The transition that has been applied by [`approve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalKind {
    Event,
    Edit,
}

#[derive(Debug, Clone)]
pub struct Approval {
    pub kind: ApprovalKind,
    pub event: Event,
}

fn expect_state(event: &Event, expected: ReviewState) -> Result<()> {
    if event.state != expected {
        log::warn!(
            "Cannot review event {} in state '{}' (expected '{}')",
            event.id,
            event.state,
            expected
        );
        return Err(Error::InvalidReviewState {
            expected,
            actual: event.state,
        });
    }
    Ok(())
}

/// Publishes an event that has never been approved.
pub fn approve_event<R>(repo: &R, session: &Session, id: &str) -> Result<Event>
where
    R: EventRepo,
{
    authorize_admin(session)?;
    let mut event = repo.get_event(id)?;
    expect_state(&event, ReviewState::New)?;
    event.state = ReviewState::Approved;
    event.updated_at = Timestamp::now();
    repo.update_event(&event)?;
    log::info!("Event {} has been approved by {}", event.id, session.email);
    Ok(event)
}

/// Replaces the published details by the pending edit.
pub fn approve_pending_edit<R>(repo: &R, session: &Session, id: &str) -> Result<Event>
where
    R: EventRepo + DraftRepo,
{
    authorize_admin(session)?;
    let mut event = repo.get_event(id)?;
    expect_state(&event, ReviewState::PendingEdit)?;
    let draft = repo.find_draft(id)?.ok_or_else(|| {
        log::error!("Event {} is awaiting review but has no draft", id);
        Error::MissingDraft
    })?;
    event.details = draft.details;
    event.state = ReviewState::Approved;
    event.edit_count = event.edit_count.saturating_add(1);
    event.updated_at = Timestamp::now();
    repo.update_event(&event)?;
    repo.delete_draft(id)?;
    log::info!(
        "Edit #{} of event {} has been approved by {}",
        event.edit_count,
        event.id,
        session.email
    );
    Ok(event)
}

/// Applies the approval that matches the current state of the event.
pub fn approve<R>(repo: &R, session: &Session, id: &str) -> Result<Approval>
where
    R: EventRepo + DraftRepo,
{
    authorize_admin(session)?;
    let state = repo.get_event(id)?.state;
    match state {
        ReviewState::New => Ok(Approval {
            kind: ApprovalKind::Event,
            event: approve_event(repo, session, id)?,
        }),
        ReviewState::PendingEdit => Ok(Approval {
            kind: ApprovalKind::Edit,
            event: approve_pending_edit(repo, session, id)?,
        }),
        ReviewState::Approved => Err(Error::AlreadyApproved),
    }
}
