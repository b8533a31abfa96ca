use super::prelude::*;

pub fn get_event<R: EventRepo>(repo: &R, id: &str) -> Result<Event> {
    Ok(repo.get_event(id)?)
}

/// The event together with its pending edit, if any.
pub fn get_event_with_draft<R>(repo: &R, id: &str) -> Result<(Event, Option<Draft>)>
where
    R: EventRepo + DraftRepo,
{
    let event = repo.get_event(id)?;
    let draft = if event.has_pending_edit() {
        repo.find_draft(id)?
    } else {
        None
    };
    Ok((event, draft))
}

/// All events that await a decision of an administrator,
/// oldest changes first.
pub fn pending_reviews<R: EventRepo>(repo: &R) -> Result<Vec<Event>> {
    let mut events: Vec<_> = repo
        .all_events()?
        .into_iter()
        .filter(|e| e.state != ReviewState::Approved)
        .collect();
    events.sort_by_key(|e| e.updated_at);
    Ok(events)
}
