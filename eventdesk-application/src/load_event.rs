use super::*;
use eventdesk_core::content::MediaPaths;
use usecases::ReviewPresentation;

pub fn load_event(connections: &jfs::Connections, id: &str) -> Result<(Event, Option<Draft>)> {
    let db = connections.shared()?;
    Ok(usecases::get_event_with_draft(&db, id)?)
}

pub fn load_review(
    connections: &jfs::Connections,
    id: &str,
    paths: &MediaPaths,
) -> Result<ReviewPresentation> {
    let db = connections.shared()?;
    Ok(usecases::load_review(&db, id, paths)?)
}

pub fn pending_reviews(connections: &jfs::Connections) -> Result<Vec<Event>> {
    let db = connections.shared()?;
    Ok(usecases::pending_reviews(&db)?)
}
