use eventdesk_boundary::legacy::LegacyEvent;

use super::*;

/// Imports records of the previous storage layout.
///
/// Existing events are replaced. Either all records are
/// imported or none.
pub fn import_legacy_events(
    connections: &jfs::Connections,
    records: Vec<LegacyEvent>,
) -> Result<usize> {
    let entities = records
        .into_iter()
        .map(LegacyEvent::into_entities)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let count = entities.len();
    connections.exclusive()?.transaction(|conn| {
        for (event, draft) in entities {
            let id = event.id.to_string();
            match conn.get_event(&id) {
                Ok(_) => conn.update_event(&event)?,
                Err(RepoError::NotFound) => conn.create_event(event)?,
                Err(err) => return Err(err),
            }
            match draft {
                Some(draft) => conn.save_draft(&draft)?,
                None => {
                    if conn.find_draft(&id)?.is_some() {
                        conn.delete_draft(&id)?;
                    }
                }
            }
        }
        Ok(())
    })?;
    info!("Imported {} legacy event(s)", count);
    Ok(count)
}

/// Exports all events in the previous storage layout.
pub fn export_legacy_events(connections: &jfs::Connections) -> Result<Vec<LegacyEvent>> {
    let db = connections.shared()?;
    let mut events = db.all_events()?;
    events.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    let mut records = Vec::with_capacity(events.len());
    for event in events {
        let draft = if event.has_pending_edit() {
            db.find_draft(event.id.as_str())?
        } else {
            None
        };
        records.push(LegacyEvent::from_entities(event, draft)?);
    }
    Ok(records)
}
