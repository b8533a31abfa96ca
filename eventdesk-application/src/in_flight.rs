use parking_lot::Mutex;
use std::collections::HashSet;

use crate::{error::AppError, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Submit,
    Approve,
}

type ActionKey = (String, Action, Option<String>);

/// Mutations that are currently executed.
///
/// The same user may not run the same action on the same
/// event twice at a time.
#[derive(Debug, Default)]
pub struct InFlightActions {
    active: Mutex<HashSet<ActionKey>>,
}

impl InFlightActions {
    pub fn try_begin(
        &self,
        session: &Session,
        action: Action,
        event_id: Option<&str>,
    ) -> Result<InFlightGuard<'_>, AppError> {
        let key = (
            session.email.as_str().to_owned(),
            action,
            event_id.map(ToOwned::to_owned),
        );
        if !self.active.lock().insert(key.clone()) {
            warn!(
                "Rejecting {:?} of {} for {}: already in progress",
                action,
                event_id.unwrap_or("new event"),
                session.email
            );
            return Err(AppError::ActionInProgress);
        }
        Ok(InFlightGuard {
            registry: self,
            key,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }
}

/// Marks an action as finished when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightActions,
    key: ActionKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.active.lock().remove(&self.key);
    }
}
