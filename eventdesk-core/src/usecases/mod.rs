mod approve_event;
mod error;
mod get_event;
mod review_event;
mod submit_event;

#[cfg(test)]
pub mod tests;

pub use self::{
    approve_event::*, error::Error, get_event::*, review_event::*, submit_event::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}

use self::prelude::*;

fn authorize_admin(session: &Session) -> Result<()> {
    if !session.is_admin() {
        log::warn!("{} is not allowed to review events", session.email);
        return Err(Error::Forbidden);
    }
    Ok(())
}

/// Only the creator, the organizer or an admin may edit an event.
fn authorize_editing(session: &Session, event: &Event) -> Result<()> {
    if session.is_admin() {
        return Ok(());
    }
    let is_owner = event
        .created_by
        .iter()
        .chain(event.details.organizer.email.iter())
        .any(|owner| owner.is_same_mailbox(&session.email));
    if !is_owner {
        log::warn!("{} is not allowed to edit event {}", session.email, event.id);
        return Err(Error::Forbidden);
    }
    Ok(())
}
