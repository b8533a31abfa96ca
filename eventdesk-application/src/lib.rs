#[macro_use]
extern crate log;

mod approve_event;
mod import_legacy;
mod in_flight;
mod load_event;
mod submit_event;

pub mod prelude {
    pub use super::{approve_event::*, import_legacy::*, load_event::*, submit_event::*};
}

pub mod error;

pub use in_flight::{Action, InFlightActions, InFlightGuard};

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use eventdesk_core::{entities::*, repositories::*, usecases, RepoError};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod jfs {
    pub use eventdesk_db_jfs::Connections;
}
