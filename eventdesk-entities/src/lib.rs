#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # eventdesk-entities
//!
//! Reusable, agnostic domain entities for eventdesk.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod draft;
pub mod email;
pub mod event;
pub mod faq;
pub mod id;
pub mod media;
pub mod occurrence;
pub mod review;
pub mod session;
pub mod speaker;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
