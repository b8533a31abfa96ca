//! # eventdesk-core
//!
//! Business logic of eventdesk: the rich-text content codec, the
//! normalization of list-valued event details and the review workflow
//! of events and their pending edits.

pub mod content;
pub mod gateways;
pub mod normalize;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use eventdesk_entities::{
        draft::*, email::*, event::*, faq::*, id::*, media::*, occurrence::*, review::*,
        session::*, speaker::*, time::*,
    };
}

pub use self::repositories::Error as RepoError;
