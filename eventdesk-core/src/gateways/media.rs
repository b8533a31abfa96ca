use thiserror::Error;

use crate::{
    content::Attachment,
    entities::{Id, MediaItem},
};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media type '{0}' is not supported")]
    UnsupportedType(String),
    #[error("The media file is too large ({0} bytes)")]
    TooLarge(usize),
    #[error("'{0}' does not refer to a stored media file")]
    UnknownLocation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Storage of uploaded media files.
pub trait MediaGateway {
    /// Stores the attachment and returns a reference to it.
    fn store_attachment(
        &self,
        event_id: &Id,
        attachment: &Attachment,
    ) -> Result<MediaItem, MediaError>;

    /// Removes a previously stored file. Missing files are ignored.
    fn remove_media(&self, item: &MediaItem) -> Result<(), MediaError>;
}

/// Removes uploads that no stored record refers to.
pub fn discard_media<M>(media: &M, items: &[MediaItem])
where
    M: MediaGateway + ?Sized,
{
    for item in items {
        match media.remove_media(item) {
            Ok(()) => log::debug!("Discarded unused media {}", item.url),
            Err(err) => log::warn!("Failed to discard unused media {}: {err}", item.url),
        }
    }
}
