use std::{
    fs, io,
    path::{Path, PathBuf},
};

use eventdesk_core::{
    content::Attachment,
    entities::{Id, MediaItem},
    gateways::media::{MediaError, MediaGateway},
};

const SUPPORTED_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Stores uploaded media in a local directory.
///
/// Files are written to `<root>/<upload folder>/<event id>/` and
/// referenced by their storage path `/<upload folder>/<event id>/<file>`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    upload_folder: String,
    max_file_size: usize,
}

impl LocalMediaStore {
    pub fn new<P: AsRef<Path>>(root: P, upload_folder: &str, max_file_size: usize) -> Self {
        Self {
            root: root.as_ref().to_owned(),
            upload_folder: upload_folder.trim_matches('/').to_owned(),
            max_file_size,
        }
    }

    /// Resolves a storage path `/<upload folder>/<event id>/<file>`
    /// to the file below the media root.
    fn file_path(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix('/')?;
        let relative = if self.upload_folder.is_empty() {
            relative
        } else {
            relative
                .strip_prefix(self.upload_folder.as_str())?
                .strip_prefix('/')?
        };
        let segments: Vec<_> = relative.split('/').collect();
        if segments.len() != 2
            || segments
                .iter()
                .any(|s| s.is_empty() || *s == "." || *s == ".." || s.contains('\\'))
        {
            return None;
        }
        Some(
            self.root
                .join(&self.upload_folder)
                .join(segments[0])
                .join(segments[1]),
        )
    }
}

impl MediaGateway for LocalMediaStore {
    fn store_attachment(
        &self,
        event_id: &Id,
        attachment: &Attachment,
    ) -> Result<MediaItem, MediaError> {
        let mime_type = attachment.mime_type.to_ascii_lowercase();
        if !SUPPORTED_TYPES.contains(&mime_type.as_str()) {
            return Err(MediaError::UnsupportedType(attachment.mime_type.clone()));
        }
        if attachment.data.len() > self.max_file_size {
            return Err(MediaError::TooLarge(attachment.data.len()));
        }
        // Each upload gets a new name to keep the files of
        // published versions untouched.
        let file_name = format!("{}.{}", Id::new(), attachment.file_extension());
        let dir = self.root.join(&self.upload_folder).join(event_id.as_str());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(&file_name), &attachment.data)?;
        log::debug!(
            "Stored {} bytes of media #{} for event {}",
            attachment.data.len(),
            attachment.ordinal,
            event_id
        );
        let url = if self.upload_folder.is_empty() {
            format!("/{event_id}/{file_name}")
        } else {
            format!("/{}/{event_id}/{file_name}", self.upload_folder)
        };
        Ok(MediaItem::new(url))
    }

    fn remove_media(&self, item: &MediaItem) -> Result<(), MediaError> {
        let path = self
            .file_path(&item.url)
            .ok_or_else(|| MediaError::UnknownLocation(item.url.clone()))?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed media file {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(mime_type: &str, data: &[u8]) -> Attachment {
        Attachment {
            ordinal: 0,
            mime_type: mime_type.into(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn store_png() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "uploads", 1024);
        let id = Id::from("e1");
        let item = store
            .store_attachment(&id, &attachment("image/png", b"png"))
            .unwrap();
        assert!(item.url.starts_with("/uploads/e1/"));
        assert!(item.url.ends_with(".png"));
        let path = dir.path().join(item.url.trim_start_matches('/'));
        assert_eq!(b"png".to_vec(), fs::read(path).unwrap());

        let other = store
            .store_attachment(&id, &attachment("image/png", b"png"))
            .unwrap();
        assert_ne!(item, other);
    }

    #[test]
    fn remove_stored_media() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "uploads", 1024);
        let item = store
            .store_attachment(&Id::from("e1"), &attachment("image/gif", b"gif"))
            .unwrap();
        let path = dir.path().join(item.url.trim_start_matches('/'));
        assert!(path.exists());
        store.remove_media(&item).unwrap();
        assert!(!path.exists());
        // Already removed
        store.remove_media(&item).unwrap();
    }

    #[test]
    fn refuse_to_remove_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "x").unwrap();
        let store = LocalMediaStore::new(dir.path(), "uploads", 1024);
        for url in [
            "/config.toml",
            "/uploads/../config.toml",
            "/uploads/e1/../../config.toml",
            "uploads/e1/a.png",
            "/other/e1/a.png",
            "/uploads/e1",
        ] {
            assert!(
                matches!(
                    store.remove_media(&MediaItem::new(url)),
                    Err(MediaError::UnknownLocation(_))
                ),
                "{url}"
            );
        }
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn reject_unsupported_or_large_media() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "uploads", 2);
        let id = Id::from("e1");
        assert!(matches!(
            store.store_attachment(&id, &attachment("image/x-icon", b"i")),
            Err(MediaError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.store_attachment(&id, &attachment("image/png", b"png")),
            Err(MediaError::TooLarge(3))
        ));
    }
}
