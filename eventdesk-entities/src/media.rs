/// An uploaded media file referenced by a description placeholder.
///
/// The `url` is either a storage path (e.g. `/uploads/events/a.png`)
/// or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
}

impl MediaItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
