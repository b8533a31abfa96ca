use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{parse_placeholder, ContentError, EMPTY_DESCRIPTION_HTML, PLACEHOLDER_REGEX};
use crate::entities::MediaItem;

/// Path prefixes of the old storage layout that must not
/// be part of public media URLs.
const LEGACY_STORAGE_ROOTS: &[&str] = &["storage/", "public/"];

pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

lazy_static! {
    static ref MEDIA_TAG_REGEX: Regex =
        Regex::new(r"(?i)<(?:img|video|source|audio)\b[^>]*>").unwrap();
    static ref MEDIA_ATTR_REGEX: Regex =
        Regex::new(r#"(?i)(?P<attr>\s(?:src|poster)\s*=\s*)(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
            .unwrap();
}

/// Where uploaded media are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPaths {
    base_url: String,
    upload_folder: String,
}

impl MediaPaths {
    pub fn try_new(base_url: &str, upload_folder: &str) -> Result<Self, ContentError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let lower = base_url.to_ascii_lowercase();
        let has_host = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .is_some_and(|host| !host.is_empty());
        if !has_host {
            return Err(ContentError::BaseUrl);
        }
        Ok(Self {
            base_url: base_url.to_owned(),
            upload_folder: upload_folder.trim().trim_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_folder(&self) -> &str {
        &self.upload_folder
    }
}

fn is_absolute_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://", "//", "data:", "blob:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Normalizes a storage path of an uploaded file.
///
/// The rules are applied in this order:
///
/// 1. strip a legacy storage root prefix
/// 2. ensure a single leading `/`
/// 3. insert the upload folder if missing
pub fn normalize_media_path(path: &str, paths: &MediaPaths) -> String {
    let relative = path.trim().trim_start_matches('/');
    let relative = LEGACY_STORAGE_ROOTS
        .iter()
        .find_map(|root| relative.strip_prefix(root))
        .unwrap_or(relative);
    let normalized = format!("/{}", relative.trim_start_matches('/'));
    if paths.upload_folder.is_empty() {
        return normalized;
    }
    let folder = format!("/{}", paths.upload_folder);
    if normalized == folder || normalized.starts_with(&format!("{folder}/")) {
        normalized
    } else {
        format!("{folder}{normalized}")
    }
}

/// The absolute URL of a media reference.
///
/// Absolute URLs, inline data and placeholders are returned unchanged.
pub fn media_url(path: &str, paths: &MediaPaths) -> String {
    let path = path.trim();
    if path.is_empty() || is_absolute_url(path) || parse_placeholder(path).is_some() {
        return path.to_owned();
    }
    format!("{}{}", paths.base_url, normalize_media_path(path, paths))
}

/// Replaces placeholder tokens by the URL of the media item
/// with the same ordinal.
///
/// Placeholders without a corresponding media item remain unresolved.
pub fn resolve_placeholders(markup: &str, paths: &MediaPaths, media: &[MediaItem]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(markup, |caps: &Captures| {
            let resolved = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|ordinal| media.get(ordinal))
                .map(|item| media_url(&item.url, paths));
            resolved.unwrap_or_else(|| {
                log::debug!("Unresolved media placeholder {}", &caps[0]);
                caps[0].to_owned()
            })
        })
        .into_owned()
}

/// Rewrites relative and legacy media paths of `img`, `video`,
/// `source` and `audio` elements into absolute URLs.
pub fn rewrite_media_paths(markup: &str, paths: &MediaPaths) -> String {
    MEDIA_TAG_REGEX
        .replace_all(markup, |tag: &Captures| {
            MEDIA_ATTR_REGEX
                .replace_all(&tag[0], |attr: &Captures| {
                    let (value, quote) = match (attr.name("dq"), attr.name("sq")) {
                        (Some(dq), _) => (dq.as_str(), '"'),
                        (None, Some(sq)) => (sq.as_str(), '\''),
                        (None, None) => ("", '"'),
                    };
                    format!("{}{quote}{}{quote}", &attr["attr"], media_url(value, paths))
                })
                .into_owned()
        })
        .into_owned()
}

/// Converts a description from wire form into display form.
pub fn to_display_form(markup: &str, paths: &MediaPaths, media: &[MediaItem]) -> String {
    if markup.trim().is_empty() {
        return EMPTY_DESCRIPTION_HTML.to_owned();
    }
    let resolved = resolve_placeholders(markup, paths, media);
    rewrite_media_paths(&resolved, paths)
}
