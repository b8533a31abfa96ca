//! Rich-text content codec.
//!
//! Event descriptions exist in three forms:
//!
//! - *authoring form*: markup with inline `data:image/...;base64,...`
//!   URIs and/or references to already uploaded files
//! - *wire form*: inline data replaced by `__MEDIA_<n>__` placeholders,
//!   the decoded bytes are shipped as separate [`Attachment`]s
//! - *display form*: every media reference rewritten to an absolute URL
//!
//! Unresolvable placeholders and unknown path layouts are not errors,
//! the markup is passed through on a best-effort basis.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

mod display;
mod wire;

pub use self::{display::*, wire::*};

/// Displayed instead of an empty or missing description.
pub const EMPTY_DESCRIPTION_HTML: &str = "<p>No description provided.</p>";

const PLACEHOLDER_PREFIX: &str = "__MEDIA_";
const PLACEHOLDER_SUFFIX: &str = "__";

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"__MEDIA_(\d+)__").unwrap();
}

/// The placeholder token for the given ordinal.
pub fn placeholder(ordinal: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{ordinal}{PLACEHOLDER_SUFFIX}")
}

/// Parses a string that consists of exactly one placeholder token.
pub fn parse_placeholder(token: &str) -> Option<usize> {
    token
        .strip_prefix(PLACEHOLDER_PREFIX)?
        .strip_suffix(PLACEHOLDER_SUFFIX)?
        .parse()
        .ok()
}

/// Ordinals of all placeholders in document order.
pub fn placeholder_ordinals(markup: &str) -> Vec<usize> {
    PLACEHOLDER_REGEX
        .captures_iter(markup)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Binary media extracted from the authoring form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub ordinal: usize,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn file_extension(&self) -> &str {
        let subtype = self
            .mime_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or_default();
        match subtype {
            "jpeg" | "pjpeg" => "jpg",
            "svg+xml" => "svg",
            "" => "bin",
            other => other,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Invalid inline media data at position {ordinal}")]
    InlineData { ordinal: usize },
    #[error("The media base URL must be an absolute http(s) URL")]
    BaseUrl,
}
