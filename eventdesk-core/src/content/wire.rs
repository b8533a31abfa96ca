use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{placeholder, Attachment, ContentError, PLACEHOLDER_REGEX};
use crate::entities::MediaItem;

lazy_static! {
    static ref INLINE_DATA_REGEX: Regex = Regex::new(
        r#"data:(?P<mime>image/[A-Za-z0-9.+-]+)(?:;[^;,"'\s]+)*;base64,(?P<data>[A-Za-z0-9+/]+=*)"#
    )
    .unwrap();
}

/// A description in wire form together with the extracted media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireContent {
    pub markup: String,
    /// Ordered by ordinal, i.e. by document order.
    pub attachments: Vec<Attachment>,
}

/// Replaces all inline image data by placeholder tokens.
///
/// The n-th inline image (counted from left to right) becomes the
/// attachment with ordinal n and is replaced by `__MEDIA_<n>__`
/// at exactly the same location.
pub fn to_wire_form(markup: &str) -> Result<WireContent, ContentError> {
    let mut attachments = Vec::new();
    let mut wire = String::with_capacity(markup.len());
    let mut tail = 0;
    for caps in INLINE_DATA_REGEX.captures_iter(markup) {
        let Some(inline) = caps.get(0) else {
            continue;
        };
        let ordinal = attachments.len();
        let data = STANDARD
            .decode(&caps["data"])
            .map_err(|_| ContentError::InlineData { ordinal })?;
        wire.push_str(&markup[tail..inline.start()]);
        wire.push_str(&placeholder(ordinal));
        tail = inline.end();
        attachments.push(Attachment {
            ordinal,
            mime_type: caps["mime"].to_owned(),
            data,
        });
    }
    if attachments.is_empty() {
        return Ok(WireContent {
            markup: markup.to_owned(),
            attachments,
        });
    }
    wire.push_str(&markup[tail..]);
    log::debug!(
        "Extracted {} inline media attachment(s) from description",
        attachments.len()
    );
    Ok(WireContent {
        markup: wire,
        attachments,
    })
}

/// Embeds attachments at their placeholders again.
///
/// Placeholders without a matching attachment are kept.
pub fn inline_attachments(markup: &str, attachments: &[Attachment]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(markup, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|ordinal| attachments.iter().find(|a| a.ordinal == ordinal))
                .map(|a| format!("data:{};base64,{}", a.mime_type, STANDARD.encode(&a.data)))
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

/// Replaces placeholders by the stored references of the media items.
///
/// Used to turn a stored description back into authoring form.
/// Placeholders without a corresponding media item are kept.
pub fn expand_placeholders(markup: &str, media: &[MediaItem]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(markup, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|ordinal| media.get(ordinal))
                .map(|item| item.url.clone())
                .unwrap_or_else(|| {
                    log::warn!("Media placeholder {} cannot be expanded", &caps[0]);
                    caps[0].to_owned()
                })
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_uri(mime: &str, data: &[u8]) -> String {
        format!("data:{mime};base64,{}", STANDARD.encode(data))
    }

    #[test]
    fn markup_without_inline_data_is_unchanged() {
        let markup = r#"<p>Hello <b>world</b></p><img src="/uploads/a.png">"#;
        let wire = to_wire_form(markup).unwrap();
        assert_eq!(markup, wire.markup);
        assert!(wire.attachments.is_empty());
        // idempotent
        assert_eq!(wire, to_wire_form(&wire.markup).unwrap());
    }

    #[test]
    fn empty_markup() {
        let wire = to_wire_form("").unwrap();
        assert_eq!("", wire.markup);
        assert!(wire.attachments.is_empty());
    }

    #[test]
    fn extract_single_inline_image() {
        let png = [0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        let markup = format!(r#"<p>a</p><img src="{}" alt="x"><p>b</p>"#, data_uri("image/png", &png));
        let wire = to_wire_form(&markup).unwrap();
        assert_eq!(r#"<p>a</p><img src="__MEDIA_0__" alt="x"><p>b</p>"#, wire.markup);
        assert_eq!(1, wire.attachments.len());
        assert_eq!(0, wire.attachments[0].ordinal);
        assert_eq!("image/png", wire.attachments[0].mime_type);
        assert_eq!(png.to_vec(), wire.attachments[0].data);
    }

    #[test]
    fn media_type_parameters_are_skipped() {
        let markup = r#"<img src="data:image/png;name=map.png;charset=binary;base64,iVBORw0KGgo=">"#;
        let wire = to_wire_form(markup).unwrap();
        assert_eq!(r#"<img src="__MEDIA_0__">"#, wire.markup);
        assert_eq!("image/png", wire.attachments[0].mime_type);
        assert_eq!(b"\x89PNG\r\n\x1a\n".to_vec(), wire.attachments[0].data);
    }

    #[test]
    fn ordinals_follow_document_order() {
        let images: Vec<Vec<u8>> = (0u8..4).map(|i| vec![i; (i as usize + 1) * 3]).collect();
        let markup = format!(
            r#"<h1>t</h1><img src="{}"><p>one</p><p><img src='{}'> two <img src="{}"></p>text<img src="{}">"#,
            data_uri("image/png", &images[0]),
            data_uri("image/jpeg", &images[1]),
            data_uri("image/gif", &images[2]),
            data_uri("image/webp", &images[3]),
        );
        let wire = to_wire_form(&markup).unwrap();
        assert_eq!(
            r#"<h1>t</h1><img src="__MEDIA_0__"><p>one</p><p><img src='__MEDIA_1__'> two <img src="__MEDIA_2__"></p>text<img src="__MEDIA_3__">"#,
            wire.markup
        );
        let mime_types: Vec<_> = wire.attachments.iter().map(|a| a.mime_type.as_str()).collect();
        assert_eq!(vec!["image/png", "image/jpeg", "image/gif", "image/webp"], mime_types);
        for (i, attachment) in wire.attachments.iter().enumerate() {
            assert_eq!(i, attachment.ordinal);
            assert_eq!(images[i], attachment.data);
        }
        assert_eq!(vec![0, 1, 2, 3], super::super::placeholder_ordinals(&wire.markup));
    }

    #[test]
    fn round_trip_restores_markup() {
        for n in [0usize, 1, 5] {
            let mut markup = String::from("<p>intro</p>");
            for i in 0..n {
                let bytes: Vec<u8> = (0..=255u8).cycle().skip(i * 7).take(100 + i).collect();
                markup.push_str(&format!(r#"<img src="{}"><p>after {i}</p>"#, data_uri("image/png", &bytes)));
            }
            let wire = to_wire_form(&markup).unwrap();
            assert_eq!(n, wire.attachments.len());
            assert_eq!(markup, inline_attachments(&wire.markup, &wire.attachments));
        }
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let markup = format!(
            r#"<img src="{}"><img src="data:image/png;base64,A">"#,
            data_uri("image/png", b"ok")
        );
        assert_eq!(
            ContentError::InlineData { ordinal: 1 },
            to_wire_form(&markup).unwrap_err()
        );
    }

    #[test]
    fn non_image_data_is_ignored() {
        let markup = r#"<a href="data:text/plain;base64,aGVsbG8=">x</a>"#;
        let wire = to_wire_form(markup).unwrap();
        assert_eq!(markup, wire.markup);
        assert!(wire.attachments.is_empty());
    }

    #[test]
    fn expand_placeholders_to_stored_paths() {
        let media = vec![MediaItem::new("/uploads/e/0.png")];
        assert_eq!(
            r#"<img src="/uploads/e/0.png"><img src="__MEDIA_1__">"#,
            expand_placeholders(r#"<img src="__MEDIA_0__"><img src="__MEDIA_1__">"#, &media)
        );
    }

    #[test]
    fn unknown_placeholders_are_kept_when_inlining() {
        let a = Attachment {
            ordinal: 0,
            mime_type: "image/png".into(),
            data: b"abc".to_vec(),
        };
        let markup = r#"<img src="__MEDIA_0__"><img src="__MEDIA_1__">"#;
        assert_eq!(
            r#"<img src="data:image/png;base64,YWJj"><img src="__MEDIA_1__">"#,
            inline_attachments(markup, &[a])
        );
    }
}
