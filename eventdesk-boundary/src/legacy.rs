//! Records of the previous storage layout.
//!
//! The review state used to be encoded in two fields:
//!
//! | `isVerifiedByAdmin` | `editEventCount` | state         |
//! |---------------------|------------------|---------------|
//! | `true`              | any              | approved      |
//! | `false`             | `-1`             | pending edit  |
//! | `false`             | `>= 0`           | new           |
//!
//! A pending edit was kept as a JSON string in `customFields` with
//! PascalCase keys that only contained the changed fields. It is
//! re-keyed and overlaid on the live record to obtain the full
//! edited version.

use super::*;
use eventdesk_entities as e;
use serde_json::{Map, Value};
use std::convert::TryFrom;
use thiserror::Error;

/// The `editEventCount` of an event with a pending edit.
pub const PENDING_EDIT_SENTINEL: i64 = -1;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvent {
    pub id                   : String,
    #[serde(default)]
    pub is_verified_by_admin : bool,
    #[serde(default)]
    pub edit_event_count     : i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields        : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by           : Option<String>,
    #[serde(default)]
    pub created_at           : i64,
    #[serde(default)]
    pub updated_at           : i64,
    // All other fields in the canonical camelCase schema
    #[serde(flatten)]
    pub fields               : Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("Invalid edit count {0}")]
    EditCount(i64),
    #[error("Invalid event fields: {0}")]
    Fields(#[source] serde_json::Error),
    #[error("Invalid pending edit: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("The pending edit is not a JSON object")]
    PayloadNotAnObject,
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

pub fn review_state(
    is_verified_by_admin: bool,
    edit_event_count: i64,
) -> Result<e::review::ReviewState, LegacyError> {
    use e::review::ReviewState as S;
    match (is_verified_by_admin, edit_event_count) {
        (true, _) => Ok(S::Approved),
        (false, PENDING_EDIT_SENTINEL) => Ok(S::PendingEdit),
        (false, count) if count >= 0 => Ok(S::New),
        (false, count) => Err(LegacyError::EditCount(count)),
    }
}

/// The legacy flags `(isVerifiedByAdmin, editEventCount)` of a state.
pub fn legacy_flags(state: e::review::ReviewState, edit_count: u32) -> (bool, i64) {
    use e::review::ReviewState as S;
    match state {
        S::Approved => (true, i64::from(edit_count)),
        S::PendingEdit => (false, PENDING_EDIT_SENTINEL),
        S::New => (false, i64::from(edit_count)),
    }
}

fn map_first_char(key: &str, f: impl Fn(char) -> String) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => f(first) + chars.as_str(),
        None => String::new(),
    }
}

/// `EventStart` becomes `eventStart`.
pub fn to_canonical_key(key: &str) -> String {
    map_first_char(key, |c| c.to_lowercase().collect())
}

/// `eventStart` becomes `EventStart`.
pub fn to_legacy_key(key: &str) -> String {
    map_first_char(key, |c| c.to_uppercase().collect())
}

/// Renames all keys of nested objects.
fn rekey(value: Value, rename: &impl Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(rekey_object(map, rename)),
        Value::Array(values) => {
            Value::Array(values.into_iter().map(|v| rekey(v, rename)).collect())
        }
        other => other,
    }
}

fn rekey_object(map: Map<String, Value>, rename: &impl Fn(&str) -> String) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (rename(&key), rekey(value, rename)))
        .collect()
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, LegacyError> {
    match serde_json::to_value(value).map_err(LegacyError::Fields)? {
        Value::Object(map) => Ok(map),
        _ => Err(LegacyError::PayloadNotAnObject),
    }
}

/// Reads the pending edit and overlays it on the live fields.
fn overlay_pending_edit(
    live: &Map<String, Value>,
    payload: &str,
) -> Result<EventDetails, LegacyError> {
    let Value::Object(edited) = serde_json::from_str::<Value>(payload).map_err(LegacyError::Payload)? else {
        return Err(LegacyError::PayloadNotAnObject);
    };
    let mut merged = live.clone();
    merged.extend(rekey_object(edited, &to_canonical_key));
    serde_json::from_value(Value::Object(merged)).map_err(LegacyError::Payload)
}

impl LegacyEvent {
    pub fn state(&self) -> Result<e::review::ReviewState, LegacyError> {
        review_state(self.is_verified_by_admin, self.edit_event_count)
    }

    /// Converts the record into the event and its pending edit.
    ///
    /// The number of accepted edits is not available while an edit
    /// is pending and then starts at 0.
    pub fn into_entities(self) -> Result<(e::event::Event, Option<e::draft::Draft>), LegacyError> {
        let state = self.state()?;
        let LegacyEvent {
            id,
            is_verified_by_admin: _,
            edit_event_count,
            custom_fields,
            created_by,
            created_at,
            updated_at,
            fields,
        } = self;
        let pending_edit = custom_fields
            .as_deref()
            .map(str::trim)
            .filter(|payload| !payload.is_empty())
            .filter(|_| state == e::review::ReviewState::PendingEdit);
        let draft = pending_edit
            .map(|payload| {
                let details = overlay_pending_edit(&fields, payload)?;
                let draft = Draft {
                    event_id: id.clone(),
                    details,
                    submitted_at: updated_at,
                    submitted_by: None,
                };
                e::draft::Draft::try_from(draft).map_err(LegacyError::from)
            })
            .transpose()?;
        let details: EventDetails =
            serde_json::from_value(Value::Object(fields)).map_err(LegacyError::Fields)?;
        let event = Event {
            id,
            details,
            state: state.into(),
            edit_count: u32::try_from(edit_event_count).unwrap_or_default(),
            created_by,
            created_at,
            updated_at,
        };
        Ok((e::event::Event::try_from(event)?, draft))
    }

    pub fn from_entities(
        event: e::event::Event,
        draft: Option<e::draft::Draft>,
    ) -> Result<Self, LegacyError> {
        let (is_verified_by_admin, edit_event_count) = legacy_flags(event.state, event.edit_count);
        let has_pending_edit = event.has_pending_edit();
        let Event {
            id,
            details,
            created_by,
            created_at,
            updated_at,
            ..
        } = Event::from(event);
        let custom_fields = draft
            .filter(|_| has_pending_edit)
            .map(|draft| {
                let edited = to_object(&EventDetails::from(draft.details))?;
                let payload = Value::Object(rekey_object(edited, &to_legacy_key));
                serde_json::to_string(&payload).map_err(LegacyError::Payload)
            })
            .transpose()?;
        Ok(Self {
            id,
            is_verified_by_admin,
            edit_event_count,
            custom_fields,
            created_by,
            created_at,
            updated_at,
            fields: to_object(&details)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e::review::ReviewState as S;

    #[test]
    fn state_from_legacy_flags() {
        assert_eq!(S::Approved, review_state(true, 3).unwrap());
        assert_eq!(S::Approved, review_state(true, -1).unwrap());
        assert_eq!(S::PendingEdit, review_state(false, -1).unwrap());
        assert_eq!(S::New, review_state(false, 0).unwrap());
        assert_eq!(S::New, review_state(false, 2).unwrap());
        assert!(matches!(
            review_state(false, -2),
            Err(LegacyError::EditCount(-2))
        ));
        assert_eq!((true, 3), legacy_flags(S::Approved, 3));
        assert_eq!((false, -1), legacy_flags(S::PendingEdit, 3));
        assert_eq!((false, 0), legacy_flags(S::New, 0));
    }

    #[test]
    fn rekey_first_letter() {
        assert_eq!("eventStart", to_canonical_key("EventStart"));
        assert_eq!("title", to_canonical_key("title"));
        assert_eq!("EventStart", to_legacy_key("eventStart"));
        assert_eq!("", to_canonical_key(""));
    }

    #[test]
    fn pending_edit_is_overlaid_on_live_record() {
        let json = r#"{
            "id": "e1",
            "title": "A",
            "eventStart": 100,
            "organizer": { "name": "Ferris" },
            "isVerifiedByAdmin": false,
            "editEventCount": -1,
            "customFields": "{\"Title\":\"B\",\"EventEnd\":200}"
        }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        let (event, draft) = legacy.into_entities().unwrap();
        assert_eq!("A", event.details.title);
        assert_eq!(S::PendingEdit, event.state);
        assert_eq!(0, event.edit_count);
        let draft = draft.unwrap();
        assert_eq!("B", draft.details.title);
        assert_eq!("Ferris", draft.details.organizer.name);
        assert_eq!(100, draft.details.schedule.start.as_secs());
        assert_eq!(Some(200), draft.details.schedule.end.map(|t| t.as_secs()));
        assert_eq!(None, event.details.schedule.end);
    }

    #[test]
    fn nested_legacy_keys_are_renamed() {
        let json = r#"{
            "id": "e1",
            "title": "A",
            "editEventCount": -1,
            "customFields": "{\"Speakers\":[{\"Name\":\"Alice\",\"Bio\":\"bio1\"}],\"Venue\":{\"Type\":\"online\",\"Link\":\"https://meet.example.org\"}}"
        }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        let (_, draft) = legacy.into_entities().unwrap();
        let details = draft.unwrap().details;
        assert_eq!("Alice", details.speakers[0].name);
        assert_eq!("bio1", details.speakers[0].bio);
        assert_eq!(
            e::event::Venue::Online {
                link: "https://meet.example.org".into()
            },
            details.venue
        );
    }

    #[test]
    fn approved_record_ignores_stale_payload() {
        let json = r#"{
            "id": "e1",
            "title": "A",
            "isVerifiedByAdmin": true,
            "editEventCount": 4,
            "customFields": "{\"Title\":\"B\"}"
        }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        let (event, draft) = legacy.into_entities().unwrap();
        assert_eq!(S::Approved, event.state);
        assert_eq!(4, event.edit_count);
        assert!(draft.is_none());
    }

    #[test]
    fn invalid_payload() {
        let json = r#"{ "id": "e1", "editEventCount": -1, "customFields": "[1,2]" }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            legacy.into_entities(),
            Err(LegacyError::PayloadNotAnObject)
        ));
        let json = r#"{ "id": "e1", "editEventCount": -1, "customFields": "{" }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(legacy.into_entities(), Err(LegacyError::Payload(_))));
    }

    #[test]
    fn export_pending_edit() {
        let json = r#"{
            "id": "e1",
            "title": "A",
            "isVerifiedByAdmin": false,
            "editEventCount": -1,
            "customFields": "{\"Title\":\"B\"}"
        }"#;
        let legacy: LegacyEvent = serde_json::from_str(json).unwrap();
        let (event, draft) = legacy.into_entities().unwrap();
        let exported = LegacyEvent::from_entities(event, draft).unwrap();
        assert!(!exported.is_verified_by_admin);
        assert_eq!(PENDING_EDIT_SENTINEL, exported.edit_event_count);
        assert_eq!(Some(&Value::from("A")), exported.fields.get("title"));
        let payload: Value =
            serde_json::from_str(exported.custom_fields.as_deref().unwrap()).unwrap();
        assert_eq!("B", payload["Title"]);
        assert_eq!("physical", payload["Venue"]["Type"]);

        let (event, draft) = exported.into_entities().unwrap();
        assert_eq!("A", event.details.title);
        assert_eq!("B", draft.unwrap().details.title);
    }
}
