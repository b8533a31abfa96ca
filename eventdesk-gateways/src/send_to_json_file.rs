use eventdesk_core::entities::{EmailAddress, Timestamp};
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{io, path::Path};

use crate::message::{Message, MessageSink};

/// Records all messages as JSON files instead of sending them.
pub struct SendToJsonFile {
    json_store: Store,
}

impl SendToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl JsonMessage {
    fn new(to: &EmailAddress, message: &Message) -> Self {
        Self {
            to: to.as_str().to_owned(),
            subject: message.subject.clone(),
            body: message.body.clone(),
        }
    }
}

impl MessageSink for SendToJsonFile {
    fn deliver(&self, recipients: &[EmailAddress], message: &Message) {
        for (i, to) in recipients.iter().enumerate() {
            let now = Timestamp::now().as_secs();
            let key = format!("{now}-{i}-{}", to.as_str().replace(['/', '\\'], "_"));
            let json = JsonMessage::new(to, message);
            if let Err(err) = self.json_store.save_with_id(&json, &key) {
                log::warn!("Unable to save message in JSON file: {err}");
            }
        }
    }
}
