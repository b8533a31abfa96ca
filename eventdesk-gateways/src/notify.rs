use std::{collections::HashSet, sync::Arc};

use eventdesk_core::{
    entities::EmailAddress,
    gateways::notify::{NotificationEvent, NotificationGateway, NotificationType},
};

use crate::message::{compose, MessageSink};

#[derive(Clone)]
pub struct Notify {
    sink: Arc<dyn MessageSink + Send + Sync + 'static>,
    notify_on: HashSet<NotificationType>,
    reviewers: Vec<EmailAddress>,
}

impl Notify {
    pub fn new<S>(sink: S, notify_on: HashSet<NotificationType>, reviewers: Vec<EmailAddress>) -> Self
    where
        S: MessageSink + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
            notify_on,
            reviewers,
        }
    }

    fn skip(&self, ev: &NotificationEvent) -> bool {
        !self.notify_on.contains(&ev.kind())
    }

    fn recipients(&self, ev: &NotificationEvent) -> Vec<EmailAddress> {
        if !ev.is_approval() {
            return self.reviewers.clone();
        }
        let event = ev.event();
        let mut recipients: Vec<_> = event
            .details
            .organizer
            .email
            .iter()
            .chain(event.created_by.iter())
            .cloned()
            .collect();
        recipients.sort_by_key(|email| email.as_str().to_ascii_lowercase());
        recipients.dedup_by(|a, b| a.is_same_mailbox(b));
        recipients
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, event: NotificationEvent) {
        if self.skip(&event) {
            return;
        }
        let recipients = self.recipients(&event);
        if recipients.is_empty() {
            log::debug!(
                "No recipients for '{}' of event {}",
                event.kind(),
                event.event().id
            );
            return;
        }
        log::info!(
            "Sending '{}' of event {} to {} recipient(s)",
            event.kind(),
            event.event().id,
            recipients.len()
        );
        self.sink.deliver(&recipients, &compose(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use eventdesk_core::entities::Event;
    use eventdesk_entities::builders::*;
    use std::sync::Mutex;

    #[derive(Default, Clone)]
    struct Recorder(Arc<Mutex<Vec<(Vec<String>, String)>>>);

    impl MessageSink for Recorder {
        fn deliver(&self, recipients: &[EmailAddress], message: &Message) {
            let to = recipients.iter().map(|r| r.as_str().to_owned()).collect();
            self.0.lock().unwrap().push((to, message.subject.clone()));
        }
    }

    fn all_types() -> HashSet<NotificationType> {
        [
            NotificationType::EventSubmitted,
            NotificationType::EditSubmitted,
            NotificationType::EventApproved,
            NotificationType::EditApproved,
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn approvals_are_sent_to_the_organizer() {
        let recorder = Recorder::default();
        let notify = Notify::new(
            recorder.clone(),
            all_types(),
            vec!["admin@example.org".parse().unwrap()],
        );
        let mut event = Event::build()
            .title("A")
            .organizer("Ferris", "ferris@example.org")
            .finish();
        event.created_by = Some("ferris@example.org".parse().unwrap());
        notify.notify(NotificationEvent::EventApproved { event: &event });
        notify.notify(NotificationEvent::EventSubmitted { event: &event });
        let sent = recorder.0.lock().unwrap();
        assert_eq!(2, sent.len());
        assert_eq!(vec!["ferris@example.org".to_string()], sent[0].0);
        assert_eq!(vec!["admin@example.org".to_string()], sent[1].0);
    }

    #[test]
    fn skip_disabled_notifications() {
        let recorder = Recorder::default();
        let notify = Notify::new(
            recorder.clone(),
            HashSet::new(),
            vec!["admin@example.org".parse().unwrap()],
        );
        let event = Event::build().finish();
        notify.notify(NotificationEvent::EventSubmitted { event: &event });
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
