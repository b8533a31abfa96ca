use eventdesk_core::{
    entities::{EmailAddress, Event},
    gateways::notify::NotificationEvent,
};

/// A plain text notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// Delivers messages to their recipients.
pub trait MessageSink {
    fn deliver(&self, recipients: &[EmailAddress], message: &Message);
}

fn event_summary(event: &Event) -> String {
    let details = &event.details;
    let mut summary = format!(
        "{}\n\nStart: {}\nLocation: {}\nOrganizer: {}",
        details.title,
        details.schedule.start,
        details.venue.display_location(),
        details.organizer.name
    );
    if let Some(end) = details.schedule.end {
        summary.push_str(&format!("\nEnd: {end}"));
    }
    summary
}

pub fn compose(event: &NotificationEvent) -> Message {
    use NotificationEvent as E;
    match event {
        E::EventSubmitted { event } => Message {
            subject: format!("New event awaiting review: {}", event.title()),
            body: format!(
                "A new event has been submitted (id {}).\n\n{}",
                event.id,
                event_summary(event)
            ),
        },
        E::EditSubmitted { event, draft } => Message {
            subject: format!("Edit awaiting review: {}", event.title()),
            body: format!(
                "An edit of the published event {} has been submitted.\n\nCurrent title: {}\nEdited title: {}",
                event.id,
                event.title(),
                draft.details.title
            ),
        },
        E::EventApproved { event } => Message {
            subject: format!("Your event has been published: {}", event.title()),
            body: format!("Your event has been approved.\n\n{}", event_summary(event)),
        },
        E::EditApproved { event } => Message {
            subject: format!("Your changes have been published: {}", event.title()),
            body: format!(
                "The changes of your event have been approved.\n\n{}",
                event_summary(event)
            ),
        },
    }
}
