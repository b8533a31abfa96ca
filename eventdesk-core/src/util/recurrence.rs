use std::time::Duration;

use time::{Date, Month};

use crate::entities::{EventDetails, Occurrence, Recurrence, Timestamp};

/// Upper limit of derived occurrences per event.
pub const MAX_OCCURRENCES: usize = 366;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Same day of month `months` months later, clamped to the length of the month.
fn add_months(ts: Timestamp, months: usize) -> Option<Timestamp> {
    let dt = ts.to_date_time()?;
    let month_index = u8::from(dt.month()) as usize - 1 + months;
    let year = dt.year().checked_add(i32::try_from(month_index / 12).ok()?)?;
    let month = Month::try_from((month_index % 12) as u8 + 1).ok()?;
    let day = dt.day().min(month.length(year));
    let date = Date::from_calendar_date(year, month, day).ok()?;
    Some(dt.replace_date(date).into())
}

fn repeat(
    first: Occurrence,
    until: Timestamp,
    nth_start: impl Fn(usize) -> Option<Timestamp>,
) -> Vec<Occurrence> {
    let length = first.end.as_secs().saturating_sub(first.start.as_secs());
    let mut occurrences = Vec::new();
    for n in 0..=MAX_OCCURRENCES {
        let Some(start) = nth_start(n) else {
            break;
        };
        if start > until {
            break;
        }
        if n == MAX_OCCURRENCES {
            log::warn!("Recurrence truncated after {MAX_OCCURRENCES} occurrences");
            break;
        }
        occurrences.push(Occurrence {
            start,
            end: Timestamp::from_secs(start.as_secs().saturating_add(length)),
            location: first.location.clone(),
        });
    }
    occurrences
}

/// Derives the occurrences of an event from its schedule,
/// recurrence and venue.
pub fn derive_occurrences(details: &EventDetails) -> Vec<Occurrence> {
    let location = details.venue.display_location();
    let first = Occurrence {
        start: details.schedule.start,
        end: details.schedule.end_or_start(),
        location: location.clone(),
    };
    let start = first.start;
    match &details.recurrence {
        Recurrence::Once => vec![first],
        Recurrence::Daily { until } => repeat(first, *until, |n| Some(start + DAY * n as u32)),
        Recurrence::Weekly { until } => repeat(first, *until, |n| Some(start + WEEK * n as u32)),
        Recurrence::Monthly { until } => repeat(first, *until, |n| add_months(start, n)),
        Recurrence::Custom(dates) => {
            let mut dates: Vec<_> = dates.iter().map(|d| (d.start, d.end)).collect();
            dates.sort_unstable();
            if dates.len() > MAX_OCCURRENCES {
                log::warn!("Custom dates truncated after {MAX_OCCURRENCES} occurrences");
            }
            dates
                .into_iter()
                .take(MAX_OCCURRENCES)
                .map(|(start, end)| Occurrence {
                    start,
                    end,
                    location: location.clone(),
                })
                .collect()
        }
    }
}
