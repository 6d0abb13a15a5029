// crates/schedule/src/tickets.rs

use chrono::{DateTime, FixedOffset};

use crate::{SearchReply, Segment};

/// One resolved departure, built fresh per request from the API reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub departure: DateTime<FixedOffset>,
    pub title: String,
    pub platform: String,
    pub duration_s: u64,
    /// The departure after this one, for the "detailed" phrasing.
    pub next: Option<Box<Ticket>>,
}

/// Selection policy: the first segment, in provider order, departing
/// strictly after `target`. Zero reported totals or no qualifying segment
/// both mean "no ticket".
pub fn next_departure(reply: &SearchReply, target: DateTime<FixedOffset>) -> Option<Ticket> {
    if reply.pagination.total == 0 {
        return None;
    }

    let mut upcoming = reply.segments.iter().filter(|s| s.departure > target);
    let first = upcoming.next()?;
    let next = upcoming.next().map(|s| Box::new(ticket_from(s)));

    let mut ticket = ticket_from(first);
    ticket.next = next;
    Some(ticket)
}

fn ticket_from(segment: &Segment) -> Ticket {
    Ticket {
        departure: segment.departure,
        title: segment.thread.title.clone(),
        platform: segment.departure_platform.clone(),
        duration_s: segment.duration.max(0.0) as u64,
        next: None,
    }
}
