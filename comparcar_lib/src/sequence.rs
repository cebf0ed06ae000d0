//! Request sequencing: only the newest response of each query kind is applied.

use std::collections::HashMap;

/// Logical query streams that are sequenced independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Page fetches of the car list.
    CarList,
    /// The record loaded into the edit form.
    CarDetail,
}

/// Tag attached to an outgoing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub kind: QueryKind,
    pub seq: u64,
}

/// Issues monotonically increasing sequence numbers per [`QueryKind`].
///
/// A response may be applied only while its ticket is still the latest issued
/// for that kind; anything older was superseded while in flight.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: HashMap<QueryKind, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, superseding every earlier ticket of the same kind.
    pub fn issue(&mut self, kind: QueryKind) -> Ticket {
        let seq = self.latest.entry(kind).or_insert(0);
        *seq += 1;
        Ticket { kind, seq: *seq }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.latest
            .get(&ticket.kind)
            .is_some_and(|seq| *seq == ticket.seq)
    }
}
