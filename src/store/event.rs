use serde::Serialize;

/// Life events the builder records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birth,
    Death,
    Marriage,
}

impl EventKind {
    /// Single-letter marker used in charts (`b`, `d`, `m`)
    pub fn marker(self) -> char {
        match self {
            EventKind::Birth => 'b',
            EventKind::Death => 'd',
            EventKind::Marriage => 'm',
        }
    }
}

/// A dated, placed event owned by one individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub date: Option<String>,
    pub place: Option<String>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            date: None,
            place: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }
}
