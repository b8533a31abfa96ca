use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub start: Timestamp,
    pub end: Timestamp,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomDate {
    pub start: Timestamp,
    pub end: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    Once,
    Daily {
        until: Timestamp,
    },
    Weekly {
        until: Timestamp,
    },
    Monthly {
        until: Timestamp,
    },
    Custom(Vec<CustomDate>),
}

impl Recurrence {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}
