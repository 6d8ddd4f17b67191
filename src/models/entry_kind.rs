use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    Overtime,
    Timeoff,
}

impl EntryKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryKind::Overtime => "overtime",
            EntryKind::Timeoff => "timeoff",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "overtime" => Some(EntryKind::Overtime),
            "timeoff" => Some(EntryKind::Timeoff),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_input(s: &str) -> Option<Self> {
        EntryKind::from_db_str(&s.to_lowercase())
    }

    pub fn is_overtime(&self) -> bool {
        matches!(self, EntryKind::Overtime)
    }

    pub fn is_timeoff(&self) -> bool {
        matches!(self, EntryKind::Timeoff)
    }

    /// Credited hours for `fact_hours` at the given multiplier.
    /// Overtime is credited at `fact_hours × multiplier`, time off is
    /// debited at face value (negative credit).
    pub fn credited(&self, fact_hours: f64, multiplier: f64) -> f64 {
        match self {
            EntryKind::Overtime => fact_hours * multiplier,
            EntryKind::Timeoff => -fact_hours,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Overtime => "Overtime",
            EntryKind::Timeoff => "Time off",
        }
    }
}
