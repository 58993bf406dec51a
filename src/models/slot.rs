use chrono::DateTime;
use chrono_tz::Tz;

/// Which time rule produced a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRule {
    Default,
    Tomorrow,
    Next,
    Absolute,
}

impl SlotRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotRule::Default => "default",
            SlotRule::Tomorrow => "tomorrow",
            SlotRule::Next => "next",
            SlotRule::Absolute => "absolute",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub timezone: String,
    pub rule: SlotRule,
}
