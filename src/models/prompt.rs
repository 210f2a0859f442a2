use chrono::{Local, NaiveDateTime, Timelike};

/// Date/time picker shown in response to a `date_picker` UI action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    /// Earliest time the input widget offers.
    pub min_selectable: NaiveDateTime,
}

impl DatePicker {
    pub fn new(min_selectable: NaiveDateTime) -> Self {
        Self { min_selectable }
    }

    /// A picker whose floor is the current local minute.
    pub fn starting_now() -> Self {
        let now = Local::now().naive_local();
        let floor = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self::new(floor)
    }

    pub fn accepts(&self, candidate: &NaiveDateTime) -> bool {
        *candidate >= self.min_selectable
    }
}

/// A transient affordance shown after the transcript. Never more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    QuickReplies(Vec<String>),
    DatePicker(DatePicker),
}

impl Prompt {
    pub fn kind(&self) -> &'static str {
        match self {
            Prompt::QuickReplies(_) => "quick_replies",
            Prompt::DatePicker(_) => "date_picker",
        }
    }
}
