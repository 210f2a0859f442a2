use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Clinic opening hours for one weekday. `close_hour` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open_hour: u32,
    pub close_hour: u32,
    pub label: &'static str,
}

impl OpeningHours {
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }
}

const CLOSED_LABEL: &str = "Closed";

const WEEKDAY_HOURS: OpeningHours = OpeningHours {
    open_hour: 10,
    close_hour: 17,
    label: "10:00 AM - 5:00 PM",
};

const THURSDAY_HOURS: OpeningHours = OpeningHours {
    open_hour: 11,
    close_hour: 19,
    label: "11:00 AM - 7:00 PM",
};

const SATURDAY_HOURS: OpeningHours = OpeningHours {
    open_hour: 9,
    close_hour: 15,
    label: "9:00 AM - 3:00 PM",
};

pub fn hours_for(day: Weekday) -> Option<OpeningHours> {
    match day {
        Weekday::Sun => None,
        Weekday::Sat => Some(SATURDAY_HOURS),
        Weekday::Thu => Some(THURSDAY_HOURS),
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Fri => Some(WEEKDAY_HOURS),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_open: bool,
    /// Human-readable opening window for the candidate's day.
    pub window: &'static str,
}

/// Open/closed verdict for a local timestamp. Only the weekday and hour matter.
pub fn evaluate(dt: &NaiveDateTime) -> Verdict {
    match hours_for(dt.weekday()) {
        Some(hours) => Verdict {
            is_open: hours.contains_hour(dt.hour()),
            window: hours.label,
        },
        None => Verdict {
            is_open: false,
            window: CLOSED_LABEL,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoursPolicy {
    /// Candidate times are checked against the clinic's rule table.
    #[default]
    Enforced,
    /// Every candidate time is accepted.
    Unrestricted,
}

impl HoursPolicy {
    pub fn evaluate(&self, dt: &NaiveDateTime) -> Verdict {
        let verdict = evaluate(dt);
        match self {
            HoursPolicy::Enforced => verdict,
            HoursPolicy::Unrestricted => Verdict {
                is_open: true,
                ..verdict
            },
        }
    }
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Warning shown when a picked time falls outside the day's window.
pub fn closed_notice(dt: &NaiveDateTime, verdict: &Verdict) -> String {
    let day = day_name(dt.weekday());
    format!(
        "We are closed at that time on {day}s.\n\nBusiness Hours for {day}:\n{}",
        verdict.window
    )
}

pub fn weekly_summary() -> String {
    let week = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    week.iter()
        .map(|day| {
            let window = hours_for(*day).map(|h| h.label).unwrap_or(CLOSED_LABEL);
            format!("{day}: {window}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
