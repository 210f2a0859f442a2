use chrono::NaiveDateTime;

use crate::models::availability::closed_notice;
use crate::models::HoursPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    MissingSelection,
    OutsideBusinessHours { notice: String },
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::MissingSelection => write!(f, "Please select a date and time."),
            SchedulingError::OutsideBusinessHours { notice } => write!(f, "{notice}"),
        }
    }
}

/// Checks a picked appointment time against the hours policy.
pub fn validate_appointment_time(
    selection: Option<&NaiveDateTime>,
    policy: HoursPolicy,
) -> Result<NaiveDateTime, SchedulingError> {
    let dt = selection.ok_or(SchedulingError::MissingSelection)?;

    let verdict = policy.evaluate(dt);
    if !verdict.is_open {
        return Err(SchedulingError::OutsideBusinessHours {
            notice: closed_notice(dt, &verdict),
        });
    }

    Ok(*dt)
}

/// Display form sent to the assistant, e.g. `Mon, Jun 16, 2025, 11:00 AM`.
pub fn format_appointment(dt: &NaiveDateTime) -> String {
    dt.format("%a, %b %-d, %Y, %-I:%M %p").to_string()
}
