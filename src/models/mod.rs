pub mod availability;
pub mod message;
pub mod prompt;

pub use availability::{HoursPolicy, OpeningHours, Verdict};
pub use message::{ChatRequest, ChatResponse, Message, Sender, UiAction};
pub use prompt::{DatePicker, Prompt};
