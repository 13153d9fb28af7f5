pub mod leg;
pub mod machine;
pub mod rep_counter;

pub use leg::{classify_leg, combined_code, LegState, LegThresholds};
pub use machine::{transition, ConfirmedState, Feedback, SessionMemory, Transition};
pub use rep_counter::{FrameReport, LegReading, RepCounter};
