//! Platform layer
//!
//! Real-time concerns kept out of the simulation:
//! - Key input delivery
//! - Tick and strawberry timers

pub mod input;
pub mod scheduler;

pub use input::{InputEvent, InputReceiver, InputSender, forward_lines, input_channel};
pub use scheduler::Scheduler;
