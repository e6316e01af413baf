//! Rendering module
//!
//! The simulation never draws. After each completed tick the scheduler
//! captures a [`Frame`] and hands it to a [`RenderSink`].

pub mod frame;
pub mod json;
pub mod text;

pub use frame::{Frame, Sprite};
pub use json::JsonLinesRenderer;
pub use text::TextRenderer;

/// Anything that can consume a frame
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame),
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}
