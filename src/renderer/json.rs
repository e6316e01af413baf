//! JSON-lines renderer for headless runs and replays

use std::io::Write;

use super::RenderSink;
use super::frame::Frame;

/// Writes each frame as one line of JSON
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let written = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush());
        if let Err(err) = written {
            log::warn!("Failed to write frame {} as JSON: {}", frame.tick, err);
        }
    }
}
