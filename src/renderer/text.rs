//! Plain-text grid renderer

use std::io::Write;

use super::RenderSink;
use super::frame::{Frame, Sprite};
use crate::sim::{Coord, KindTag};

/// Draw order, highest first
const PRIORITY: [KindTag; 8] = [
    KindTag::Player,
    KindTag::Enemy,
    KindTag::Strawberry,
    KindTag::Coin,
    KindTag::Door,
    KindTag::Stairs,
    KindTag::Wall,
    KindTag::Floor,
];

const EMPTY: char = '.';

fn rank(kind: KindTag) -> usize {
    PRIORITY
        .iter()
        .position(|&k| k == kind)
        .unwrap_or(PRIORITY.len())
}

fn glyph(sprite: &Sprite, reversed: bool) -> char {
    match sprite.kind {
        KindTag::Player => '@',
        KindTag::Enemy if reversed => 'e',
        KindTag::Enemy => 'E',
        KindTag::Strawberry => '*',
        KindTag::Coin => '$',
        KindTag::Door if sprite.styles.contains(&"door-open") => '/',
        KindTag::Door => '+',
        KindTag::Stairs => '>',
        KindTag::Wall => '#',
        KindTag::Floor => '_',
    }
}

/// Bytes for `size` rows of `size` glyphs plus newlines and a status line
fn buffer_len(size: i32) -> usize {
    let side = usize::try_from(size).unwrap_or(0);
    side.saturating_add(1).saturating_mul(side).saturating_add(64)
}

/// Writes one ASCII grid plus a status line per frame
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a frame to a string without touching the writer
    pub fn draw(frame: &Frame) -> String {
        let size = frame.size.max(0);
        let mut text = String::with_capacity(buffer_len(size));

        for row in 0..size {
            for col in 0..size {
                let cell = frame
                    .sprites_at(Coord::new(row, col))
                    .min_by_key(|s| rank(s.kind))
                    .map_or(EMPTY, |s| glyph(s, frame.reversed));
                text.push(cell);
            }
            text.push('\n');
        }

        text.push_str(&format!("tick {}  score {}", frame.tick, frame.score));
        if frame.over {
            text.push_str("  GAME OVER");
        } else if !frame.started {
            text.push_str("  press a direction key to start");
        } else if frame.reversed {
            text.push_str("  enemies fleeing");
        }
        text.push('\n');
        text
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let text = Self::draw(frame);
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            log::warn!("Failed to write frame {}: {}", frame.tick, err);
        }
    }
}
