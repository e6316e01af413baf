//! Key input plumbing
//!
//! Raw keys travel over an unbounded channel into the scheduler task, so a
//! stdin reader, a network handler or a test can all feed the same game.

use std::io::BufRead;

use tokio::sync::mpsc;

/// A raw key pressed by one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// Index into the store's player list
    pub player: usize,
    pub key: String,
}

impl InputEvent {
    pub fn new(player: usize, key: impl Into<String>) -> Self {
        Self {
            player,
            key: key.into(),
        }
    }
}

pub type InputSender = mpsc::UnboundedSender<InputEvent>;
pub type InputReceiver = mpsc::UnboundedReceiver<InputEvent>;

pub fn input_channel() -> (InputSender, InputReceiver) {
    mpsc::unbounded_channel()
}

/// Forward each non-empty line of `reader` as a key for `player`.
/// Returns the number of keys sent once the reader hits EOF or the
/// scheduler hangs up.
///
/// Blocks on the reader, so run it on its own thread. A parked stdin read
/// then cannot hold up runtime shutdown.
pub fn forward_lines<R: BufRead>(reader: R, player: usize, tx: InputSender) -> std::io::Result<usize> {
    let mut sent = 0;
    for line in reader.lines() {
        let line = line?;
        let key = line.trim();
        if key.is_empty() {
            continue;
        }
        if tx.send(InputEvent::new(player, key)).is_err() {
            log::debug!("Scheduler gone, dropping remaining input");
            break;
        }
        sent += 1;
    }
    Ok(sent)
}
