//! Async bridge from the terminal event stream to the game's input channel.

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::map::KeyMap;
use crate::types::GameInput;

/// Forward mapped terminal events into `tx` until the terminal stream ends,
/// an event read fails, or the receiver goes away.
pub fn spawn_input_pump(keymap: KeyMap, tx: mpsc::Sender<GameInput>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "terminal event read failed");
                    break;
                }
            };
            let Some(input) = keymap.map_event(&event) else {
                continue;
            };
            trace!(?input, "input");
            if tx.send(input).await.is_err() {
                break;
            }
        }
    })
}
