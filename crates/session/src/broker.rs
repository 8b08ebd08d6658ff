//! Single-slot input broker.
//!
//! One serialized stream of end-user input feeds many differently-shaped
//! interactive operations, but only one of them is ever suspended at a time
//! (the dispatcher is not reentrant). The broker therefore holds a single
//! pending resolver; registering a new request replaces the previous one,
//! and a replaced consumer fails fast with [`BridgeError::InputClosed`].
//! No legal call sequence ever replaces a live registration.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::debug;

use bridge_core::{InputEvent, KeyInput};

use crate::error::{BridgeError, Result};

type Slot = Arc<Mutex<Option<oneshot::Sender<InputEvent>>>>;

/// Consumer side: owned by the session, awaited by interactive handlers.
#[derive(Default)]
pub struct InputBroker {
    slot: Slot,
}

/// Producer side: cloneable submitter handed to the presentation layer.
#[derive(Clone, Default)]
pub struct InputHandle {
    slot: Slot,
}

impl InputBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> InputHandle {
        InputHandle {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Suspends until the next raw input event.
    ///
    /// Registering drops any previously registered resolver: only the
    /// latest request can be fulfilled.
    pub async fn next_event(&self) -> Result<InputEvent> {
        let (tx, rx) = oneshot::channel();
        {
            let mut slot = self.slot.lock().expect("input slot poisoned");
            if slot.replace(tx).is_some() {
                debug!("replaced a pending input request");
            }
        }
        rx.await.map_err(|_| BridgeError::InputClosed)
    }

    /// Next plain character; position and submit events are discarded.
    pub async fn get_char(&self) -> Result<char> {
        loop {
            if let InputEvent::Char(ch) = self.next_event().await? {
                return Ok(ch);
            }
        }
    }

    /// Next character or submit signal (line editing); positions retry.
    pub async fn get_line_event(&self) -> Result<InputEvent> {
        loop {
            match self.next_event().await? {
                event @ (InputEvent::Char(_) | InputEvent::Submit) => return Ok(event),
                InputEvent::Pos { .. } => continue,
            }
        }
    }

    /// Next character or screen position (targeting); submits retry.
    pub async fn get_char_or_pos(&self) -> Result<InputEvent> {
        loop {
            match self.next_event().await? {
                event @ (InputEvent::Char(_) | InputEvent::Pos { .. }) => return Ok(event),
                InputEvent::Submit => continue,
            }
        }
    }
}

impl InputHandle {
    /// Delivers one event to the pending request, if any. Returns whether a
    /// consumer was waiting; events with no consumer are dropped.
    pub fn submit(&self, event: InputEvent) -> bool {
        let sender = self.slot.lock().expect("input slot poisoned").take();
        match sender {
            Some(sender) => sender.send(event).is_ok(),
            None => {
                debug!(?event, "input event dropped, no pending request");
                false
            }
        }
    }

    /// Maps a raw keystroke and delivers the resulting event, if one is
    /// produced.
    pub fn submit_key(&self, key: KeyInput) -> bool {
        key.to_event().map(|event| self.submit(event)).unwrap_or(false)
    }

    /// Cancels whichever consumer is currently suspended by satisfying its
    /// wait with an escape character; consumers treat escape as "abort".
    pub fn cancel(&self) -> bool {
        self.submit(InputEvent::Char(bridge_core::ESC))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn char_consumer_skips_position_events() {
        let broker = InputBroker::new();
        let handle = broker.handle();

        let task = tokio::spawn(async move { broker.get_char().await });
        tokio::task::yield_now().await;
        handle.submit(InputEvent::Pos {
            x: 1,
            y: 2,
            modifier: 1,
        });
        tokio::task::yield_now().await;
        handle.submit(InputEvent::Char('k'));

        assert_eq!(task.await.unwrap().unwrap(), 'k');
    }

    #[tokio::test]
    async fn latest_registration_wins() {
        let broker = Arc::new(InputBroker::new());
        let handle = broker.handle();

        let orphaned = {
            let broker = Arc::clone(&broker);
            tokio::spawn(async move { broker.next_event().await })
        };
        tokio::task::yield_now().await;

        let current = {
            let broker = Arc::clone(&broker);
            tokio::spawn(async move { broker.next_event().await })
        };
        tokio::task::yield_now().await;

        handle.submit(InputEvent::Char('x'));
        assert_eq!(current.await.unwrap().unwrap(), InputEvent::Char('x'));
        assert!(matches!(
            orphaned.await.unwrap(),
            Err(BridgeError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn events_without_a_consumer_are_dropped() {
        let broker = InputBroker::new();
        let handle = broker.handle();
        assert!(!handle.submit(InputEvent::Char('q')));
    }

    #[tokio::test]
    async fn cancel_satisfies_the_pending_wait_with_escape() {
        let broker = InputBroker::new();
        let handle = broker.handle();

        let task = tokio::spawn(async move { broker.get_char().await });
        tokio::task::yield_now().await;
        handle.cancel();
        assert_eq!(task.await.unwrap().unwrap(), bridge_core::ESC);
    }
}
