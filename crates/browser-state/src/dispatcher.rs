//! Dispatcher for actions coming from outside the store loop
//!
//! Tasks spawned by middleware (engine callbacks, async engine work) never
//! touch the state. They send actions through a cloned `Dispatcher`; the
//! store picks them up in FIFO order once the current action is done.

use crate::actions::Action;
use crate::error::StoreError;
use tokio::sync::{mpsc, oneshot};

/// Messages consumed by the store loop
pub(crate) enum StoreMessage {
    Dispatch(Action),
    /// Answered once every message sent before it was processed
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Cloneable handle for sending actions to a [`Store`](crate::store::Store)
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<StoreMessage>,
}

impl Dispatcher {
    pub(crate) fn new(tx: mpsc::UnboundedSender<StoreMessage>) -> Self {
        Self { tx }
    }

    /// Queue an action, it re-enters the middleware chain from the beginning
    pub fn dispatch(&self, action: impl Into<Action>) {
        if let Err(e) = self.send(StoreMessage::Dispatch(action.into())) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }

    /// Whether the store owning the other end is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub(crate) fn send(&self, message: StoreMessage) -> Result<(), StoreError> {
        self.tx.send(message).map_err(|_| StoreError::Closed)
    }
}
