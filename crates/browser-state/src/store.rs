use crate::actions::Action;
use crate::dispatcher::{Dispatcher, StoreMessage};
use crate::error::StoreError;
use crate::middleware::{Middleware, MiddlewareContext};
use crate::reducers::browser_reducer::reduce;
use crate::state::BrowserState;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, watch};

/// Callback notified after every state change
pub trait StoreObserver: Send + Sync {
    fn on_state_changed(&self, state: &Arc<BrowserState>);
}

impl<F> StoreObserver for F
where
    F: Fn(&Arc<BrowserState>) + Send + Sync,
{
    fn on_state_changed(&self, state: &Arc<BrowserState>) {
        self(state)
    }
}

/// Store - holds the browser state and runs the action loop
///
/// Every action goes through the middleware `handle` hooks, the reducer,
/// the observers and the middleware `after` hooks before the next action is
/// looked at. Actions queued by middleware run next, then whatever arrived
/// through the [`Dispatcher`] channel.
pub struct Store {
    state: Arc<BrowserState>,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    receiver: mpsc::UnboundedReceiver<StoreMessage>,
    publisher: watch::Sender<Arc<BrowserState>>,
    observers: Vec<Weak<dyn StoreObserver>>,
    shutdown: bool,
}

impl Store {
    pub fn new(initial_state: BrowserState) -> Self {
        let (tx, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(initial_state);
        let (publisher, _) = watch::channel(Arc::clone(&state));

        Self {
            state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(tx),
            receiver,
            publisher,
            observers: Vec::new(),
            shutdown: false,
        }
    }

    pub fn with_middleware(
        initial_state: BrowserState,
        middleware: Vec<Box<dyn Middleware>>,
    ) -> Self {
        let mut store = Self::new(initial_state);
        store.middleware = middleware;
        store
    }

    /// Add middleware to the end of the chain
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// The latest fully reduced state
    pub fn state(&self) -> Arc<BrowserState> {
        Arc::clone(&self.state)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Receiver getting every new state, no-op actions are not published
    pub fn subscribe(&self) -> watch::Receiver<Arc<BrowserState>> {
        self.publisher.subscribe()
    }

    /// Register a callback, kept until the caller drops its `Arc`
    pub fn observe(&mut self, observer: &Arc<dyn StoreObserver>) {
        self.observers.push(Arc::downgrade(observer));
    }

    /// Process an action and everything it caused
    ///
    /// Only an error of `action` itself is returned. Errors of follow-up
    /// actions are logged.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), StoreError> {
        let result = self.process(action.into());
        self.process_pending();
        result
    }

    /// Process actions sent through the dispatcher so far
    ///
    /// Returns the number of actions processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(message) = self.receiver.try_recv() {
            if self.handle_message(message) {
                processed += 1;
            }
        }
        processed
    }

    /// Run the store loop until shut down, handing the store back afterwards
    pub async fn run(mut self) -> Self {
        log::info!("Store: running");
        while !self.shutdown {
            match self.receiver.recv().await {
                Some(message) => {
                    self.handle_message(message);
                }
                None => break,
            }
        }
        log::info!("Store: stopped");
        self
    }

    /// Returns `true` if the message carried an action
    fn handle_message(&mut self, message: StoreMessage) -> bool {
        match message {
            StoreMessage::Dispatch(action) => {
                if let Err(e) = self.process(action) {
                    log::error!("Store: dispatched action failed: {}", e);
                }
                true
            }
            StoreMessage::Flush(done) => {
                let _ = done.send(());
                false
            }
            StoreMessage::Shutdown => {
                self.shutdown = true;
                false
            }
        }
    }

    /// Apply an action and, depth first, the follow-ups queued by middleware
    fn process(&mut self, action: Action) -> Result<(), StoreError> {
        let mut queue = VecDeque::from([action]);
        let mut result = None;

        while let Some(action) = queue.pop_front() {
            let mut queued = Vec::new();
            let outcome = self.apply(&action, &mut queued);

            for follow_up in queued.into_iter().rev() {
                queue.push_front(follow_up);
            }

            if result.is_none() {
                result = Some(outcome);
            } else if let Err(e) = outcome {
                log::error!("Store: follow-up action {:?} failed: {}", action, e);
            }
        }

        result.unwrap_or(Ok(()))
    }

    fn apply(&mut self, action: &Action, queued: &mut Vec<Action>) -> Result<(), StoreError> {
        {
            let mut ctx = MiddlewareContext::new(&self.state, &self.dispatcher, queued);
            for middleware in &mut self.middleware {
                if !middleware.handle(action, &mut ctx) {
                    return Ok(());
                }
            }
        }

        let next = match reduce(BrowserState::clone(&self.state), action) {
            Ok(next) => next,
            Err(e) => {
                if !queued.is_empty() {
                    log::warn!("Store: dropping {} follow-up actions of rejected action", queued.len());
                    queued.clear();
                }
                return Err(e.into());
            }
        };

        if next != *self.state {
            self.state = Arc::new(next);
            self.notify();
        }

        let mut ctx = MiddlewareContext::new(&self.state, &self.dispatcher, queued);
        for middleware in &mut self.middleware {
            middleware.after(action, &mut ctx);
        }

        Ok(())
    }

    fn notify(&mut self) {
        self.publisher.send_replace(Arc::clone(&self.state));

        self.observers.retain(|observer| observer.strong_count() > 0);
        for observer in self.observers.iter().filter_map(Weak::upgrade) {
            observer.on_state_changed(&self.state);
        }
    }
}
