use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::BrowserState;

pub mod logging;

pub use logging::LoggingMiddleware;

/// Middleware trait - intercepts actions around the reducer
///
/// Middleware runs on the store loop. Anything slow has to be spawned as a
/// task which reports back through [`MiddlewareContext::dispatcher`].
pub trait Middleware: Send {
    /// Called before the reducer with the current state
    ///
    /// Returns `true` to continue the chain, `false` to consume the action.
    /// A consumed action never reaches the reducer or later middleware.
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool;

    /// Called after the reducer, `ctx.state()` already is the reduced state
    ///
    /// Skipped for consumed actions and actions the reducer rejected.
    fn after(&mut self, _action: &Action, _ctx: &mut MiddlewareContext<'_>) {}
}

/// What a middleware gets to see and do while handling an action
pub struct MiddlewareContext<'a> {
    state: &'a BrowserState,
    dispatcher: &'a Dispatcher,
    queued: &'a mut Vec<Action>,
}

impl<'a> MiddlewareContext<'a> {
    pub(crate) fn new(
        state: &'a BrowserState,
        dispatcher: &'a Dispatcher,
        queued: &'a mut Vec<Action>,
    ) -> Self {
        Self {
            state,
            dispatcher,
            queued,
        }
    }

    pub fn state(&self) -> &BrowserState {
        self.state
    }

    /// Queue a follow-up action
    ///
    /// Follow-ups run right after the current action, in the order they were
    /// queued and before anything else waiting in the store.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        self.queued.push(action.into());
    }

    /// Dispatcher for tasks outliving the current action
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }
}
