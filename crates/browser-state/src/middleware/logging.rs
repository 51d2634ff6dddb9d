use crate::actions::Action;
use crate::middleware::{Middleware, MiddlewareContext};

/// LoggingMiddleware - logs all actions passing through
#[derive(Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _ctx: &mut MiddlewareContext<'_>) -> bool {
        // Progress updates arrive in bursts
        if matches!(action, Action::Content(crate::actions::ContentAction::UpdateProgress { .. })) {
            log::trace!("Action: {:?}", action);
        } else {
            log::debug!("Action: {:?}", action);
        }

        true
    }
}
