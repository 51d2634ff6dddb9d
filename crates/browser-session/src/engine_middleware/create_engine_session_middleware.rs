use super::get_or_create_engine_session;
use browser_engine::Engine;
use browser_state::{Action, EngineAction, Middleware, MiddlewareContext};
use std::sync::Arc;

/// Creates the engine session requested by `CreateEngineSession`
pub struct CreateEngineSessionMiddleware {
    engine: Arc<dyn Engine>,
}

impl CreateEngineSessionMiddleware {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }
}

impl Middleware for CreateEngineSessionMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        match action {
            Action::Engine(EngineAction::CreateEngineSession {
                tab_id,
                skip_loading,
            }) => {
                get_or_create_engine_session(&self.engine, tab_id, ctx, *skip_loading);
                false
            }
            _ => true,
        }
    }
}
