//! Task scope for engine side effects
//!
//! Every engine call the middleware makes runs as a tokio task owned by an
//! [`EngineScope`]. Cancelling the scope stops pending calls at their next
//! await point; cleanup tasks (closing sessions) are not affected.

use browser_state::Store;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct EngineScope {
    handle: Handle,
    token: CancellationToken,
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl EngineScope {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            token: CancellationToken::new(),
            tasks: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Scope on the runtime we are currently running on, if any
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Spawn a task that stops when the scope gets cancelled
    pub fn launch<F>(&self, label: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        self.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("EngineScope: {} cancelled", label);
                }
                _ = future => {}
            }
        });
    }

    /// Spawn a task that always runs to completion
    pub fn launch_cleanup<F>(&self, label: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        log::trace!("EngineScope: launching {}", label);
        self.spawn(future);
    }

    pub fn cancel(&self) {
        log::info!("EngineScope: cancelling pending engine calls");
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Number of tasks not joined yet
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Wait for every task, including tasks spawned while waiting
    pub async fn wait_until_idle(&self) {
        loop {
            let mut tasks = std::mem::take(&mut *self.lock());
            if tasks.is_empty() {
                return;
            }

            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    if e.is_panic() {
                        log::error!("EngineScope: task panicked: {}", e);
                    }
                }
            }
        }
    }

    /// Run tasks and store until neither has anything left to do
    ///
    /// Tasks report back through the dispatcher, which may lead to new
    /// tasks, so both sides are drained in turns.
    pub async fn settle(&self, store: &mut Store) {
        loop {
            self.wait_until_idle().await;
            if store.process_pending() == 0 && self.pending() == 0 {
                return;
            }
        }
    }

    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.lock();
        // Forget finished tasks
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(future, &self.handle);
    }

    fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
