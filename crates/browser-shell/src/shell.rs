//! Interactive shell over a [`SessionManager`]
//!
//! Every command is turned into session manager calls or store actions for
//! the selected tab. After a command the shell waits until the engine went
//! quiet, so the printed tab list shows the outcome.

use crate::command::{Command, HELP};
use anyhow::{bail, Context, Result};
use browser_config::AppConfig;
use browser_engine::{HeadlessEngine, LoadUrlFlags};
use browser_session::{EngineMiddlewareConfig, EngineScope, Session, SessionManager, SessionStorage};
use browser_state::{CrashAction, EngineAction, SessionSource, TabSessionState};
use std::sync::Arc;

pub struct Shell {
    manager: SessionManager,
    engine: Arc<HeadlessEngine>,
    storage: SessionStorage,
    config: AppConfig,
}

impl Shell {
    pub fn new(config: AppConfig, engine: Arc<HeadlessEngine>, scope: EngineScope) -> Result<Self> {
        let storage = SessionStorage::new(engine.clone(), config.session_file_path()?);
        let middleware_config = EngineMiddlewareConfig {
            suspend_on_critical_memory: config.trim_memory_on_critical,
        };
        let homepage = config.homepage.clone();
        let manager = SessionManager::with_config(engine.clone(), scope, middleware_config)
            .with_default_session(move || {
                Session::new(homepage.clone()).with_source(SessionSource::NewTab)
            });

        Ok(Self {
            manager,
            engine,
            storage,
            config,
        })
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Bring back the previous session or open the homepage
    pub async fn start(&mut self) -> Result<()> {
        if self.config.restore_session {
            match self.storage.read() {
                Ok(Some(snapshot)) => self.manager.restore(snapshot, true)?,
                Ok(None) => {}
                Err(e) => log::warn!("Failed to read previous session: {:#}", e),
            }
        }

        match self.manager.selected_session() {
            Some(selected) => {
                self.manager.get_or_create_engine_session(&selected.id)?;
            }
            None => self.open(self.config.homepage.clone(), false)?,
        }

        self.manager.settle().await;
        log::info!("Shell started with {} tabs", self.manager.size());
        Ok(())
    }

    /// Run a command and describe the outcome
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        log::debug!("Executing {:?}", command);

        let message = match command {
            Command::Open { url, private } => {
                self.open(url, private)?;
                None
            }
            Command::Load(url) => {
                let tab_id = self.selected_id()?;
                self.manager.dispatch(EngineAction::load_url(tab_id, url))?;
                None
            }
            Command::Back => {
                let tab_id = self.selected_id()?;
                self.manager.dispatch(EngineAction::GoBack { tab_id })?;
                None
            }
            Command::Forward => {
                let tab_id = self.selected_id()?;
                self.manager.dispatch(EngineAction::GoForward { tab_id })?;
                None
            }
            Command::Reload => {
                let tab_id = self.selected_id()?;
                self.manager.dispatch(EngineAction::Reload {
                    tab_id,
                    flags: LoadUrlFlags::empty(),
                })?;
                None
            }
            Command::Stop => {
                let tab_id = self.selected_id()?;
                self.manager.dispatch(EngineAction::StopLoading { tab_id })?;
                None
            }
            Command::Select(index) => {
                let tab_id = self.tab_id_at(index)?;
                self.manager.select(&tab_id)?;
                self.manager.get_or_create_engine_session(&tab_id)?;
                None
            }
            Command::Close(index) => {
                let tab_id = match index {
                    Some(index) => self.tab_id_at(index)?,
                    None => self.selected_id()?,
                };
                self.manager.remove(&tab_id, true)?;
                if let Some(selected) = self.manager.selected_session() {
                    self.manager.get_or_create_engine_session(&selected.id)?;
                }
                None
            }
            Command::List => None,
            Command::Suspend(index) => {
                let tab_id = self.tab_id_at(index)?;
                self.manager.dispatch(EngineAction::suspend(tab_id))?;
                None
            }
            Command::LowMemory(level) => {
                self.manager.on_low_memory(level)?;
                None
            }
            Command::Desktop(enable) => {
                let tab_id = self.selected_id()?;
                self.manager
                    .dispatch(EngineAction::ToggleDesktopMode { tab_id, enable })?;
                None
            }
            Command::Crash => {
                let tab_id = self.selected_id()?;
                let engine_session = self
                    .manager
                    .get_engine_session(&tab_id)
                    .and_then(|handle| self.engine.session_for(&handle))
                    .context("Selected tab has no engine session")?;
                engine_session.simulate_crash();
                None
            }
            Command::RestoreCrash => {
                let tab_id = self.selected_id()?;
                self.manager
                    .dispatch(CrashAction::RestoreCrashedSession { tab_id })?;
                None
            }
            Command::Save => Some(self.save()?),
            Command::Help => Some(HELP.to_string()),
            Command::Quit => Some(String::new()),
        };

        self.manager.settle().await;
        Ok(message.unwrap_or_else(|| self.render_tabs()))
    }

    /// Store the current session, or forget the stored one if there is none
    pub fn save(&self) -> Result<String> {
        match self.manager.create_snapshot() {
            Some(snapshot) => {
                self.storage.save(&snapshot)?;
                Ok(format!(
                    "Saved {} tabs to {}",
                    snapshot.len(),
                    self.storage.path().display()
                ))
            }
            None => {
                self.storage.clear()?;
                Ok("No tabs to save".to_string())
            }
        }
    }

    /// One line per tab, the selected one marked with `*`
    pub fn render_tabs(&self) -> String {
        let state = self.manager.state();
        if state.tabs.is_empty() {
            return "No tabs".to_string();
        }

        state
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                let marker = if state.selected_tab_id.as_deref() == Some(tab.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let title = if tab.content.title.is_empty() {
                    "(untitled)"
                } else {
                    tab.content.title.as_str()
                };
                format!(
                    "{} {:>2}  {}  <{}>{}",
                    marker,
                    index,
                    title,
                    tab.content.url,
                    render_flags(tab)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn open(&mut self, url: String, private: bool) -> Result<()> {
        let parent = self.manager.selected_session();
        let session = Session::new(url)
            .private(private)
            .with_source(SessionSource::UserEntered);
        let id = session.id.clone();

        self.manager.add(session, true, None, None, parent.as_ref())?;
        self.manager.get_or_create_engine_session(&id)?;
        Ok(())
    }

    fn selected_id(&self) -> Result<String> {
        match self.manager.selected_session() {
            Some(session) => Ok(session.id),
            None => bail!("No tab selected"),
        }
    }

    fn tab_id_at(&self, index: usize) -> Result<String> {
        self.manager
            .state()
            .tabs
            .get(index)
            .map(|tab| tab.id.clone())
            .with_context(|| format!("No tab at index {}", index))
    }
}

fn render_flags(tab: &TabSessionState) -> String {
    let flags: Vec<&str> = [
        (tab.content.private, "private"),
        (tab.engine_state.is_suspended(), "suspended"),
        (!tab.engine_state.is_linked() && !tab.engine_state.is_suspended(), "unloaded"),
        (tab.crashed, "crashed"),
        (tab.content.loading, "loading"),
        (tab.content.desktop_mode, "desktop"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();

    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_state::MemoryLevel;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn config(dir: &Path) -> AppConfig {
        AppConfig {
            homepage: "https://home.example".to_string(),
            session_file: Some(dir.join("session.json")),
            ..Default::default()
        }
    }

    async fn started(config: AppConfig) -> (Shell, Arc<HeadlessEngine>) {
        let engine = Arc::new(HeadlessEngine::new());
        let scope = EngineScope::current().unwrap();
        let mut shell = Shell::new(config, engine.clone(), scope).unwrap();
        shell.start().await.unwrap();
        (shell, engine)
    }

    fn urls(shell: &Shell) -> Vec<String> {
        shell
            .manager()
            .state()
            .tabs
            .iter()
            .map(|tab| tab.content.url.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_start_opens_homepage() {
        let dir = tempfile::tempdir().unwrap();
        let (shell, engine) = started(config(dir.path())).await;

        assert_eq!(urls(&shell), vec!["https://home.example".to_string()]);
        assert_eq!(shell.render_tabs(), "*  0  https://home.example  <https://home.example>");
        assert_eq!(
            engine.sessions()[0].current_url().as_deref(),
            Some("https://home.example")
        );
    }

    #[tokio::test]
    async fn test_open_select_and_close() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _engine) = started(config(dir.path())).await;

        shell
            .execute("open https://a.com".parse().unwrap())
            .await
            .unwrap();
        let output = shell
            .execute("open https://p.com private".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(
            output,
            [
                "   0  https://home.example  <https://home.example>",
                "   1  https://a.com  <https://a.com>",
                "*  2  https://p.com  <https://p.com> [private]",
            ]
            .join("\n")
        );

        // Closing the private tab goes back to the tab that opened it
        shell.execute(Command::Close(None)).await.unwrap();
        let selected = shell.manager().selected_session().unwrap();
        assert_eq!(selected.url, "https://a.com");

        shell.execute(Command::Select(0)).await.unwrap();
        let selected = shell.manager().selected_session().unwrap();
        assert_eq!(selected.url, "https://home.example");
    }

    #[tokio::test]
    async fn test_closing_the_last_tab_opens_the_homepage() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, engine) = started(config(dir.path())).await;
        let first = shell.manager().selected_session().unwrap();

        shell.execute(Command::Close(Some(0))).await.unwrap();

        let selected = shell.manager().selected_session().unwrap();
        assert_ne!(selected.id, first.id);
        assert_eq!(selected.url, "https://home.example");
        assert!(engine.sessions()[0].is_closed());
        assert!(!engine.sessions()[1].is_closed());
    }

    #[tokio::test]
    async fn test_navigation_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, engine) = started(config(dir.path())).await;

        shell.execute(Command::Load("https://a.com".to_string())).await.unwrap();
        shell.execute(Command::Back).await.unwrap();
        assert_eq!(
            engine.sessions()[0].current_url().as_deref(),
            Some("https://home.example")
        );

        shell.execute(Command::Desktop(true)).await.unwrap();
        assert!(shell.manager().state().tabs[0].content.desktop_mode);
        assert!(engine.sessions()[0].desktop_mode());
    }

    #[tokio::test]
    async fn test_crash_and_recover() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _engine) = started(config(dir.path())).await;

        let output = shell.execute(Command::Crash).await.unwrap();
        assert!(output.ends_with("[crashed]"));

        shell.execute(Command::RestoreCrash).await.unwrap();
        assert!(!shell.manager().state().tabs[0].crashed);
    }

    #[tokio::test]
    async fn test_suspend_and_low_memory() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _engine) = started(config(dir.path())).await;
        shell
            .execute("open https://a.com".parse().unwrap())
            .await
            .unwrap();

        let output = shell.execute(Command::Suspend(0)).await.unwrap();
        assert!(output.lines().next().unwrap().ends_with("[suspended]"));

        shell
            .execute(Command::LowMemory(MemoryLevel::RunningCritical))
            .await
            .unwrap();
        assert!(shell.manager().state().tabs[1].engine_state.is_linked());
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _engine) = started(config(dir.path())).await;
        shell
            .execute("open https://a.com".parse().unwrap())
            .await
            .unwrap();
        shell
            .execute("open https://p.com private".parse().unwrap())
            .await
            .unwrap();
        shell.execute(Command::Select(1)).await.unwrap();
        let message = shell.execute(Command::Save).await.unwrap();
        assert!(message.starts_with("Saved 2 tabs"));

        let (shell, engine) = started(config(dir.path())).await;
        assert_eq!(
            urls(&shell),
            vec!["https://home.example".to_string(), "https://a.com".to_string()]
        );
        assert_eq!(shell.manager().selected_session().unwrap().url, "https://a.com");

        // Only the selected tab got an engine session, restored from its snapshot
        let sessions = engine.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].current_url().as_deref(), Some("https://a.com"));
    }

    #[tokio::test]
    async fn test_restore_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _engine) = started(config(dir.path())).await;
        shell
            .execute("open https://a.com".parse().unwrap())
            .await
            .unwrap();
        shell.save().unwrap();

        let config = AppConfig {
            restore_session: false,
            ..config(dir.path())
        };
        let (shell, _engine) = started(config).await;
        assert_eq!(urls(&shell), vec!["https://home.example".to_string()]);
    }
}
