use anyhow::Result;
use browser_config::AppConfig;
use browser_engine::HeadlessEngine;
use browser_session::EngineScope;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Handle;

mod command;
mod logger;
mod shell;

use command::Command;
use shell::Shell;

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting browser-shell, logging to {:?}", log_file);

    let config = AppConfig::load();
    if config.engine_name != "headless" {
        log::warn!(
            "Engine {} is not available, falling back to headless",
            config.engine_name
        );
    }

    let engine = Arc::new(HeadlessEngine::new());
    let scope = EngineScope::new(Handle::current());
    let mut shell = Shell::new(config, engine, scope.clone())?;
    shell.start().await?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout
        .write_all(format!("{}\n> ", shell.render_tabs()).as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let output = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match shell.execute(command).await {
                Ok(output) => output,
                Err(e) => {
                    log::error!("Command {:?} failed: {:#}", line, e);
                    format!("Error: {:#}", e)
                }
            },
            Err(e) => format!("Error: {:#}", e),
        };

        stdout.write_all(format!("{}\n> ", output).as_bytes()).await?;
        stdout.flush().await?;
    }

    match shell.save() {
        Ok(message) => log::info!("{}", message),
        Err(e) => {
            log::error!("Failed to save session: {:#}", e);
            eprintln!("Failed to save session: {:#}", e);
        }
    }

    scope.cancel();
    scope.wait_until_idle().await;
    log::info!("Exiting browser-shell");
    Ok(())
}
