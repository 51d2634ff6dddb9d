//! Shell commands
//!
//! One command per line, arguments separated by whitespace. Tab indexes
//! refer to the numbers printed by `list`.

use anyhow::{bail, Context, Result};
use browser_state::MemoryLevel;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  open <url> [private]   open a new tab and select it
  load <url>             load a url in the selected tab
  back | forward         navigate the selected tab
  reload | stop          reload or stop the selected tab
  select <index>         select a tab
  close [index]          close a tab, the selected one by default
  list                   show all tabs
  suspend <index>        suspend the engine session of a tab
  lowmem [level]         report low memory (default: running-low)
  desktop on|off         toggle desktop mode of the selected tab
  crash                  crash the engine session of the selected tab
  restore-crash          recover the crashed selected tab
  save                   write the session snapshot
  help                   show this help
  quit                   save and exit
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open { url: String, private: bool },
    Load(String),
    Back,
    Forward,
    Reload,
    Stop,
    Select(usize),
    Close(Option<usize>),
    List,
    Suspend(usize),
    LowMemory(MemoryLevel),
    Desktop(bool),
    Crash,
    RestoreCrash,
    Save,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("Empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("open", [url]) => Command::Open {
                url: url.to_string(),
                private: false,
            },
            ("open", [url, "private"]) => Command::Open {
                url: url.to_string(),
                private: true,
            },
            ("load", [url]) => Command::Load(url.to_string()),
            ("back", []) => Command::Back,
            ("forward", []) => Command::Forward,
            ("reload", []) => Command::Reload,
            ("stop", []) => Command::Stop,
            ("select", [index]) => Command::Select(parse_index(index)?),
            ("close", []) => Command::Close(None),
            ("close", [index]) => Command::Close(Some(parse_index(index)?)),
            ("list" | "ls", []) => Command::List,
            ("suspend", [index]) => Command::Suspend(parse_index(index)?),
            ("lowmem", []) => Command::LowMemory(MemoryLevel::RunningLow),
            ("lowmem", [level]) => Command::LowMemory(
                MemoryLevel::from_str(level)
                    .with_context(|| format!("Unknown memory level: {}", level))?,
            ),
            ("desktop", ["on"]) => Command::Desktop(true),
            ("desktop", ["off"]) => Command::Desktop(false),
            ("crash", []) => Command::Crash,
            ("restore-crash", []) => Command::RestoreCrash,
            ("save", []) => Command::Save,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("Unknown command: {} (try `help`)", line.trim()),
        };

        Ok(command)
    }
}

fn parse_index(index: &str) -> Result<usize> {
    index
        .parse()
        .with_context(|| format!("Not a tab index: {}", index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "open https://mozilla.org private".parse::<Command>().unwrap(),
            Command::Open {
                url: "https://mozilla.org".to_string(),
                private: true,
            }
        );
        assert_eq!("  close  ".parse::<Command>().unwrap(), Command::Close(None));
        assert_eq!("close 2".parse::<Command>().unwrap(), Command::Close(Some(2)));
        assert_eq!(
            "lowmem running-critical".parse::<Command>().unwrap(),
            Command::LowMemory(MemoryLevel::RunningCritical)
        );
        assert_eq!("desktop off".parse::<Command>().unwrap(), Command::Desktop(false));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("select first".parse::<Command>().is_err());
        assert!("open".parse::<Command>().is_err());
        assert!("lowmem panic".parse::<Command>().is_err());
        assert!("fly away".parse::<Command>().is_err());
    }
}
