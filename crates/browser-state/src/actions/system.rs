//! System events

use browser_engine::EngineSessionState;
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Memory pressure level reported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MemoryLevel {
    /// The UI went to the background
    UiHidden,
    RunningModerate,
    RunningLow,
    RunningCritical,
    /// The process is on the list of processes to kill
    Background,
    Moderate,
    /// The process is about to be killed
    Complete,
}

impl MemoryLevel {
    /// Levels at which every background engine session should go
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::RunningCritical | Self::Background | Self::Moderate | Self::Complete
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SystemAction {
    /// The system is running low on memory
    ///
    /// `states` holds the snapshots of engine sessions the caller is about
    /// to release, keyed by tab id.
    LowMemory {
        level: MemoryLevel,
        states: HashMap<String, EngineSessionState>,
    },
}
