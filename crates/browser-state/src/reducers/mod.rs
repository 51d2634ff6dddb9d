//! Reducers
//!
//! One reducer per slice of the state tree. Reducers are pure: they take
//! the state by value and hand it back, unchanged when nothing matched.

pub mod browser_reducer;
pub mod content_reducer;
pub mod crash_reducer;
pub mod custom_tab_list_reducer;
pub mod download_reducer;
pub mod engine_state_reducer;
pub mod media_reducer;
pub mod reader_state_reducer;
pub mod system_reducer;
pub mod tab_list_reducer;
pub mod top_site_reducer;
pub mod web_extension_reducer;
