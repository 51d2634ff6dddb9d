/// Reader view state of a tab
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReaderState {
    /// The page can be shown in reader view
    pub readerable: bool,
    /// Reader view is currently shown
    pub active: bool,
    /// The page needs to be checked for readerability again
    pub check_required: bool,
    /// The reader view content script needs to be connected again
    pub connect_required: bool,
    pub base_url: Option<String>,
    pub active_url: Option<String>,
}
