//! Reader view actions

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderAction {
    UpdateReaderable { tab_id: String, readerable: bool },
    UpdateReaderActive { tab_id: String, active: bool },
    UpdateReaderCheckRequired { tab_id: String, check_required: bool },
    UpdateReaderConnectRequired { tab_id: String, connect_required: bool },
    UpdateReaderBaseUrl { tab_id: String, url: String },
    UpdateReaderActiveUrl { tab_id: String, url: String },
    ClearReaderActiveUrl { tab_id: String },
}
