use thiserror::Error;

/// Actions a reducer refuses to apply
///
/// These are caller bugs: the state stays untouched and the error is
/// returned from [`Store::dispatch`](crate::store::Store::dispatch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReducerError {
    #[error("a tab with id {0} already exists")]
    DuplicateTab(String),

    #[error("parent {parent_id} of tab {tab_id} does not exist")]
    MissingParent { tab_id: String, parent_id: String },

    #[error("tab {0} has a parent, adding multiple tabs with a parent is not supported")]
    ParentNotSupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("action rejected: {0}")]
    Reducer(#[from] ReducerError),

    #[error("store is not running")]
    Closed,
}
