//! Top site actions

use crate::state::TopSite;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopSiteAction {
    AddTopSite { site: TopSite },
    RemoveTopSite { site: TopSite },
    /// Rename the given top site in place
    UpdateTopSite {
        site: TopSite,
        title: String,
        url: String,
    },
}
