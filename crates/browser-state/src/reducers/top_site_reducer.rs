use crate::actions::TopSiteAction;
use crate::state::{BrowserState, TopSite};

/// Reducer for the top sites
///
/// Top sites have no id, they are found by equality.
pub fn reduce(mut state: BrowserState, action: &TopSiteAction) -> BrowserState {
    match action {
        TopSiteAction::AddTopSite { site } => {
            if !state.top_sites.contains(site) {
                state.top_sites.push(site.clone());
            }
        }
        TopSiteAction::RemoveTopSite { site } => {
            state.top_sites.retain(|existing| existing != site);
        }
        TopSiteAction::UpdateTopSite { site, title, url } => {
            match state.top_sites.iter_mut().find(|existing| **existing == *site) {
                Some(existing) => {
                    *existing = TopSite::new(title.clone(), url.clone(), site.kind);
                }
                None => log::debug!("UpdateTopSite: {} not found", site.url),
            }
        }
    }

    state
}
