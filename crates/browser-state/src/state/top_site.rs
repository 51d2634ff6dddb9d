use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TopSiteKind {
    /// Shipped with the browser
    Default,
    /// Pinned by the user
    Pinned,
    /// Derived from browsing history
    #[default]
    Frecent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopSite {
    pub title: String,
    pub url: String,
    pub kind: TopSiteKind,
}

impl TopSite {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: TopSiteKind) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind,
        }
    }
}
