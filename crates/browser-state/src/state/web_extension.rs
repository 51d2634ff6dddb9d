/// An installed web extension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebExtensionState {
    pub id: String,
    pub name: String,
    pub url: String,
    pub enabled: bool,
}

impl WebExtensionState {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            enabled: true,
        }
    }
}
