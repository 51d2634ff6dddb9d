//! Actions module
//!
//! Actions are grouped by the slice of [`BrowserState`](crate::state::BrowserState)
//! they act on. The root [`Action`] enum tags each family so reducers and
//! middleware can match exhaustively.

pub mod content;
pub mod crash;
pub mod custom_tab_list;
pub mod download;
pub mod engine;
pub mod media;
pub mod reader;
pub mod system;
pub mod tab_list;
pub mod top_site;
pub mod web_extension;

pub use content::ContentAction;
pub use crash::CrashAction;
pub use custom_tab_list::CustomTabListAction;
pub use download::DownloadAction;
pub use engine::EngineAction;
pub use media::MediaAction;
pub use reader::ReaderAction;
pub use system::{MemoryLevel, SystemAction};
pub use tab_list::TabListAction;
pub use top_site::TopSiteAction;
pub use web_extension::WebExtensionAction;

/// Root action enum - tagged by action family
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TabList(TabListAction),
    CustomTabList(CustomTabListAction),
    Content(ContentAction),
    Engine(EngineAction),
    Reader(ReaderAction),
    Crash(CrashAction),
    System(SystemAction),
    Download(DownloadAction),
    Media(MediaAction),
    TopSite(TopSiteAction),
    WebExtension(WebExtensionAction),
}

macro_rules! impl_from_family {
    ($($family:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$family> for Action {
                fn from(action: $family) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_family! {
    TabListAction => TabList,
    CustomTabListAction => CustomTabList,
    ContentAction => Content,
    EngineAction => Engine,
    ReaderAction => Reader,
    CrashAction => Crash,
    SystemAction => System,
    DownloadAction => Download,
    MediaAction => Media,
    TopSiteAction => TopSite,
    WebExtensionAction => WebExtension,
}
