use browser_engine::{Engine, EngineSessionState, HeadlessEngine};
use browser_state::state::Bitmap;
use browser_state::{
    BrowserState, ContentAction, EngineAction, MemoryLevel, Store, SystemAction, TabListAction,
    TabSessionState,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

fn tab(id: &str) -> TabSessionState {
    TabSessionState::new(format!("https://{}.example.com", id)).with_id(id)
}

#[test]
fn test_removing_selected_normal_tab_selects_nearby_normal_tab() {
    let mut store = Store::new(BrowserState::with_tabs(
        vec![tab("a"), tab("b"), tab("c").private(true)],
        Some("b"),
    ));

    store.dispatch(TabListAction::remove_tab("b")).unwrap();

    let state = store.state();
    let ids: Vec<_> = state.tabs.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(state.selected_tab_id.as_deref(), Some("a"));
}

#[test]
fn test_removing_only_private_tab_clears_selection() {
    let mut store = Store::new(BrowserState::with_tabs(
        vec![tab("a").private(true)],
        Some("a"),
    ));

    store.dispatch(TabListAction::remove_tab("a")).unwrap();

    let state = store.state();
    assert!(state.tabs.is_empty());
    assert_eq!(state.selected_tab_id, None);
}

#[test]
fn test_update_url_touches_nothing_else() {
    let initial = BrowserState::with_tabs(vec![tab("a"), tab("b")], Some("a"));
    let mut store = Store::new(initial.clone());

    store
        .dispatch(ContentAction::UpdateUrl {
            tab_id: "b".to_string(),
            url: "https://example.com".to_string(),
        })
        .unwrap();

    let mut expected = initial;
    expected.tabs[1].content.url = "https://example.com".to_string();
    assert_eq!(*store.state(), expected);
}

#[test]
fn test_link_then_suspend_snapshot() {
    let engine = HeadlessEngine::new();
    let mut store = Store::new(BrowserState::with_tabs(vec![tab("a")], Some("a")));

    store
        .dispatch(EngineAction::link("a", engine.create_session(false, None)))
        .unwrap();
    let linked = store.state().tabs[0].engine_state.clone();
    assert!(linked.engine_session.is_some());
    assert_eq!(linked.engine_session_state, None);

    let snapshot = EngineSessionState::new(json!({"history": ["https://a.example.com"]}));
    store.dispatch(EngineAction::unlink("a")).unwrap();
    store
        .dispatch(EngineAction::UpdateEngineSessionState {
            tab_id: "a".to_string(),
            state: snapshot.clone(),
        })
        .unwrap();

    let suspended = store.state().tabs[0].engine_state.clone();
    assert_eq!(suspended.engine_session, None);
    assert_eq!(suspended.engine_session_state, Some(snapshot));
}

#[test]
fn test_low_memory_keeps_selected_tab() {
    let engine = HeadlessEngine::new();
    let thumbnail = Bitmap::new(1, 1, vec![0]);
    let mut tabs = vec![tab("a"), tab("b")];
    for tab in &mut tabs {
        tab.content.thumbnail = Some(thumbnail.clone());
        tab.engine_state.engine_session = Some(engine.create_session(false, None));
    }
    let initial = BrowserState::with_tabs(tabs, Some("a"));
    let mut store = Store::new(initial.clone());

    let snapshot = EngineSessionState::new(json!({"history": []}));
    store
        .dispatch(SystemAction::LowMemory {
            level: MemoryLevel::RunningLow,
            states: HashMap::from([
                ("a".to_string(), snapshot.clone()),
                ("b".to_string(), snapshot.clone()),
            ]),
        })
        .unwrap();

    let state = store.state();
    assert_eq!(state.tabs[0], initial.tabs[0]);
    assert_eq!(state.tabs[1].content.thumbnail, None);
    assert!(state.tabs[1].engine_state.is_suspended());
}
