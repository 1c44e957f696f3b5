use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::json;

use super::*;
use crate::catalog::LayerCatalogResolver;
use crate::config::{AppConfig, ConfigError};
use crate::log::{MemoryLogger, NoOpLogger};
use crate::map::{MemoryMap, Visibility};
use crate::platform::{MockPlatform, PlatformError};

const CONFIG: &str = r##"{
    "tipgUrl": "http://tipg",
    "schemaPrefix": "gunnison",
    "defaultEnabledLayers": ["road"],
    "layers": {
        "address": { "geometryType": "Point", "color": "#e41a1c", "order": 3 },
        "road": { "geometryType": "LineString", "color": "#ff6600", "order": 2 },
        "towns": { "geometryType": "Polygon", "color": "#377eb8", "order": 1 }
    }
}"##;

fn loaded(config: &str) -> LoadedLayers {
    let config = AppConfig::from_json(config).unwrap();
    LoadedLayers {
        layers: LayerCatalogResolver::new(Arc::new(NoOpLogger)).resolve(&config, None),
        default_enabled_layers: config.default_enabled_layers.clone(),
        tipg_url: config.tipg_url.clone().unwrap(),
        schema_prefix: config.schema_prefix.clone(),
    }
}

fn quiet_session<M: MapSurface>() -> MapSession<M> {
    MapSession::new(Arc::new(NoOpLogger))
}

fn ready_session() -> MapSession<MemoryMap> {
    let mut session = quiet_session();
    let token = session.begin_load();
    assert!(session.complete_load(token, Ok(loaded(CONFIG))));
    session.attach_map(MemoryMap::with_default_style());
    session.map_ready();
    session
}

#[test]
fn test_ready_session_syncs_default_layers() {
    let mut session = ready_session();

    let report = session.sync().unwrap();
    assert_eq!(report.added, vec!["road"]);

    let map = session.map().unwrap();
    assert!(map.has_source("road"));
    assert_eq!(
        map.layer_ids(),
        vec!["osm", "satellite", "terrain", "road-line"]
    );
}

#[test]
fn test_sync_runs_once_per_revision() {
    let mut session = ready_session();
    assert!(session.sync().is_some());
    assert!(session.sync().is_none());

    session.toggle_layer("towns");
    session.toggle_layer("road");
    let report = session.sync().unwrap();
    assert_eq!(report.added, vec!["towns"]);
    assert_eq!(report.removed, vec!["road"]);
    assert!(session.sync().is_none());
}

#[test]
fn test_nothing_applied_before_map_ready() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    let token = session.begin_load();
    session.complete_load(token, Ok(loaded(CONFIG)));
    session.attach_map(MemoryMap::with_default_style());

    session.toggle_layer("towns");
    assert!(session.sync().is_none());
    assert_eq!(session.map().unwrap().source_ids(), vec!["osm"]);

    session.map_ready();
    let report = session.sync().unwrap();
    assert_eq!(report.added, vec!["towns", "road"]);
}

#[test]
fn test_map_ready_before_config() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    session.attach_map(MemoryMap::with_default_style());
    session.map_ready();
    assert!(session.sync().is_none());

    let token = session.begin_load();
    session.complete_load(token, Ok(loaded(CONFIG)));
    assert_eq!(session.sync().unwrap().added, vec!["road"]);
}

#[test]
fn test_stale_load_is_discarded() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    let first = session.begin_load();
    let second = session.begin_load();
    assert!(second > first);

    let newer = CONFIG.replace(r#"["road"]"#, r#"["towns"]"#);
    assert!(session.complete_load(second, Ok(loaded(&newer))));
    assert!(!session.complete_load(first, Ok(loaded(CONFIG))));

    assert!(session.load_state().is_ready());
    assert!(session.enabled_layers().contains("towns"));
    assert!(!session.enabled_layers().contains("road"));
}

#[test]
fn test_stale_failure_does_not_clobber_ready() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    let first = session.begin_load();
    let second = session.begin_load();
    session.complete_load(second, Ok(loaded(CONFIG)));

    let failure = Err(LoadError::Config(ConfigError::Fetch {
        url: "/config.json".to_string(),
        source: PlatformError::HttpError("timeout".to_string()),
    }));
    assert!(!session.complete_load(first, failure));
    assert!(session.load_state().is_ready());
    assert_eq!(session.layers().len(), 3);
}

#[test]
fn test_failed_load_keeps_error() {
    let logger = Arc::new(MemoryLogger::new());
    let mut session: MapSession<MemoryMap> = MapSession::new(logger.clone());
    let token = session.begin_load();
    session.complete_load(
        token,
        Err(LoadError::Config(ConfigError::Fetch {
            url: "/config.json".to_string(),
            source: PlatformError::Status {
                status: 500,
                url: "/config.json".to_string(),
            },
        })),
    );

    assert!(session.load_state().error().is_some());
    assert!(session.layers().is_empty());
    assert!(logger.contains("config load failed"));
}

#[tokio::test]
async fn test_load_and_retry_through_platform() {
    let mut session: MapSession<MemoryMap> = quiet_session();

    let offline = MockPlatform::new();
    assert!(session
        .load(&offline, "http://host/config.json")
        .await
        .error()
        .is_some());

    let online = MockPlatform::new()
        .with_body("http://host/config.json", CONFIG)
        .with_body(
            "http://tipg/collections",
            r#"{"collections": [{"id": "gunnison.road"}, {"id": "gunnison.towns"}]}"#,
        );
    assert!(session
        .load(&online, "http://host/config.json")
        .await
        .is_ready());
    assert_eq!(session.layers().ids(), vec!["towns", "road"]);
}

#[test]
fn test_base_map_selected_before_ready_is_applied() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    session.attach_map(MemoryMap::with_default_style());
    session.set_base_map(BaseMapType::Satellite);
    assert_eq!(
        session.map().unwrap().visibility("osm"),
        Some(Visibility::Visible)
    );

    session.map_ready();
    let map = session.map().unwrap();
    assert_eq!(map.visibility("osm"), Some(Visibility::Hidden));
    assert_eq!(map.visibility("satellite"), Some(Visibility::Visible));
    assert_eq!(map.visibility("terrain"), Some(Visibility::Hidden));
}

#[test]
fn test_set_base_map_after_ready() {
    let mut session = ready_session();
    session.set_base_map(BaseMapType::Terrain);
    session.set_base_map(BaseMapType::Terrain);

    assert_eq!(session.base_map(), BaseMapType::Terrain);
    let map = session.map().unwrap();
    assert_eq!(map.visibility("terrain"), Some(Visibility::Visible));
    assert_eq!(map.visibility("osm"), Some(Visibility::Hidden));
}

#[test]
fn test_go_to_requires_map() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    assert!(!session.go_to("gunnison"));

    session.attach_map(MemoryMap::new());
    assert!(session.go_to("gunnison"));
    assert!(!session.go_to("aspen"));
    assert_eq!(session.map().unwrap().camera_history().len(), 1);
    assert_eq!(
        session.map().unwrap().camera_history()[0].center,
        crate::config::find_location("gunnison").unwrap().center
    );
}

#[test]
fn test_click_selects_and_close_clears() {
    let mut session = ready_session();
    session.sync();

    let at = ScreenPoint::new(50.0, 50.0);
    let mut props = IndexMap::new();
    props.insert("NAME".to_string(), json!("US 50"));
    session
        .map_mut()
        .unwrap()
        .place_feature("road-line", at, props);

    let picked = session.click(at, LngLat::new(-106.9, 38.5)).cloned().unwrap();
    assert_eq!(picked.base_layer_id(), "road");

    // A miss keeps the open popup.
    let kept = session.click(ScreenPoint::new(500.0, 500.0), LngLat::new(-107.0, 38.0));
    assert_eq!(kept, Some(&picked));

    session.close_popup();
    assert!(session.selected_feature().is_none());
}

#[test]
fn test_pointer_move_sets_cursor() {
    let mut session = ready_session();
    session.sync();
    let at = ScreenPoint::new(10.0, 10.0);
    session
        .map_mut()
        .unwrap()
        .place_feature("road-line", at, IndexMap::new());

    assert_eq!(session.pointer_move(at), Cursor::Pointer);
    assert_eq!(session.cursor(), Cursor::Pointer);

    session.toggle_layer("road");
    session.sync();
    assert_eq!(session.pointer_move(at), Cursor::Default);
}

#[test]
fn test_pointer_ignored_before_ready() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    session.attach_map(MemoryMap::with_default_style());
    assert_eq!(session.pointer_move(ScreenPoint::new(1.0, 1.0)), Cursor::Default);
    assert!(session
        .click(ScreenPoint::new(1.0, 1.0), LngLat::new(0.0, 0.0))
        .is_none());
    assert_eq!(session.map().unwrap().query_count(), 0);
}

#[test]
fn test_resync_retries_failed_layer() {
    let mut session = ready_session();
    session.map_mut().unwrap().fail_source("road");
    let report = session.sync().unwrap();
    assert_eq!(report.failed.len(), 1);
    assert!(session.sync().is_none());

    session.map_mut().unwrap().clear_failures();
    let report = session.resync().unwrap();
    assert_eq!(report.added, vec!["road"]);
}

#[test]
fn test_drop_releases_map_and_subscriptions() {
    let mut map = MemoryMap::with_default_style();
    {
        let mut session: MapSession<&mut MemoryMap> = quiet_session();
        session.attach_map(&mut map);
        assert_eq!(session.map().unwrap().active_subscriptions(), 3);
    }
    assert!(map.is_released());
    assert_eq!(map.active_subscriptions(), 0);
}

#[test]
fn test_attach_replaces_previous_map() {
    let mut first = MemoryMap::with_default_style();
    let mut second = MemoryMap::with_default_style();
    {
        let mut session: MapSession<&mut MemoryMap> = quiet_session();
        session.attach_map(&mut first);
        session.map_ready();
        session.attach_map(&mut second);
        assert!(!session.is_map_ready());
    }
    assert!(first.is_released());
    assert!(second.is_released());
}

#[test]
fn test_detach_does_not_release() {
    let mut session: MapSession<MemoryMap> = quiet_session();
    session.attach_map(MemoryMap::new());
    let map = session.detach_map().unwrap();
    assert!(!map.is_released());
    assert_eq!(map.active_subscriptions(), 0);
    assert!(session.map().is_none());
}

fn reload(session: &mut MapSession<MemoryMap>, config: &str) {
    let token = session.begin_load();
    assert!(session.complete_load(token, Ok(loaded(config))));
}

#[test]
fn test_reload_removes_layer_hidden_by_new_config() {
    let mut session = ready_session();
    session.sync();
    assert!(session.map().unwrap().has_source("road"));

    let hidden = CONFIG
        .replace(r#"["road"]"#, "[]")
        .replace(r#""schemaPrefix""#, r#""hiddenCollections": ["road"], "schemaPrefix""#);
    reload(&mut session, &hidden);

    let report = session.sync().unwrap();
    assert_eq!(report.removed, vec!["road"]);
    assert!(report.added.is_empty());
    assert_eq!(session.layers().ids(), vec!["towns", "address"]);

    let map = session.map().unwrap();
    assert!(!map.has_source("road"));
    assert!(!map.has_layer("road-line"));
    assert_eq!(map.layer_ids(), vec!["osm", "satellite", "terrain"]);
}

#[test]
fn test_reload_with_new_tipg_url_rebuilds_sources() {
    let mut session = ready_session();
    session.sync();

    let moved = CONFIG.replace(r#""http://tipg""#, r#""http://tipg-new""#);
    reload(&mut session, &moved);

    let report = session.sync().unwrap();
    assert_eq!(report.removed, vec!["road"]);
    assert_eq!(report.added, vec!["road"]);
    assert_eq!(
        session.map().unwrap().source("road").unwrap().tiles(),
        ["http://tipg-new/collections/gunnison.road/tiles/WebMercatorQuad/{z}/{x}/{y}"
            .to_string()]
    );
}

#[test]
fn test_reload_with_same_config_leaves_map_alone() {
    let mut session = ready_session();
    session.sync();
    let before = session.map().unwrap().layers().to_vec();

    reload(&mut session, CONFIG);

    let report = session.sync().unwrap();
    assert!(report.is_noop());
    assert_eq!(session.map().unwrap().layers(), before.as_slice());
}
