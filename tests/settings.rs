use deskchat::api::ApiClient;
use deskchat::config::{Settings, Theme};
use deskchat::ui::{MemoryRenderer, ViewEvent};
use deskchat::App;
use tempfile::TempDir;

#[test]
fn theme_toggle_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let api = ApiClient::new("http://localhost:5000/api").unwrap();
    let mut app = App::new(api, Settings::default(), "default", MemoryRenderer::new())
        .with_config_path(Some(path.clone()));

    assert_eq!(app.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(app.view().events, vec![ViewEvent::Theme(Theme::Dark)]);
    assert_eq!(Settings::load_with(None, Some(path.as_path())).unwrap().theme, Theme::Dark);

    assert_eq!(app.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(Settings::load_with(None, Some(path.as_path())).unwrap().theme, Theme::Light);
}

#[test]
fn missing_config_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_with(Some(dir.path()), None).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let file = Settings::init_scoped(false, Some(dir.path()), None).unwrap();
    assert!(file.exists());
    assert!(Settings::init_scoped(false, Some(dir.path()), None).is_err());
    assert!(Settings::init_scoped(true, Some(dir.path()), None).is_ok());
}

#[test]
fn invalid_toml_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = [").unwrap();
    let err = Settings::load_with(None, Some(path.as_path())).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config TOML"));
}
