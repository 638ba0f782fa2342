use std::fs;
use std::path::PathBuf;

use haeya_sync::theme::{self, Theme};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("haeya-theme-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn save_then_load_round_trips() {
    let dir = temp_dir("round-trip");

    theme::save_theme(&dir, Theme::Dark).expect("save");

    assert_eq!(theme::load_theme(&dir), Theme::Dark);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn persisted_document_matches_the_web_client_shape() {
    let dir = temp_dir("shape");

    theme::save_theme(&dir, Theme::Dark).expect("save");

    let raw = fs::read_to_string(dir.join(theme::STORAGE_NAME)).expect("read");
    assert_eq!(raw, r#"{"state":{"theme":"dark"}}"#);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_defaults_to_light() {
    let dir = temp_dir("missing");

    assert_eq!(theme::load_theme(&dir), Theme::Light);
}

#[test]
fn corrupt_file_defaults_to_light() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join(theme::STORAGE_NAME), "not json").expect("write");

    assert_eq!(theme::load_theme(&dir), Theme::Light);
    let _ = fs::remove_dir_all(&dir);
}
