//! Integration tests for the profile store and the shared loader config
//!
//! These tests verify:
//! - Profile create/list round-trips preserving mod order
//! - Overwrite-on-create (last writer wins)
//! - Idempotent repository addition to the loader config
//! - Unrelated loader-config fields surviving the rewrite

use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use tmtoolkit::LoaderConfig;
use tmtoolkit::services::{ProfileStore, add_server_if_absent};

fn profile_store() -> (TempDir, ProfileStore) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().join("profiles")).unwrap();
    (temp_dir, ProfileStore::new(dir))
}

#[test]
fn test_profile_round_trip() {
    let (_temp_dir, store) = profile_store();

    store.create("x", &["M1", "M2"], None, "desc").unwrap();

    let profiles = store.list().unwrap();
    let profile = profiles.get("x.yaml").unwrap();

    assert_eq!(profile.program.id, "TmForever");
    assert_eq!(profile.description, "desc");
    assert_eq!(profile.args, None);
    let mod_ids: Vec<&str> = profile.mods.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(mod_ids, vec!["M1", "M2"]);
}

#[test]
fn test_profile_round_trip_with_args() {
    let (_temp_dir, store) = profile_store();

    store
        .create("windowed", &["CoreMod"], Some("/nosplash"), "windowed mode")
        .unwrap();

    let profiles = store.list().unwrap();
    let profile = profiles.get("windowed.yaml").unwrap();
    assert_eq!(profile.args.as_deref(), Some("/nosplash"));
}

#[test]
fn test_create_is_last_writer_wins() {
    let (_temp_dir, store) = profile_store();

    store.create("p", &["Old"], Some("-old"), "old").unwrap();
    store.create("p", &["New"], None, "new").unwrap();

    let profiles = store.list().unwrap();
    assert_eq!(profiles.len(), 1);
    let profile = profiles.get("p.yaml").unwrap();
    assert_eq!(profile.mods[0].id, "New");
    assert_eq!(profile.args, None);
    assert_eq!(profile.description, "new");
}

#[test]
fn test_add_server_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().join("config.yaml")).unwrap();
    fs::write(&config_path, "servers:\n- https://base/repo\n").unwrap();

    assert!(add_server_if_absent(&config_path, "https://example/repo").unwrap());
    assert!(!add_server_if_absent(&config_path, "https://example/repo").unwrap());

    let config: LoaderConfig =
        serde_yaml_ng::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    let occurrences = config
        .servers
        .iter()
        .filter(|s| *s == "https://example/repo")
        .count();
    assert_eq!(occurrences, 1);
    // The pre-existing entry is still first.
    assert_eq!(config.servers[0], "https://base/repo");
}

#[test]
fn test_add_server_preserves_unrelated_fields() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().join("config.yaml")).unwrap();
    fs::write(
        &config_path,
        "servers:\n- https://base/repo\ninstall: C:/Foo\nautostart: true\n",
    )
    .unwrap();

    add_server_if_absent(&config_path, "https://example/repo").unwrap();

    let rewritten = fs::read_to_string(&config_path).unwrap();
    assert!(rewritten.contains("install: C:/Foo"));
    assert!(rewritten.contains("autostart: true"));

    let config: LoaderConfig = serde_yaml_ng::from_str(&rewritten).unwrap();
    assert_eq!(config.servers.len(), 2);
}

#[test]
fn test_add_server_skips_write_when_present() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().join("config.yaml")).unwrap();
    // Comment would be lost by a rewrite; its survival proves no write happened.
    let original = "# hand-edited\nservers:\n- https://example/repo\n";
    fs::write(&config_path, original).unwrap();

    assert!(!add_server_if_absent(&config_path, "https://example/repo").unwrap());
    assert_eq!(fs::read_to_string(&config_path).unwrap(), original);
}
