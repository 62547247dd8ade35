//! Integration tests against a scripted gopass binary
//!
//! A shell script standing in for `gopass` answers `ls --flat` and
//! `show -f`, which is enough to exercise the full backend without a real
//! store or GPG setup.

#![cfg(unix)]

use passbridge_gopass::GopassBackend;
use passbridge_secrets::{LATEST_REVISION, StoreBackend, StoreClient, StoreError};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn fake_gopass(dir: &TempDir, script_body: &str) -> PathBuf {
    let path = dir.path().join("gopass");
    fs::write(&path, format!("#!/bin/sh\n{script_body}")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

const STORE_SCRIPT: &str = r#"
cmd="$1"
shift
case "$cmd" in
ls)
    printf 'infra/db/password\ninfra/db/user\ninfra/db/nested/x\nweb/api/token\n'
    ;;
show)
    [ "$1" = "-f" ] && shift
    rev=""
    if [ "$1" = "--revision" ]; then
        rev="$2"
        shift 2
    fi
    case "$1" in
    infra/db/password)
        if [ -n "$rev" ]; then
            printf 'old-secret\n'
        else
            printf 'secret1\nuser: alice\nurl: postgres://db:5432/app\n'
        fi
        ;;
    infra/db/user)
        printf 'alice\n'
        ;;
    web/api/token)
        printf 'tok-123\n'
        ;;
    *)
        echo "Error: $1 is not in the password store" >&2
        exit 1
        ;;
    esac
    ;;
*)
    echo "Error: unknown command $cmd" >&2
    exit 2
    ;;
esac
"#;

fn client_over(script: &str, dir: &TempDir) -> StoreClient {
    let binary = fake_gopass(dir, script);
    StoreClient::new(Arc::new(GopassBackend::with_binary(
        binary.to_string_lossy().into_owned(),
    )))
}

#[tokio::test]
async fn open_probes_the_store() {
    let dir = TempDir::new().unwrap();
    let binary = fake_gopass(&dir, STORE_SCRIPT);
    let backend = GopassBackend::with_binary(binary.to_string_lossy().into_owned());
    assert!(backend.open().await.is_ok());
}

#[tokio::test]
async fn broken_store_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let client = client_over("echo 'Error: password store not initialized' >&2\nexit 1\n", &dir);
    let err = client.get_secret("any/path").await.unwrap_err();
    assert!(matches!(err, StoreError::Connection { .. }));
    assert!(err.to_string().contains("not initialized"));
}

#[tokio::test]
async fn reads_password_and_fields() {
    let dir = TempDir::new().unwrap();
    let client = client_over(STORE_SCRIPT, &dir);

    let value = client.get_secret("infra/db/password").await.unwrap();
    assert_eq!(value.expose(), "secret1");

    let full = client.get_secret_full("infra/db/password").await.unwrap();
    assert_eq!(full.password().expose(), "secret1");
    assert_eq!(full.field("user").unwrap().expose(), "alice");
    assert_eq!(
        full.field("url").unwrap().expose(),
        "postgres://db:5432/app"
    );
}

#[tokio::test]
async fn missing_entry_maps_to_not_found() {
    let dir = TempDir::new().unwrap();
    let client = client_over(STORE_SCRIPT, &dir);
    let err = client.get_secret("infra/db/absent").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("infra/db/absent"));
}

#[tokio::test]
async fn listing_filters_to_immediate_children() {
    let dir = TempDir::new().unwrap();
    let client = client_over(STORE_SCRIPT, &dir);
    let children = client.list_children("infra/db").await.unwrap();
    assert_eq!(children, vec!["infra/db/password", "infra/db/user"]);
}

#[tokio::test]
async fn group_resolution_keys_by_child_name() {
    let dir = TempDir::new().unwrap();
    let client = client_over(STORE_SCRIPT, &dir);
    let result = client.get_child_values("infra/db/").await.unwrap();
    assert!(result.is_complete());
    assert_eq!(result.values()["password"].expose(), "secret1");
    assert_eq!(result.values()["user"].expose(), "alice");
    assert!(!result.values().contains_key("nested"));
}

#[tokio::test]
async fn revision_selector_reaches_the_cli() {
    let dir = TempDir::new().unwrap();
    let binary = fake_gopass(&dir, STORE_SCRIPT);
    let backend = GopassBackend::with_binary(binary.to_string_lossy().into_owned());
    let store = backend.open().await.unwrap();

    let latest = store.get("infra/db/password", LATEST_REVISION).await.unwrap();
    assert_eq!(latest.password().expose(), "secret1");

    let pinned = store.get("infra/db/password", "abc123").await.unwrap();
    assert_eq!(pinned.password().expose(), "old-secret");
}
