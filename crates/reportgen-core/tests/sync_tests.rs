//! Startup and on-demand synchronization of the options catalog

mod common;

use common::{fast_settings, json, memory_policy, memory_policy_with, MemorySource};
use reportgen_core::sync::{CatalogOrigin, SyncError, SyncOutcome, SyncSettings};
use reportgen_core::{AddOutcome, ConnectionState, OptionsStore};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn test_local_copy_survives_unreachable_remote() {
    let local = MemorySource::with_contents("local", r#"{"a": 1}"#);
    let remote = MemorySource::unreachable("remote");
    let store = OptionsStore::open(memory_policy(&local, &remote));

    assert_eq!(store.connection_state(), ConnectionState::OfflineLocal);

    let outcome = store.sync_with_retry();
    assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Unreachable { .. })));

    // Both the first attempt and the retry were made
    assert_eq!(remote.reads(), 2);
    assert_eq!(store.connection_state(), ConnectionState::OfflineLocal);
    assert_eq!(store.status().source, CatalogOrigin::Local);
    assert_eq!(
        json(&store.snapshot().to_json_pretty().unwrap()),
        json(r#"{"a": 1}"#)
    );
    assert_eq!(json(&local.contents().unwrap()), json(r#"{"a": 1}"#));
}

#[test]
fn test_remote_adopted_and_backed_up() {
    let local = MemorySource::new("local");
    let remote = MemorySource::with_contents("remote", r#"{"b": 2}"#);
    let store = OptionsStore::open(memory_policy(&local, &remote));

    assert_eq!(store.connection_state(), ConnectionState::OfflineEmpty);

    let outcome = store.sync_now();
    assert_eq!(outcome, SyncOutcome::Synced { backup: Ok(()) });
    assert_eq!(store.connection_state(), ConnectionState::Online);
    assert!(store.last_synced_at().is_some());
    assert!(store.has_options("b"));
    assert_eq!(json(&local.contents().unwrap()), json(r#"{"b": 2}"#));
}

#[test]
fn test_retry_recovers_from_one_failure() {
    let local = MemorySource::new("local");
    let remote = MemorySource::with_contents("remote", r#"{"size": {"options": ["M"]}}"#);
    remote.fail_next_reads(1);
    let store = OptionsStore::open(memory_policy(&local, &remote));

    assert!(store.sync_with_retry().is_synced());
    assert_eq!(remote.reads(), 2);
    assert_eq!(store.get_options("size", None), vec!["M"]);
}

#[test]
fn test_no_retry_when_disabled() {
    let local = MemorySource::new("local");
    let remote = MemorySource::unreachable("remote");
    let settings = SyncSettings {
        retry: false,
        ..fast_settings()
    };
    let store = OptionsStore::open(memory_policy_with(&local, &remote, settings));

    assert!(!store.sync_with_retry().is_synced());
    assert_eq!(remote.reads(), 1);
    assert_eq!(store.connection_state(), ConnectionState::OfflineEmpty);
}

#[test]
fn test_slow_remote_times_out() {
    let local = MemorySource::with_contents("local", r#"{"a": 1}"#);
    let remote = MemorySource::with_contents("remote", r#"{"b": 2}"#);
    remote.delay_reads(Duration::from_secs(5));
    let settings = SyncSettings {
        remote_timeout: Duration::from_millis(100),
        ..fast_settings()
    };
    let store = OptionsStore::open(memory_policy_with(&local, &remote, settings));

    let started = Instant::now();
    let outcome = store.sync_now();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Timeout { .. })));
    assert_eq!(store.connection_state(), ConnectionState::OfflineLocal);
    assert!(store.has_options("a"));
    assert!(!store.has_options("b"));
}

#[test]
fn test_malformed_remote_keeps_catalog() {
    let local = MemorySource::with_contents("local", r#"{"a": 1}"#);
    let remote = MemorySource::with_contents("remote", "[1, 2, 3]");
    let store = OptionsStore::open(memory_policy(&local, &remote));

    let outcome = store.sync_now();
    assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Malformed { .. })));
    assert!(store.has_options("a"));
    assert_eq!(local.writes(), 0);
}

#[test]
fn test_absent_remote_is_failure() {
    let local = MemorySource::new("local");
    let remote = MemorySource::new("remote");
    let store = OptionsStore::open(memory_policy(&local, &remote));

    assert!(matches!(
        store.sync_now(),
        SyncOutcome::Failed(SyncError::Absent { .. })
    ));
    assert_eq!(store.connection_state(), ConnectionState::OfflineEmpty);
}

#[test]
fn test_unusable_local_copy_starts_empty() {
    let local = MemorySource::with_contents("local", "not json at all");
    let remote = MemorySource::unreachable("remote");
    let store = OptionsStore::open(memory_policy(&local, &remote));

    assert_eq!(store.connection_state(), ConnectionState::OfflineEmpty);
    assert!(store.snapshot().is_empty());
}

#[test]
fn test_backup_failure_still_goes_online() {
    let local = MemorySource::new("local");
    local.reject_writes();
    let remote = MemorySource::with_contents("remote", r#"{"b": 2}"#);
    let store = OptionsStore::open(memory_policy(&local, &remote));

    match store.sync_now() {
        SyncOutcome::Synced { backup } => assert!(backup.is_err()),
        other => panic!("Expected Synced, got {:?}", other),
    }
    assert_eq!(store.connection_state(), ConnectionState::Online);
}

#[test]
fn test_background_sync_notifies_observers() {
    let local = MemorySource::new("local");
    let remote = MemorySource::with_contents("remote", r#"{"b": 2}"#);
    let store = Arc::new(OptionsStore::open(memory_policy(&local, &remote)));
    let updates = store.subscribe();

    let handle = store.spawn_remote_sync().unwrap();
    assert!(handle.join().unwrap().is_synced());

    let last = updates.try_iter().last().unwrap();
    assert_eq!(last.state, ConnectionState::Online);
    assert_eq!(last.source, CatalogOrigin::Remote);
}

#[test]
fn test_reads_served_while_remote_is_slow() {
    let local = MemorySource::with_contents("local", r#"{"size": {"options": ["S"]}}"#);
    let remote = MemorySource::with_contents("remote", r#"{"size": {"options": ["L"]}}"#);
    remote.delay_reads(Duration::from_millis(300));
    let store = Arc::new(OptionsStore::open(memory_policy(&local, &remote)));

    let handle = store.spawn_remote_sync().unwrap();

    // The local copy answers immediately while the fetch is in flight
    let started = Instant::now();
    assert_eq!(store.get_options("size", None), vec!["S"]);
    assert!(started.elapsed() < Duration::from_millis(200));

    assert!(handle.join().unwrap().is_synced());
    assert_eq!(store.get_options("size", None), vec!["L"]);
}

#[test]
fn test_concurrent_adds_and_sync_keep_catalog_valid() {
    let local = MemorySource::new("local");
    let remote = MemorySource::with_contents("remote", r#"{"size": {"options": ["M"]}}"#);
    let store = Arc::new(OptionsStore::open(memory_policy(&local, &remote)));

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..10 {
                    store.add_option("size", &format!("V{}-{}", i, j), None);
                }
            })
        })
        .collect();
    let sync = store.spawn_remote_sync().unwrap();

    for writer in writers {
        writer.join().unwrap();
    }
    assert!(sync.join().unwrap().is_synced());

    // Whatever interleaving happened, both copies hold a parseable catalog
    // equal to the final in-memory state.
    let final_json = json(&store.snapshot().to_json_pretty().unwrap());
    assert_eq!(json(&local.contents().unwrap()), final_json);
    assert_eq!(json(&remote.contents().unwrap()), final_json);

    // No add is lost to the remote swap
    let sizes = store.get_options("size", None);
    for i in 0..4 {
        for j in 0..10 {
            let value = format!("V{}-{}", i, j);
            assert!(sizes.contains(&value), "missing {}", value);
        }
    }
}

#[test]
fn test_add_during_remote_fetch_survives_swap() {
    let local = MemorySource::new("local");
    let remote = MemorySource::with_contents("remote", r#"{"size": {"options": ["S"]}}"#);
    remote.delay_reads(Duration::from_millis(300));
    let settings = SyncSettings {
        remote_timeout: Duration::from_secs(2),
        ..fast_settings()
    };
    let store = Arc::new(OptionsStore::open(memory_policy_with(&local, &remote, settings)));

    let sync = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || store.sync_now())
    };
    // Let the fetch take its answer, then add while it is still in flight
    std::thread::sleep(Duration::from_millis(100));
    assert!(store.add_option("size", "XL", None).is_added());

    assert!(sync.join().unwrap().is_synced());
    assert!(store.get_options("size", None).contains(&"XL".to_string()));

    let final_json = json(&store.snapshot().to_json_pretty().unwrap());
    assert_eq!(json(&local.contents().unwrap()), final_json);
    assert_eq!(json(&remote.contents().unwrap()), final_json);
}

#[test]
fn test_slow_remote_write_is_bounded() {
    let local = MemorySource::with_contents("local", r#"{"size": {"options": ["S"]}}"#);
    let remote = MemorySource::with_contents("remote", r#"{"size": {"options": ["S"]}}"#);
    remote.delay_writes(Duration::from_secs(2));
    let settings = SyncSettings {
        remote_timeout: Duration::from_millis(100),
        ..fast_settings()
    };
    let store = OptionsStore::open(memory_policy_with(&local, &remote, settings));

    let started = Instant::now();
    let outcome = store.add_option("size", "M", None);

    assert!(started.elapsed() < Duration::from_secs(1));
    match outcome {
        AddOutcome::Added { persist } => {
            assert!(persist.local.is_ok());
            assert!(matches!(persist.remote, Err(SyncError::Timeout { .. })));
        }
        other => panic!("expected Added, got {:?}", other),
    }
    assert!(store.get_options("size", None).contains(&"M".to_string()));
    assert!(local.contents().unwrap().contains("\"M\""));
}
