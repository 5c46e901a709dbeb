//! Shared helpers for reportgen-core integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use reportgen_core::sync::{CatalogSource, SyncError, SyncPolicy, SyncSettings};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory catalog copy with scriptable failures
pub struct MemorySource {
    name: String,
    contents: Mutex<Option<String>>,
    /// Number of upcoming reads that fail as unreachable
    failing_reads: AtomicUsize,
    /// Every read sleeps this long after taking its answer
    read_delay: Mutex<Duration>,
    /// Every write sleeps this long before storing
    write_delay: Mutex<Duration>,
    reject_writes: Mutex<bool>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemorySource {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            contents: Mutex::new(None),
            failing_reads: AtomicUsize::new(0),
            read_delay: Mutex::new(Duration::ZERO),
            write_delay: Mutex::new(Duration::ZERO),
            reject_writes: Mutex::new(false),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        })
    }

    pub fn with_contents(name: &str, contents: &str) -> Arc<Self> {
        let source = Self::new(name);
        source.set_contents(contents);
        source
    }

    /// A source whose every read fails
    pub fn unreachable(name: &str) -> Arc<Self> {
        let source = Self::new(name);
        source.fail_next_reads(usize::MAX);
        source
    }

    pub fn set_contents(&self, contents: &str) {
        *self.contents.lock().unwrap() = Some(contents.to_string());
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    pub fn delay_reads(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = delay;
    }

    pub fn delay_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    pub fn reject_writes(&self) {
        *self.reject_writes.lock().unwrap() = true;
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CatalogSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn read(&self) -> Result<Option<String>, SyncError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        let answer = if failing.is_ok() {
            Err(SyncError::Unreachable {
                source_name: self.describe(),
                reason: "scripted failure".to_string(),
            })
        } else {
            Ok(self.contents())
        };

        // The answer is fixed before the delay, like a response in flight
        let delay = *self.read_delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        answer
    }

    fn write(&self, contents: &str) -> Result<(), SyncError> {
        if *self.reject_writes.lock().unwrap() {
            return Err(SyncError::Write {
                source_name: self.describe(),
                reason: "read-only".to_string(),
            });
        }
        let delay = *self.write_delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.set_contents(contents);
        Ok(())
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        None
    }
}

pub fn fast_settings() -> SyncSettings {
    SyncSettings {
        remote_timeout: Duration::from_millis(500),
        startup_delay: Duration::ZERO,
        retry_delay: Duration::from_millis(10),
        retry: true,
    }
}

pub fn memory_policy(local: &Arc<MemorySource>, remote: &Arc<MemorySource>) -> SyncPolicy {
    memory_policy_with(local, remote, fast_settings())
}

pub fn memory_policy_with(
    local: &Arc<MemorySource>,
    remote: &Arc<MemorySource>,
    settings: SyncSettings,
) -> SyncPolicy {
    let local: Arc<dyn CatalogSource> = local.clone();
    let remote: Arc<dyn CatalogSource> = remote.clone();
    SyncPolicy::new(local, remote, settings)
}

/// Parse a JSON document for structural comparison
pub fn json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).expect("valid JSON")
}
