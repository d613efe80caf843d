//! Shared test doubles: a scripted storage backend and a recording sink.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use cdnlift_backend::{
    BackendError, StorageBackend, UploadFuture, UploadReceipt, UploadToken, upload_scope,
};

use crate::error::DeployError;
use crate::reporter::{ProgressSink, ProgressUpdate};
use crate::types::{EmittedAsset, UploadTask};

/// Builds tasks rooted at the resolved path `h`, in the given order.
pub(crate) fn make_tasks(names: &[&str]) -> Vec<UploadTask> {
    names
        .iter()
        .map(|name| {
            let asset = EmittedAsset {
                name: (*name).to_string(),
                source_path: PathBuf::from(format!("/dist/{name}")),
                emitted: true,
            };
            UploadTask::new(&asset, "h")
        })
        .collect()
}

/// Backend double with per-key scripted failures and an in-flight
/// high-water mark for concurrency-bound assertions.
pub(crate) struct ScriptedBackend {
    delay_ms: u64,
    /// key -> remaining failures (`usize::MAX` = fail forever).
    fail: Mutex<HashMap<String, usize>>,
    signed: Mutex<Vec<String>>,
    uploads: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::with_delay(0)
    }

    pub(crate) fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: Mutex::new(HashMap::new()),
            signed: Mutex::new(Vec::new()),
            uploads: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Makes the next `times` uploads of `key` fail.
    pub(crate) fn fail_times(&self, key: &str, times: usize) {
        self.fail.lock().unwrap().insert(key.to_string(), times);
    }

    pub(crate) fn fail_forever(&self, key: &str) {
        self.fail_times(key, usize::MAX);
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn signed_scopes(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }
}

impl StorageBackend for ScriptedBackend {
    fn sign(&self, bucket: &str, key: &str) -> UploadToken {
        let scope = upload_scope(bucket, key);
        self.signed.lock().unwrap().push(scope.clone());
        UploadToken::new(scope, "test-signature")
    }

    fn upload(&self, _token: &UploadToken, key: &str, _source_path: &Path) -> UploadFuture<'_> {
        let key = key.to_string();
        Box::pin(async move {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            } else {
                tokio::task::yield_now().await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let should_fail = {
                let mut fail = self.fail.lock().unwrap();
                match fail.get_mut(&key) {
                    Some(n) if *n > 0 => {
                        if *n != usize::MAX {
                            *n -= 1;
                        }
                        true
                    }
                    _ => false,
                }
            };

            if should_fail {
                Err(BackendError::Transport(format!("injected failure for {key}")))
            } else {
                Ok(UploadReceipt { key, hash: None })
            }
        })
    }
}

/// Sink that records every update and finish call.
#[derive(Default)]
pub(crate) struct RecordingSink {
    updates: Mutex<Vec<ProgressUpdate>>,
    finishes: Mutex<Vec<Option<String>>>,
}

impl RecordingSink {
    pub(crate) fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn finishes(&self) -> Vec<Option<String>> {
        self.finishes.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn update(&self, progress: ProgressUpdate) {
        self.updates.lock().unwrap().push(progress);
    }

    fn finish(&self, error: Option<&DeployError>) {
        self.finishes
            .lock()
            .unwrap()
            .push(error.map(|e| e.to_string()));
    }
}
