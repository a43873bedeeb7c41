//! Dispatch service double.

use async_trait::async_trait;
use l3vpn_common::VpnDispatchService;
use l3vpn_types::ProvisionBundle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// [`VpnDispatchService`] that records every pushed bundle.
///
/// The verdict defaults to success; `reject_pushes` flips it.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pushed: Mutex<Vec<ProvisionBundle>>,
    reject: AtomicBool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent push report failure.
    pub fn reject_pushes(&self) {
        self.reject.store(true, Ordering::SeqCst);
    }

    /// Bundles pushed so far, in order.
    pub fn pushed(&self) -> Vec<ProvisionBundle> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl VpnDispatchService for RecordingDispatcher {
    async fn push(&self, bundle: &ProvisionBundle) -> bool {
        self.pushed.lock().unwrap().push(bundle.clone());
        !self.reject.load(Ordering::SeqCst)
    }
}
