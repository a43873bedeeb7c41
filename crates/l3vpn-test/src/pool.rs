//! Shared identifier pool double.

use async_trait::async_trait;
use l3vpn_common::ResourcePool;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory [`ResourcePool`]: a monotonic counter over a reserved
/// range, with released ids kept aside for inspection.
///
/// Released ids are not handed out again; the contract only promises
/// no reuse of live ids, and tests assert on the release log.
#[derive(Debug, Default)]
pub struct CountingPool {
    state: Mutex<PoolState>,
    fail_allocations: AtomicBool,
}

#[derive(Debug, Default)]
struct PoolState {
    range: Option<(u64, u64)>,
    next: u64,
    released: BTreeSet<u64>,
}

impl CountingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `allocate` fail, simulating an exhausted
    /// or unreachable pool.
    pub fn fail_allocations(&self) {
        self.fail_allocations.store(true, Ordering::SeqCst);
    }

    /// Number of ids drawn so far (released or not).
    pub fn allocated_count(&self) -> u64 {
        let state = self.state.lock().unwrap();
        match state.range {
            Some((low, _)) => state.next - low,
            None => 0,
        }
    }

    /// Ids returned through `release`, in ascending order.
    pub fn released_ids(&self) -> Vec<u64> {
        self.state
            .lock()
            .unwrap()
            .released
            .iter()
            .copied()
            .collect()
    }
}

#[async_trait]
impl ResourcePool for CountingPool {
    async fn reserve(&self, low: u64, high: u64) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.range.is_some() {
            return false;
        }
        state.range = Some((low, high));
        state.next = low;
        true
    }

    async fn allocate(&self) -> Option<u64> {
        if self.fail_allocations.load(Ordering::SeqCst) {
            return None;
        }
        let mut state = self.state.lock().unwrap();
        let (_, high) = state.range?;
        if state.next > high {
            return None;
        }
        let id = state.next;
        state.next += 1;
        Some(id)
    }

    async fn release(&self, id: u64) {
        self.state.lock().unwrap().released.insert(id);
    }
}
