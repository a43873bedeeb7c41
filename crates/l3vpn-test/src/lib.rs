//! Test doubles for the netl3vpn service contracts.
//!
//! Provides in-memory implementations of every consumed contract:
//!
//! - [`MockDeviceService`]: configurable device inventory and port map
//! - [`CountingPool`]: atomic counter over a reserved range
//! - [`RecordingDispatcher`]: captures pushed bundles with a
//!   configurable verdict
//!
//! [`MemoryStore`] is re-exported from `l3vpn-common`; its
//! read-your-own-write semantics serve tests and daemons alike.

mod devices;
mod dispatch;
mod pool;

pub use devices::MockDeviceService;
pub use dispatch::RecordingDispatcher;
pub use l3vpn_common::MemoryStore;
pub use pool::CountingPool;
