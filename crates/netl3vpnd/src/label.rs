//! Label allocator: draws shared pool ids and renders typed identifiers.

use l3vpn_common::{L3vpnError, L3vpnResult, ResourcePool};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lower bound of the cluster-wide label space.
pub const GLOBAL_LABEL_SPACE_MIN: u64 = 2049;
/// Upper bound of the cluster-wide label space.
pub const GLOBAL_LABEL_SPACE_MAX: u64 = 3073;

/// The identifier kinds drawn from the shared pool.
///
/// Kinds share one numeric counter; only the rendered prefix separates
/// the namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    RouteTarget,
    RouteDistinguisher,
    VrfName,
}

impl LabelKind {
    /// Prefix prepended to the numeric id when rendering.
    pub fn prefix(&self) -> &'static str {
        match self {
            LabelKind::RouteTarget => "100:",
            LabelKind::RouteDistinguisher => "100:",
            LabelKind::VrfName => "VRF_",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelKind::RouteTarget => "route-target",
            LabelKind::RouteDistinguisher => "route-distinguisher",
            LabelKind::VrfName => "vrf-name",
        };
        f.write_str(s)
    }
}

/// One allocation result: the raw pool id plus the rendered identifier.
///
/// The raw id is kept so a failed run can return it to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedLabel {
    pub id: u64,
    pub value: String,
}

/// Draws ids from the shared [`ResourcePool`] one at a time.
pub struct LabelAllocator {
    pool: Arc<dyn ResourcePool>,
}

impl LabelAllocator {
    pub fn new(pool: Arc<dyn ResourcePool>) -> Self {
        Self { pool }
    }

    /// Registers the global label range, cluster-wide.
    ///
    /// First writer wins; a pool that is already reserved is fine.
    pub async fn reserve_global_pool(&self) {
        if !self
            .pool
            .reserve(GLOBAL_LABEL_SPACE_MIN, GLOBAL_LABEL_SPACE_MAX)
            .await
        {
            debug!("Global label pool was already reserved");
        }
    }

    /// Draws exactly one unit and renders it for the given kind.
    pub async fn allocate(&self, kind: LabelKind) -> L3vpnResult<AllocatedLabel> {
        let id = self
            .pool
            .allocate()
            .await
            .ok_or_else(|| L3vpnError::resource_exhausted(kind.to_string()))?;
        let value = format!("{}{}", kind.prefix(), id);
        debug!("Allocated {} label {} (id {})", kind, value, id);
        Ok(AllocatedLabel { id, value })
    }

    /// Returns a drawn id to the pool during rollback.
    pub async fn release(&self, id: u64) {
        self.pool.release(id).await;
        debug!("Released label id {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l3vpn_test::CountingPool;
    use pretty_assertions::assert_eq;

    fn allocator(pool: &Arc<CountingPool>) -> LabelAllocator {
        LabelAllocator::new(Arc::clone(pool) as Arc<dyn ResourcePool>)
    }

    #[tokio::test]
    async fn test_kinds_share_one_counter() {
        let pool = Arc::new(CountingPool::new());
        let allocator = allocator(&pool);
        allocator.reserve_global_pool().await;

        let rt = allocator.allocate(LabelKind::RouteTarget).await.unwrap();
        let rd = allocator
            .allocate(LabelKind::RouteDistinguisher)
            .await
            .unwrap();
        let vrf = allocator.allocate(LabelKind::VrfName).await.unwrap();

        assert_eq!(rt.value, format!("100:{}", GLOBAL_LABEL_SPACE_MIN));
        assert_eq!(rd.value, format!("100:{}", GLOBAL_LABEL_SPACE_MIN + 1));
        assert_eq!(vrf.value, format!("VRF_{}", GLOBAL_LABEL_SPACE_MIN + 2));
        assert_eq!(pool.allocated_count(), 3);
    }

    #[tokio::test]
    async fn test_repeated_reservation_is_no_op() {
        let pool = Arc::new(CountingPool::new());
        let allocator = allocator(&pool);

        allocator.reserve_global_pool().await;
        allocator.reserve_global_pool().await;

        let label = allocator.allocate(LabelKind::RouteTarget).await.unwrap();
        assert_eq!(label.id, GLOBAL_LABEL_SPACE_MIN);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_kind() {
        let pool = Arc::new(CountingPool::new());
        let allocator = allocator(&pool);
        allocator.reserve_global_pool().await;
        pool.fail_allocations();

        let err = allocator
            .allocate(LabelKind::VrfName)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            L3vpnError::ResourceExhausted {
                kind: "vrf-name".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_release_reaches_pool() {
        let pool = Arc::new(CountingPool::new());
        let allocator = allocator(&pool);
        allocator.reserve_global_pool().await;

        let label = allocator.allocate(LabelKind::RouteTarget).await.unwrap();
        allocator.release(label.id).await;
        assert_eq!(pool.released_ids(), vec![label.id]);
    }
}
