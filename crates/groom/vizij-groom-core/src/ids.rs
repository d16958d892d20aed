//! Identifiers and a simple allocator for bundles.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BundleId(pub u32);

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bundle#{}", self.0)
    }
}

/// Monotonic allocator for BundleId.
/// Ids are never reused within one asset, so an edit overlay can refer to the
/// same bundle as its base counterpart.
#[derive(Clone, Default, Debug)]
pub struct IdAllocator {
    next_bundle: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator that continues after the highest id in `used`.
    pub fn after<I: IntoIterator<Item = BundleId>>(used: I) -> Self {
        let next_bundle = used
            .into_iter()
            .map(|id| id.0.wrapping_add(1))
            .max()
            .unwrap_or(0);
        Self { next_bundle }
    }

    #[inline]
    pub fn alloc_bundle(&mut self) -> BundleId {
        let id = BundleId(self.next_bundle);
        self.next_bundle = self.next_bundle.wrapping_add(1);
        id
    }
}
