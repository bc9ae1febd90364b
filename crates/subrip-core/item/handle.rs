//! Shared ownership of blocks between a collection and its views
//!
//! Slices of a collection hold the same handles as the collection, so an
//! edit made through either is visible through both.

// Arc<RwLock<_>> gives shared mutable access from several collections
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use super::SubRipItem;

/// Reference-counted, lock-protected block
#[derive(Debug, Clone, Default)]
pub struct ItemHandle {
    inner: Arc<RwLock<SubRipItem>>,
}

impl ItemHandle {
    pub fn new(item: SubRipItem) -> Self {
        Self {
            inner: Arc::new(RwLock::new(item)),
        }
    }

    /// Shared read access
    pub fn read(&self) -> RwLockReadGuard<'_, SubRipItem> {
        self.inner.read()
    }

    /// Exclusive write access
    pub fn write(&self) -> RwLockWriteGuard<'_, SubRipItem> {
        self.inner.write()
    }

    /// Owned copy of the current block
    #[must_use]
    pub fn snapshot(&self) -> SubRipItem {
        self.inner.read().clone()
    }

    /// Check whether two handles point at the same block
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<SubRipItem> for ItemHandle {
    fn from(item: SubRipItem) -> Self {
        Self::new(item)
    }
}
