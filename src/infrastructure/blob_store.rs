//! Blob 存储 - 基础设施层
//!
//! 持有所有本地创建的二进制结果，只暴露"创建 / 读取 / 撤销"的能力

use crate::models::BlobHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

const URL_PREFIX: &str = "blob:trim-client/";

/// Blob 存储
///
/// 职责：
/// - 唯一持有 blob 数据
/// - 句柄撤销后数据立即释放，再次撤销不报错
/// - 不认识提交模式和会话
#[derive(Clone, Default)]
pub struct BlobStore {
    inner: Arc<BlobStoreInner>,
}

#[derive(Default)]
struct BlobStoreInner {
    next_id: AtomicU64,
    blobs: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, Arc<[u8]>>> {
        self.inner.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 用二进制数据创建一个新句柄
    pub fn create(&self, bytes: Vec<u8>, media_type: impl Into<String>) -> BlobHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("{}{}", URL_PREFIX, id);
        let size = bytes.len();

        self.blobs().insert(url.clone(), Arc::from(bytes));
        debug!("创建 blob {} ({} 字节)", url, size);

        BlobHandle {
            url,
            media_type: media_type.into(),
            size,
        }
    }

    /// 读取句柄对应的数据，已撤销时返回 None
    pub fn read(&self, handle: &BlobHandle) -> Option<Arc<[u8]>> {
        self.blobs().get(&handle.url).cloned()
    }

    /// 撤销句柄，返回本次是否真正撤销了数据
    pub fn revoke(&self, handle: &BlobHandle) -> bool {
        let removed = self.blobs().remove(&handle.url).is_some();
        if removed {
            debug!("撤销 blob {}", handle.url);
        }
        removed
    }

    pub fn is_live(&self, handle: &BlobHandle) -> bool {
        self.blobs().contains_key(&handle.url)
    }

    /// 当前存活的句柄数量
    pub fn live_count(&self) -> usize {
        self.blobs().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_read_revoke() {
        let store = BlobStore::new();
        let handle = store.create(vec![1, 2, 3], "application/zip");

        assert!(handle.url.starts_with("blob:"));
        assert_eq!(handle.size, 3);
        assert_eq!(store.read(&handle).as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(store.live_count(), 1);

        assert!(store.revoke(&handle));
        assert!(!store.is_live(&handle));
        assert!(store.read(&handle).is_none());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_revoke_twice_is_noop() {
        let store = BlobStore::new();
        let first = store.create(vec![1], "image/png");
        let second = store.create(vec![2], "image/png");

        assert!(store.revoke(&first));
        assert!(!store.revoke(&first));
        assert!(store.is_live(&second));
    }

    #[test]
    fn test_handles_are_unique_across_clones() {
        let store = BlobStore::new();
        let other = store.clone();
        let a = store.create(vec![], "application/zip");
        let b = other.create(vec![], "application/zip");
        assert_ne!(a.url, b.url);
        assert_eq!(store.live_count(), 2);
    }
}
