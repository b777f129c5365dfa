//! 结果资源管理 - 业务能力层
//!
//! 把成功的响应转换为结果资源，并负责撤销不再使用的资源

use crate::clients::TrimClient;
use crate::error::{TrimError, TrimResult};
use crate::infrastructure::BlobStore;
use crate::models::{DispatchResult, ResultResource, SessionPhase, SubmissionMode};
use std::sync::Arc;

/// ZIP 本地文件头 / 空归档的中央目录结束标记
const ZIP_SIGNATURES: [&[u8]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];

/// 结果资源管理器
///
/// 职责：
/// - 批量结果包装成本地 blob 句柄
/// - 单张结果拼接成服务端绝对地址
/// - 撤销本地句柄，重复撤销不报错
#[derive(Clone)]
pub struct ResultManager {
    store: BlobStore,
}

impl ResultManager {
    pub fn new(store: BlobStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BlobStore {
        &self.store
    }

    /// 根据响应创建结果资源
    pub fn materialize(
        &self,
        result: DispatchResult,
        client: &TrimClient,
    ) -> TrimResult<ResultResource> {
        match result {
            DispatchResult::Single(single) => {
                let url = client.resolve(&single.image_url)?;
                Ok(ResultResource::Remote {
                    url,
                    origin: client.origin().to_string(),
                    download_name: SubmissionMode::SingleImage.download_name(),
                })
            }
            DispatchResult::Batch(batch) => {
                if batch.bytes.is_empty() {
                    return Err(TrimError::Resource("ZIP 响应体为空".to_string()));
                }
                if !ZIP_SIGNATURES.iter().any(|sig| batch.bytes.starts_with(sig)) {
                    return Err(TrimError::Resource("响应体不是有效的 ZIP 数据".to_string()));
                }
                let handle = self.store.create(batch.bytes, batch.media_type);
                Ok(ResultResource::Blob {
                    handle,
                    download_name: SubmissionMode::BatchZip.download_name(),
                })
            }
        }
    }

    /// 撤销资源；服务端资源无需处理，重复撤销为空操作
    pub fn retire(&self, resource: &ResultResource) {
        if let Some(handle) = resource.blob_handle() {
            self.store.revoke(handle);
        }
    }

    /// 写入新阶段：先撤销槽位中旧的结果，再写入
    pub fn install(&self, slot: &mut SessionPhase, next: SessionPhase) {
        if let Some(previous) = slot.result() {
            self.retire(previous);
        }
        *slot = next;
    }

    /// 读取本地资源的数据，已撤销时返回资源错误
    pub fn read_blob(&self, resource: &ResultResource) -> TrimResult<Option<Arc<[u8]>>> {
        match resource.blob_handle() {
            None => Ok(None),
            Some(handle) => self
                .store
                .read(handle)
                .map(Some)
                .ok_or_else(|| TrimError::Resource(format!("blob 已被撤销: {}", handle.url))),
        }
    }
}
