//! 服务响应与结果资源

use serde::Deserialize;

/// 单张裁剪接口的 JSON 响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleResult {
    /// 相对于服务地址的结果路径，例如 `/output/trimmed_xxx.png`
    pub image_url: String,
}

/// 批量裁剪接口的二进制响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// 一次成功请求的结果，按提交模式区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Single(SingleResult),
    Batch(BatchResult),
}

/// 本地 blob 句柄，由 `BlobStore` 创建和撤销
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobHandle {
    pub url: String,
    pub media_type: String,
    pub size: usize,
}

/// 会话持有的结果资源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultResource {
    /// 本地创建的 blob，需要撤销
    Blob {
        handle: BlobHandle,
        download_name: &'static str,
    },
    /// 服务端持有的结果，记录拼接时使用的 origin
    Remote {
        url: String,
        origin: String,
        download_name: &'static str,
    },
}

impl ResultResource {
    /// 用于展示 / 下载的地址
    pub fn href(&self) -> &str {
        match self {
            ResultResource::Blob { handle, .. } => &handle.url,
            ResultResource::Remote { url, .. } => url,
        }
    }

    pub fn download_name(&self) -> &'static str {
        match self {
            ResultResource::Blob { download_name, .. }
            | ResultResource::Remote { download_name, .. } => download_name,
        }
    }

    /// 是否为本地持有、需要撤销的资源
    pub fn is_locally_owned(&self) -> bool {
        matches!(self, ResultResource::Blob { .. })
    }

    pub fn blob_handle(&self) -> Option<&BlobHandle> {
        match self {
            ResultResource::Blob { handle, .. } => Some(handle),
            ResultResource::Remote { .. } => None,
        }
    }
}
