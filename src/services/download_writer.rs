//! 下载写入服务 - 业务能力层
//!
//! 只负责"把结果写到输出目录"能力，不关心结果从哪里来

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 下载写入服务
pub struct DownloadWriter {
    output_dir: PathBuf,
}

impl DownloadWriter {
    /// 创建新的下载写入服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写入结果文件
    ///
    /// # 参数
    /// - `download_name`: 固定的下载文件名
    /// - `bytes`: 文件内容
    ///
    /// # 返回
    /// 返回写入后的完整路径
    pub async fn write(&self, download_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.output_dir.display()))?;

        let path = self.output_dir.join(download_name);
        debug!("写入下载文件: {} ({} 字节)", path.display(), bytes.len());

        fs::write(&path, bytes)
            .await
            .with_context(|| format!("无法写入文件: {}", path.display()))?;

        Ok(path)
    }
}
