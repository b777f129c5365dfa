//! 错误类型
//!
//! 核心流程只使用 `TrimError`，三类错误在 ErrorClassifier 处统一成用户可见的消息。
//! 应用层（orchestrator / config / loaders）继续使用 `anyhow::Result`。

use thiserror::Error;

/// 提交流程中的错误
#[derive(Debug, Error)]
pub enum TrimError {
    /// 校验失败（网络请求之前）
    #[error("校验失败: {0}")]
    Validation(String),

    /// 网络 / 状态码 / 响应体错误
    #[error("请求 {endpoint} 失败: {failure}")]
    Transport {
        endpoint: String,
        failure: TransportFailure,
    },

    /// 无法根据响应数据创建本地资源
    #[error("结果资源错误: {0}")]
    Resource(String),
}

/// 传输层失败的具体原因
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// 连接失败等网络错误
    #[error("网络错误: {0}")]
    Network(#[source] reqwest::Error),

    /// 超过配置的请求超时
    #[error("请求超时")]
    Timeout,

    /// 非 2xx 状态码
    #[error("服务返回状态码 {status}: {message}")]
    Status { status: u16, message: String },

    /// 响应体无法解析
    #[error("响应体无法解析: {0}")]
    MalformedBody(String),

    /// 调用方在响应返回前放弃了请求
    #[error("请求已被取消")]
    Cancelled,
}

impl TrimError {
    /// 未选择任何文件
    pub fn no_files_selected() -> Self {
        TrimError::Validation("no files selected".to_string())
    }

    /// 创建传输错误
    pub fn transport(endpoint: impl Into<String>, failure: TransportFailure) -> Self {
        TrimError::Transport {
            endpoint: endpoint.into(),
            failure,
        }
    }

    /// 把 reqwest 错误归类为传输错误
    pub fn from_reqwest(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        let failure = if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_decode() {
            TransportFailure::MalformedBody(err.to_string())
        } else {
            TransportFailure::Network(err)
        };
        Self::transport(endpoint, failure)
    }

    /// 状态码（仅对状态码错误有值）
    pub fn status(&self) -> Option<u16> {
        match self {
            TrimError::Transport {
                failure: TransportFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

/// 提交流程结果类型
pub type TrimResult<T> = Result<T, TrimError>;
