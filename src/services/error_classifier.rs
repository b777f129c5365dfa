//! 错误分类 - 业务能力层
//!
//! 把三类内部错误归一为两类用户可见消息

use crate::error::TrimError;
use crate::models::{ErrorCategory, UserFacingError};

pub const VALIDATION_MESSAGE: &str = "请选择要处理的图片文件。";
pub const TRANSPORT_MESSAGE: &str = "上传失败，请稍后重试。";

/// 错误分类器
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 资源错误与传输错误对用户展示相同的消息
    pub fn classify(&self, err: &TrimError) -> UserFacingError {
        let (category, message) = match err {
            TrimError::Validation(_) => (ErrorCategory::Validation, VALIDATION_MESSAGE),
            TrimError::Transport { .. } | TrimError::Resource(_) => {
                (ErrorCategory::Transport, TRANSPORT_MESSAGE)
            }
        };

        UserFacingError {
            category,
            message: message.to_string(),
            detail: err.to_string(),
        }
    }
}
