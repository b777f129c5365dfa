//! 提交上下文
//!
//! 封装"这是第几次提交、用什么模式"这一信息

use crate::models::{FocusOption, SubmissionMode};
use std::fmt::Display;

/// 提交上下文
#[derive(Debug, Clone)]
pub struct SubmitCtx {
    /// 会话内的提交序号（从1开始）
    pub seq: usize,

    pub mode: SubmissionMode,

    pub focus: FocusOption,

    /// 选择的文件数量
    pub file_count: usize,
}

impl SubmitCtx {
    pub fn new(seq: usize, mode: SubmissionMode, focus: FocusOption, file_count: usize) -> Self {
        Self {
            seq,
            mode,
            focus,
            file_count,
        }
    }
}

impl Display for SubmitCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[提交#{} 模式#{} focus#{} 文件数#{}]",
            self.seq, self.mode, self.focus, self.file_count
        )
    }
}
