//! 提交选项：裁剪重点与提交模式

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 裁剪重点，作为 `focus` 查询参数随每个请求发送
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusOption {
    /// 全身
    #[default]
    Full,
    /// 上半身（上衣）
    Upper,
    /// 下半身（裤装、裙装）
    Lower,
}

impl FocusOption {
    pub const ALL: [FocusOption; 3] = [FocusOption::Full, FocusOption::Upper, FocusOption::Lower];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusOption::Full => "full",
            FocusOption::Upper => "upper",
            FocusOption::Lower => "lower",
        }
    }
}

impl fmt::Display for FocusOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(FocusOption::Full),
            "upper" => Ok(FocusOption::Upper),
            "lower" => Ok(FocusOption::Lower),
            other => Err(format!("未知的 focus 值: {} (可选: full / upper / lower)", other)),
        }
    }
}

/// 提交模式
///
/// 单张模式返回 JSON 中的相对路径，批量模式返回 ZIP 二进制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionMode {
    SingleImage,
    BatchZip,
}

impl SubmissionMode {
    /// 根据选择的文件数量推断模式
    pub fn for_count(count: usize) -> Self {
        if count > 1 {
            SubmissionMode::BatchZip
        } else {
            SubmissionMode::SingleImage
        }
    }

    /// 相对于服务地址的端点路径
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubmissionMode::SingleImage => "trim-single/",
            SubmissionMode::BatchZip => "batch-trim-zip/",
        }
    }

    /// multipart 字段名
    pub fn field_name(&self) -> &'static str {
        match self {
            SubmissionMode::SingleImage => "file",
            SubmissionMode::BatchZip => "files",
        }
    }

    /// 下载时使用的固定文件名
    pub fn download_name(&self) -> &'static str {
        match self {
            SubmissionMode::SingleImage => "trimmed_image.png",
            SubmissionMode::BatchZip => "trimmed_images.zip",
        }
    }
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionMode::SingleImage => f.write_str("single"),
            SubmissionMode::BatchZip => f.write_str("batch"),
        }
    }
}
