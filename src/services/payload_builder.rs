//! 请求体构建 - 业务能力层
//!
//! 只负责把文件选择转换为 multipart 请求体，不发送请求

use crate::error::{TrimError, TrimResult};
use crate::models::{FileSelection, PayloadPart, RequestPayload, SelectedFile, SubmissionMode};

/// 请求体构建器
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadBuilder;

impl PayloadBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建请求体
    ///
    /// - 单张模式：只取第一个文件，字段名 `file`
    /// - 批量模式：按选择顺序放入所有文件，字段名 `files`
    pub fn build(&self, selection: &FileSelection, mode: SubmissionMode) -> TrimResult<RequestPayload> {
        let field = mode.field_name();
        let parts = match mode {
            SubmissionMode::SingleImage => selection
                .first()
                .map(|file| vec![to_part(field, file)])
                .ok_or_else(TrimError::no_files_selected)?,
            SubmissionMode::BatchZip => {
                if selection.is_empty() {
                    return Err(TrimError::no_files_selected());
                }
                selection.iter().map(|file| to_part(field, file)).collect()
            }
        };

        Ok(RequestPayload { mode, parts })
    }
}

fn to_part(field: &'static str, file: &SelectedFile) -> PayloadPart {
    PayloadPart {
        field,
        file_name: file.file_name.clone(),
        mime_type: file.mime_type.clone(),
        bytes: file.bytes.clone(),
    }
}
