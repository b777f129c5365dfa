use super::options::SubmissionMode;

/// multipart 请求中的一个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub field: &'static str,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 每次提交新建的请求体，不跨请求复用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub mode: SubmissionMode,
    pub parts: Vec<PayloadPart>,
}

impl RequestPayload {
    /// 所有字段名（按顺序）
    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.field).collect()
    }

    /// 所有文件名（按顺序）
    pub fn file_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.file_name.as_str()).collect()
    }

    pub fn total_bytes(&self) -> usize {
        self.parts.iter().map(|p| p.bytes.len()).sum()
    }
}
