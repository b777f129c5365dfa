use super::resource::ResultResource;
use std::fmt;

/// 用户可见错误的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 未选择文件等输入问题
    Validation,
    /// 上传失败（网络、状态码、响应体、本地资源）
    Transport,
}

/// 展示给用户的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFacingError {
    pub category: ErrorCategory,
    pub message: String,
    /// 原始错误描述，只用于日志
    pub detail: String,
}

impl fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// 一次提交的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Success(ResultResource),
    Failure(UserFacingError),
}

/// 会话状态机的阶段
///
/// `loading` / `error` / `result` 都由阶段推导，因此 error 与 result 不会同时存在
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Submitting,
    Settled(Settlement),
}

impl SessionPhase {
    pub fn loading(&self) -> bool {
        matches!(self, SessionPhase::Submitting)
    }

    pub fn error(&self) -> Option<&UserFacingError> {
        match self {
            SessionPhase::Settled(Settlement::Failure(err)) => Some(err),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ResultResource> {
        match self {
            SessionPhase::Settled(Settlement::Success(res)) => Some(res),
            _ => None,
        }
    }
}

/// 对外暴露的状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub loading: bool,
    pub error: Option<UserFacingError>,
    pub result: Option<ResultResource>,
}

impl From<&SessionPhase> for SessionState {
    fn from(phase: &SessionPhase) -> Self {
        Self {
            loading: phase.loading(),
            error: phase.error().cloned(),
            result: phase.result().cloned(),
        }
    }
}
