//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (加载选择、健康检查、下载)
//!     ↓
//! workflow::TrimSession (状态机，单一结果槽位)
//!     ↓
//! services (能力层：payload / result / error / download)
//!     ↓
//! clients::TrimClient + infrastructure::BlobStore
//! ```
//!
//! 编排层只做调度和汇总，不做请求构建和资源管理。

pub mod app;

pub use app::{App, RunReport, RunRequest};
