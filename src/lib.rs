//! # Image Trim Client
//!
//! 把本地图片提交到远程裁剪服务，并取回处理结果的客户端
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure::BlobStore` - 唯一持有本地 blob 数据，提供创建 / 读取 / 撤销
//! - `clients::TrimClient` - 唯一与裁剪服务通信的 HTTP 客户端
//!
//! ### ② 业务能力层（Services）
//! - `PayloadBuilder` - 文件选择 → multipart 请求体
//! - `ResultManager` - 响应 → 结果资源，撤销旧资源
//! - `ErrorClassifier` - 内部错误 → 用户可见消息
//! - `DownloadWriter` - 写入下载文件
//!
//! ### ③ 流程层（Workflow）
//! - `TrimSession` - 会话状态机（Idle → Submitting → Settled）
//! - `SubmitCtx` - 提交上下文（序号 + 模式 + focus）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 命令行应用：加载、提交、下载、清理
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::TrimClient;
pub use config::Config;
pub use error::{TransportFailure, TrimError, TrimResult};
pub use infrastructure::BlobStore;
pub use models::{FileSelection, FocusOption, ResultResource, SelectedFile, SessionState, SubmissionMode};
pub use orchestrator::{App, RunReport, RunRequest};
pub use workflow::{SubmitOutcome, TrimSession};
