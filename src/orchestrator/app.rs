//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、服务客户端、blob 存储、会话
//! 2. **健康检查**：提交前确认服务在线（失败只警告）
//! 3. **加载选择**：命令行给出的文件，或扫描输入目录
//! 4. **提交与下载**：委托 `TrimSession` 完成一次提交，把结果写入输出目录
//! 5. **资源清理**：`shutdown` 撤销会话持有的本地句柄

use crate::clients::TrimClient;
use crate::config::Config;
use crate::infrastructure::BlobStore;
use crate::models::{
    load_selection_from_folder, load_selection_from_paths, FileSelection, FocusOption,
    SubmissionMode,
};
use crate::services::DownloadWriter;
use crate::utils::logging;
use crate::workflow::{SubmitOutcome, TrimSession};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 一次运行的输入
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// 明确指定的文件，为空时扫描输入目录
    pub files: Vec<PathBuf>,
    /// 强制的提交模式，`None` 时按文件数量推断
    pub mode: Option<SubmissionMode>,
    /// 裁剪重点，`None` 时使用配置中的默认值
    pub focus: Option<FocusOption>,
    pub skip_health_check: bool,
}

/// 一次运行的结果
#[derive(Debug)]
pub struct RunReport {
    pub outcome: SubmitOutcome,
    pub saved_to: Option<PathBuf>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, SubmitOutcome::Succeeded(_)) && self.saved_to.is_some()
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    session: TrimSession,
    writer: DownloadWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.service_base_url, config.request_timeout_secs);

        let client = TrimClient::new(&config)?;
        let session = TrimSession::new(client, BlobStore::new());
        let writer = DownloadWriter::new(&config.output_folder);

        Ok(Self {
            config,
            session,
            writer,
        })
    }

    pub fn session(&self) -> &TrimSession {
        &self.session
    }

    /// 运行一次提交
    pub async fn run(&self, request: RunRequest) -> Result<RunReport> {
        if !request.skip_health_check {
            self.check_health().await;
        }

        let selection = self.load_selection(&request.files).await?;
        let mode = request
            .mode
            .unwrap_or_else(|| SubmissionMode::for_count(selection.len()));
        let focus = request.focus.unwrap_or(self.config.default_focus);

        logging::log_selection_loaded(selection.len(), &mode.to_string());

        let outcome = self.session.submit(&selection, mode, focus).await;

        let (saved_to, summary) = match &outcome {
            SubmitOutcome::Succeeded(_) => match self.session.download(&self.writer).await {
                Ok(path) => {
                    let summary = path.display().to_string();
                    (Some(path), summary)
                }
                Err(e) => {
                    error!("❌ 保存结果失败: {:#}", e);
                    (None, format!("保存结果失败: {:#}", e))
                }
            },
            SubmitOutcome::Failed(user) => (None, format!("{} ({})", user.message, user.detail)),
            SubmitOutcome::Rejected => (None, "上一次提交仍在进行".to_string()),
            SubmitOutcome::Abandoned => (None, "会话已关闭".to_string()),
        };

        let report = RunReport { outcome, saved_to };
        if let Err(e) = logging::append_log_line(&self.config.output_log_file, &summary) {
            warn!("无法写入日志文件: {}", e);
        }
        logging::print_final_summary(report.succeeded(), &summary, &self.config.output_log_file);

        Ok(report)
    }

    /// 关闭会话并撤销本地结果
    pub fn shutdown(&self) {
        self.session.shutdown();
    }

    /// 使用会话当前的客户端，切换服务地址后同样生效
    async fn check_health(&self) {
        let client = self.session.client();
        match client.health_check().await {
            Ok(message) => info!("✓ 服务在线: {}", message),
            Err(e) => warn!("⚠️ 健康检查失败（继续提交）: {}", e),
        }
    }

    /// 加载选择；输入目录不存在时返回空选择，由会话给出校验错误
    async fn load_selection(&self, files: &[PathBuf]) -> Result<FileSelection> {
        if !files.is_empty() {
            return load_selection_from_paths(files).await;
        }

        info!("\n📁 正在扫描输入目录 {} ...", self.config.input_folder);
        match load_selection_from_folder(&self.config.input_folder).await {
            Ok(selection) => Ok(selection),
            Err(e) => {
                warn!("⚠️ {}", e);
                Ok(FileSelection::default())
            }
        }
    }
}
