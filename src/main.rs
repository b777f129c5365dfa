use anyhow::Result;
use clap::Parser;
use image_trim_client::utils::logging;
use image_trim_client::{App, Config, FocusOption, RunRequest, SubmissionMode};
use std::path::PathBuf;
use std::process::ExitCode;

/// 把图片提交到远程裁剪服务并下载结果
#[derive(Debug, Parser)]
#[command(name = "trim-client", version)]
struct Cli {
    /// 要处理的图片，省略时扫描输入目录
    files: Vec<PathBuf>,

    /// 裁剪重点: full / upper / lower
    #[arg(short, long)]
    focus: Option<FocusOption>,

    /// 强制单张模式（只发送第一张图片）
    #[arg(long, conflicts_with = "batch")]
    single: bool,

    /// 强制批量模式（返回 ZIP）
    #[arg(long)]
    batch: bool,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 服务地址
    #[arg(long)]
    base_url: Option<String>,

    /// 输入目录
    #[arg(long)]
    input_dir: Option<String>,

    /// 输出目录
    #[arg(short, long)]
    output_dir: Option<String>,

    /// 请求超时（秒）
    #[arg(long)]
    timeout: Option<u64>,

    /// 跳过健康检查
    #[arg(long)]
    no_health_check: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.base_url {
            config.service_base_url = url.clone();
        }
        if let Some(dir) = &self.input_dir {
            config.input_folder = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_folder = dir.clone();
        }
        if self.timeout.is_some() {
            config.request_timeout_secs = self.timeout;
        }
        config.verbose_logging |= self.verbose;
        config
    }

    fn mode(&self) -> Option<SubmissionMode> {
        match (self.single, self.batch) {
            (true, _) => Some(SubmissionMode::SingleImage),
            (_, true) => Some(SubmissionMode::BatchZip),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply(Config::load(cli.config.as_deref())?);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    let report = app
        .run(RunRequest {
            files: cli.files.clone(),
            mode: cli.mode(),
            focus: cli.focus,
            skip_health_check: cli.no_health_check,
        })
        .await?;
    app.shutdown();

    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
