//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先，否则使用 `info`（详细模式下为 `debug`）。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n图片裁剪日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `service_url`: 裁剪服务地址
/// - `timeout_secs`: 请求超时
pub fn log_startup(service_url: &str, timeout_secs: Option<u64>) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 图片裁剪客户端");
    info!("🌐 服务地址: {}", service_url);
    match timeout_secs {
        Some(secs) => info!("⏱️ 请求超时: {} 秒", secs),
        None => info!("⏱️ 请求超时: 不限制"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录选择加载信息
///
/// # 参数
/// - `total`: 图片总数
/// - `mode`: 提交模式描述
pub fn log_selection_loaded(total: usize, mode: &str) {
    info!("✓ 找到 {} 张待处理的图片", total);
    info!("📋 提交模式: {}", mode);
}

/// 打印最终结果
///
/// # 参数
/// - `succeeded`: 是否成功
/// - `summary`: 结果描述（下载路径或错误信息）
/// - `log_file_path`: 日志文件路径
pub fn print_final_summary(succeeded: bool, summary: &str, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    if succeeded {
        info!("✅ 成功: {}", summary);
    } else {
        info!("❌ 失败: {}", summary);
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
