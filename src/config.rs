use crate::models::FocusOption;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 裁剪服务的基础地址
    pub service_base_url: String,
    /// 默认裁剪重点
    pub default_focus: FocusOption,
    /// 待处理图片目录
    pub input_folder: String,
    /// 结果下载目录
    pub output_folder: String,
    /// 请求超时（秒），未设置时不限制
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "https://web-production-a74c.up.railway.app".to_string(),
            default_focus: FocusOption::Full,
            input_folder: "input".to_string(),
            output_folder: "output".to_string(),
            request_timeout_secs: None,
            verbose_logging: false,
            output_log_file: "trim_log.txt".to_string(),
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    service_base_url: Option<String>,
    default_focus: Option<FocusOption>,
    input_folder: Option<String>,
    output_folder: Option<String>,
    request_timeout_secs: Option<u64>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载配置，缺省的键使用默认值
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    /// 解析 TOML 配置文本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            service_base_url: file.service_base_url.unwrap_or(default.service_base_url),
            default_focus: file.default_focus.unwrap_or(default.default_focus),
            input_folder: file.input_folder.unwrap_or(default.input_folder),
            output_folder: file.output_folder.unwrap_or(default.output_folder),
            request_timeout_secs: file.request_timeout_secs.or(default.request_timeout_secs),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            output_log_file: file.output_log_file.unwrap_or(default.output_log_file),
        })
    }

    /// 默认值 → 配置文件（若存在） → 环境变量
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge_env())
    }

    /// 用环境变量覆盖当前配置，无法解析的值保持原样
    pub fn merge_env(self) -> Self {
        Self {
            service_base_url: std::env::var("TRIM_SERVICE_BASE_URL").unwrap_or(self.service_base_url),
            default_focus: std::env::var("TRIM_DEFAULT_FOCUS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.default_focus),
            input_folder: std::env::var("TRIM_INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: std::env::var("TRIM_OUTPUT_FOLDER").unwrap_or(self.output_folder),
            request_timeout_secs: std::env::var("TRIM_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(self.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }
}
