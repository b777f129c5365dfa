/// 裁剪服务 API 客户端
///
/// 封装所有与远程裁剪服务的 HTTP 交互
use crate::config::Config;
use crate::error::{TransportFailure, TrimError, TrimResult};
use crate::models::{
    BatchResult, DispatchResult, FocusOption, RequestPayload, SingleResult, SubmissionMode,
};
use crate::utils::logging::truncate_text;
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const ZIP_MEDIA_TYPE: &str = "application/zip";

/// 裁剪服务客户端
#[derive(Clone)]
pub struct TrimClient {
    http: Client,
    base_url: Url,
    origin: String,
}

impl TrimClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.service_base_url, config.request_timeout_secs)
    }

    /// 使用指定的服务地址创建客户端
    ///
    /// # 参数
    /// - `base_url`: 服务地址，例如 `https://example.com`
    /// - `timeout_secs`: 请求超时，`None` 表示不限制
    pub fn with_base_url(base_url: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let origin = base_url.trim_end_matches('/').to_string();
        let base_url = Url::parse(&format!("{}/", origin))
            .with_context(|| format!("无效的服务地址: {}", origin))?;

        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("无法创建 HTTP 客户端")?;

        Ok(Self {
            http,
            base_url,
            origin,
        })
    }

    /// 服务 origin（不带结尾斜杠）
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 构造带 focus 参数的端点地址
    pub fn endpoint_url(&self, mode: SubmissionMode, focus: FocusOption) -> TrimResult<Url> {
        let mut url = self.base_url.join(mode.endpoint()).map_err(|e| {
            TrimError::transport(mode.endpoint(), TransportFailure::MalformedBody(e.to_string()))
        })?;
        url.query_pairs_mut().append_pair("focus", focus.as_str());
        Ok(url)
    }

    /// 把服务返回的相对路径拼接成绝对地址
    ///
    /// 结果只能位于服务 origin 下；带 scheme 或以 `//` 开头的地址视为响应体错误
    pub fn resolve(&self, path: &str) -> TrimResult<String> {
        let malformed = |reason: String| {
            TrimError::transport(
                SubmissionMode::SingleImage.endpoint(),
                TransportFailure::MalformedBody(reason),
            )
        };

        if path.starts_with("//") || Url::parse(path).is_ok() {
            return Err(malformed(format!("结果地址必须是相对路径: {}", path)));
        }

        let url = self
            .base_url
            .join(path)
            .map_err(|e| malformed(format!("无法拼接结果地址 {}: {}", path, e)))?;
        if url.origin() != self.base_url.origin() {
            return Err(malformed(format!("结果地址不在服务 origin 下: {}", url)));
        }
        Ok(url.to_string())
    }

    /// 发送一次裁剪请求
    ///
    /// # 参数
    /// - `payload`: multipart 请求体
    /// - `focus`: 裁剪重点
    ///
    /// # 返回
    /// 单张模式返回 JSON 中的路径，批量模式返回 ZIP 数据
    pub async fn dispatch(
        &self,
        payload: RequestPayload,
        focus: FocusOption,
    ) -> TrimResult<DispatchResult> {
        let mode = payload.mode;
        let endpoint = mode.endpoint();
        let url = self.endpoint_url(mode, focus)?;

        debug!(
            "POST {} ({} 个字段, {} 字节)",
            url,
            payload.parts.len(),
            payload.total_bytes()
        );

        let form = build_form(payload)?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TrimError::from_reqwest(endpoint, e))?;

        let response = ensure_success(endpoint, response).await?;

        match mode {
            SubmissionMode::SingleImage => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| TrimError::from_reqwest(endpoint, e))?;
                let parsed: SingleResult = serde_json::from_slice(&body).map_err(|e| {
                    TrimError::transport(endpoint, TransportFailure::MalformedBody(e.to_string()))
                })?;
                if parsed.image_url.trim().is_empty() {
                    return Err(TrimError::transport(
                        endpoint,
                        TransportFailure::MalformedBody("image_url 为空".to_string()),
                    ));
                }
                debug!("单张裁剪结果路径: {}", parsed.image_url);
                Ok(DispatchResult::Single(parsed))
            }
            SubmissionMode::BatchZip => {
                let media_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or(ZIP_MEDIA_TYPE)
                    .to_string();
                if !media_type.starts_with(ZIP_MEDIA_TYPE) {
                    warn!("批量接口返回了非 ZIP 类型: {}", media_type);
                }
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| TrimError::from_reqwest(endpoint, e))?;
                debug!("批量裁剪返回 {} 字节", bytes.len());
                Ok(DispatchResult::Batch(BatchResult {
                    bytes: bytes.to_vec(),
                    media_type: ZIP_MEDIA_TYPE.to_string(),
                }))
            }
        }
    }

    /// 下载服务端持有的结果
    pub async fn fetch(&self, url: &str) -> TrimResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TrimError::from_reqwest(url, e))?;
        let response = ensure_success(url, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TrimError::from_reqwest(url, e))?;
        Ok(bytes.to_vec())
    }

    /// 健康检查（`GET /`），返回服务的 message 字段
    pub async fn health_check(&self) -> TrimResult<String> {
        let endpoint = self.base_url.as_str();
        let response = self
            .http
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| TrimError::from_reqwest(endpoint, e))?;
        let response = ensure_success(endpoint, response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| TrimError::from_reqwest(endpoint, e))?;

        Ok(body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

fn build_form(payload: RequestPayload) -> TrimResult<Form> {
    let mut form = Form::new();
    for part in payload.parts {
        let file_part = Part::bytes(part.bytes)
            .file_name(part.file_name)
            .mime_str(&part.mime_type)
            .map_err(|e| TrimError::Resource(format!("无效的文件类型 {}: {}", part.mime_type, e)))?;
        form = form.part(part.field, file_part);
    }
    Ok(form)
}

/// 非 2xx 状态码转换为传输错误
async fn ensure_success(endpoint: &str, response: Response) -> TrimResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(TrimError::transport(
        endpoint,
        TransportFailure::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        },
    ))
}

/// 提取服务返回的错误信息（`error` 或 `detail` 字段）
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail"] {
            match value.get(key) {
                Some(Value::String(msg)) => return msg.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    truncate_text(body.trim(), 200)
}
