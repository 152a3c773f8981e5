/// 文档服务 API 客户端
///
/// 封装上传和合并两个接口的 HTTP 调用
use crate::config::Config;
use crate::error::ServiceError;
use crate::models::{IntakeFile, SplitRequest, UploadedDocument};
use crate::services::{SplitCollaborator, UploadCollaborator};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const UPLOAD_ENDPOINT: &str = "upload";
const SPLIT_ENDPOINT: &str = "split";

/// 文档服务客户端
pub struct DocumentClient {
    http: reqwest::Client,
    base_url: String,
}

impl DocumentClient {
    /// 创建新的文档服务客户端
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("无法创建 HTTP 客户端")?;

        Ok(Self {
            http,
            base_url: config.service_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// 非成功状态码转换为错误，尽量取出服务端给出的原因
    async fn ensure_success(endpoint: &str, response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

        warn!("{} 返回错误状态 {}: {}", endpoint, status, message);
        Err(ServiceError::bad_status(endpoint, status.as_u16(), message))
    }
}

#[async_trait]
impl UploadCollaborator for DocumentClient {
    async fn upload(&self, file: &IntakeFile) -> Result<UploadedDocument, ServiceError> {
        let url = self.url(UPLOAD_ENDPOINT);
        debug!("上传 {} ({} 字节) 到 {}", file.name, file.byte_size(), url);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.content_type.as_deref().unwrap_or("application/pdf"))
            .map_err(|e| ServiceError::request_failed(UPLOAD_ENDPOINT, e))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::request_failed(UPLOAD_ENDPOINT, e))?;

        let response = Self::ensure_success(UPLOAD_ENDPOINT, response).await?;

        let uploaded: UploadedDocument = response
            .json()
            .await
            .map_err(|e| ServiceError::invalid_response(UPLOAD_ENDPOINT, e))?;

        debug!(
            "上传完成: id={} pages={} size={}",
            uploaded.id, uploaded.page_count, uploaded.byte_size
        );

        Ok(uploaded)
    }
}

#[async_trait]
impl SplitCollaborator for DocumentClient {
    async fn split(&self, request: &SplitRequest) -> Result<Vec<u8>, ServiceError> {
        let url = self.url(SPLIT_ENDPOINT);
        debug!(
            "请求合并 {}: {}",
            request.output_name,
            serde_json::to_string(request).unwrap_or_default()
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::request_failed(SPLIT_ENDPOINT, e))?;

        let response = Self::ensure_success(SPLIT_ENDPOINT, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::request_failed(SPLIT_ENDPOINT, e))?;

        debug!("合并完成: {} 字节", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// 从错误响应中提取 `detail` 字段
fn extract_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(r#"{"detail":"PDF exceeds 100 MB limit"}"#),
            Some("PDF exceeds 100 MB limit".to_string())
        );
        assert_eq!(extract_error_detail(r#"{"detail":null}"#), None);
        assert_eq!(extract_error_detail("Internal Server Error"), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = Config {
            service_base_url: "http://splitter.local/".to_string(),
            ..Config::default()
        };
        let client = DocumentClient::new(&config).unwrap();
        assert_eq!(client.url(UPLOAD_ENDPOINT), "http://splitter.local/upload");
        assert_eq!(client.url(SPLIT_ENDPOINT), "http://splitter.local/split");
    }

    /// 需要本地运行文档服务：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_upload_against_local_service() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = DocumentClient::new(&Config::from_env()).unwrap();
        let file = IntakeFile::new("empty.pdf", b"%PDF-1.4\n%%EOF\n".to_vec());

        match client.upload(&file).await {
            Ok(uploaded) => println!("上传成功: {:?}", uploaded),
            Err(e) => println!("上传失败: {}", e),
        }
    }
}
