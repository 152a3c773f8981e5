use thiserror::Error;

use crate::models::DocumentKey;

/// 工作流错误
///
/// 上传、生成和文件接收的失败都会被转换成一条可读消息写入错误通道，
/// 不会作为 panic 抛给展示层。页码选择非法不属于错误，只体现为"不可生成"。
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 文件类型不被接受（未发起任何网络请求）
    #[error("无法接收文件 {file_name}: {reason}")]
    IntakeRejected {
        file_name: String,
        reason: IntakeRejection,
    },
    /// 上传服务返回失败或无法访问
    #[error("上传 {file_name} 失败: {source}")]
    UploadFailed {
        file_name: String,
        #[source]
        source: ServiceError,
    },
    /// 合并服务返回失败或无法访问
    #[error("生成 {output_name} 失败: {source}")]
    GenerateFailed {
        output_name: String,
        #[source]
        source: ServiceError,
    },
    /// 集合操作的编程错误
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// 文件被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeRejection {
    #[error("只支持 PDF 文件")]
    UnsupportedType,
    #[error("文件为空")]
    Empty,
    #[error("文件内容不是有效的 PDF")]
    MissingPdfHeader,
    #[error("文件大小 {size} 字节超过上限 {limit} 字节")]
    TooLarge { size: u64, limit: u64 },
}

/// 文档服务调用错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 网络请求失败
    #[error("请求 {endpoint} 失败: {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务返回非成功状态码
    #[error("{endpoint} 返回状态码 {status}: {message}")]
    BadStatus {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// 响应内容无法解析
    #[error("无法解析 {endpoint} 的响应: {source}")]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 集合操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("行标识 {0} 已存在")]
    DuplicateKey(DocumentKey),
    #[error("位置 {index} 超出范围 (共 {len} 行)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("行标识已用尽")]
    KeySpaceExhausted,
}

// ========== 便捷构造函数 ==========

impl ServiceError {
    /// 创建网络请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ServiceError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建状态码错误
    pub fn bad_status(
        endpoint: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        ServiceError::BadStatus {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// 创建响应解析错误
    pub fn invalid_response(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ServiceError::InvalidResponse {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

/// 工作流结果类型
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = WorkflowError::UploadFailed {
            file_name: "a.pdf".to_string(),
            source: ServiceError::bad_status("/upload", 400, "PDF exceeds 100 MB limit"),
        };
        assert_eq!(
            err.to_string(),
            "上传 a.pdf 失败: /upload 返回状态码 400: PDF exceeds 100 MB limit"
        );

        let err = WorkflowError::IntakeRejected {
            file_name: "notes.txt".to_string(),
            reason: IntakeRejection::UnsupportedType,
        };
        assert_eq!(err.to_string(), "无法接收文件 notes.txt: 只支持 PDF 文件");
    }
}
