//! 外部协作者接口 - 业务能力层
//!
//! 工作流只通过这两个接口和文档服务交互，测试中可以替换为内存实现

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::{IntakeFile, SplitRequest, UploadedDocument};

/// 上传协作者：接收一份文档，返回服务端分配的 ID 和元数据
///
/// 任何失败对本次调用都是终态，调用方不重试
#[async_trait]
pub trait UploadCollaborator: Send + Sync {
    async fn upload(&self, file: &IntakeFile) -> Result<UploadedDocument, ServiceError>;
}

/// 合并协作者：按请求中的顺序拼接各文档的选中页，返回合并后的文件内容
#[async_trait]
pub trait SplitCollaborator: Send + Sync {
    async fn split(&self, request: &SplitRequest) -> Result<Vec<u8>, ServiceError>;
}
