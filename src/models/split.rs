use serde::{Deserialize, Serialize};

use crate::models::document::DocumentId;

/// 合并请求中的一项：哪份文档、取哪些页
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitItem {
    #[serde(rename = "documentId")]
    pub id: DocumentId,
    #[serde(rename = "split")]
    pub selection: String,
}

/// 发给文档服务的合并请求，`items` 的顺序即输出页顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    #[serde(rename = "filename")]
    pub output_name: String,
    #[serde(rename = "documents")]
    pub items: Vec<SplitItem>,
}

/// 合并结果，交给展示层下载
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
