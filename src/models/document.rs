use serde::{Deserialize, Serialize};
use std::fmt;

use crate::selection::SelectionGrammar;

/// 文档服务分配的文档 ID
///
/// 同一份服务端文档可以被多行引用（复制行），因此在集合中可以重复
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 本地行标识，在集合内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(pub u64);

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 上传接口返回的文档元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    #[serde(rename = "documentId")]
    pub id: DocumentId,
    #[serde(rename = "pages")]
    pub page_count: u32,
    #[serde(rename = "size")]
    pub byte_size: u64,
}

/// 集合中的一行：文档 + 页码选择
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: DocumentId,
    pub key: DocumentKey,
    pub display_name: String,
    pub byte_size: u64,
    pub page_count: u32,
    pub selection: String,
}

impl DocumentEntry {
    /// 根据上传结果创建新行，选择默认为全部页
    pub fn from_upload(
        key: DocumentKey,
        display_name: impl Into<String>,
        uploaded: UploadedDocument,
    ) -> Self {
        Self {
            id: uploaded.id,
            key,
            display_name: display_name.into(),
            byte_size: uploaded.byte_size,
            page_count: uploaded.page_count,
            selection: SelectionGrammar::default_for(uploaded.page_count),
        }
    }

    /// 当前选择是否合法（每次调用都重新计算）
    pub fn is_selection_valid(&self) -> bool {
        SelectionGrammar::validate(&self.selection, self.page_count)
    }
}
