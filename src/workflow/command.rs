use serde::{Deserialize, Serialize};

use crate::models::DocumentKey;

/// 展示层发来的编辑命令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Remove { key: DocumentKey },
    Duplicate { key: DocumentKey },
    Reorder { from: usize, to: usize },
    UpdateSelection { key: DocumentKey, selection: String },
}
