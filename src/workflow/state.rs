//! 工作流状态
//!
//! 状态不单独存储，而是由进行中的上传/生成数量和集合内容推导出来

use serde::{Deserialize, Serialize};

use crate::models::DocumentEntry;
use crate::workflow::collection::DocumentCollection;
use crate::workflow::error_channel::ErrorChannel;

/// 工作流状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Uploading,
    Ready,
    Generating,
    Failed,
}

/// 进行中的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Upload,
    Generate,
}

/// 会话：集合、错误通道和进行中的操作计数
///
/// 由控制器独占，所有修改都在同一把锁内完成
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) collection: DocumentCollection,
    pub(crate) errors: ErrorChannel,
    uploads_in_flight: usize,
    generates_in_flight: usize,
}

impl Session {
    pub(crate) fn begin(&mut self, operation: Operation) {
        match operation {
            Operation::Upload => self.uploads_in_flight += 1,
            Operation::Generate => self.generates_in_flight += 1,
        }
    }

    pub(crate) fn finish(&mut self, operation: Operation) {
        match operation {
            Operation::Upload => {
                self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1)
            }
            Operation::Generate => {
                self.generates_in_flight = self.generates_in_flight.saturating_sub(1)
            }
        }
    }

    /// 按状态迁移规则得到的状态，失败后回到 `Idle`/`Ready`
    pub(crate) fn state(&self) -> WorkflowState {
        if self.generates_in_flight > 0 {
            WorkflowState::Generating
        } else if self.uploads_in_flight > 0 {
            WorkflowState::Uploading
        } else if self.collection.is_ready_to_generate() {
            WorkflowState::Ready
        } else {
            WorkflowState::Idle
        }
    }

    /// 展示用状态：空闲时若有未清除的错误消息则为 `Failed`
    pub(crate) fn display_state(&self) -> WorkflowState {
        match self.state() {
            WorkflowState::Idle | WorkflowState::Ready if self.errors.message().is_some() => {
                WorkflowState::Failed
            }
            state => state,
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state(),
            display_state: self.display_state(),
            error: self.errors.message().map(str::to_string),
            rows: self
                .collection
                .entries()
                .iter()
                .map(|entry| RowView {
                    valid: entry.is_selection_valid(),
                    entry: entry.clone(),
                })
                .collect(),
            ready: self.collection.is_ready_to_generate(),
            output_pages: self.collection.output_page_total(),
        }
    }
}

/// 展示层看到的一行，附带选择是否合法
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    #[serde(flatten)]
    pub entry: DocumentEntry,
    pub valid: bool,
}

/// 某一时刻的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: WorkflowState,
    pub display_state: WorkflowState,
    pub error: Option<String>,
    pub rows: Vec<RowView>,
    pub ready: bool,
    /// 输出文档总页数，存在非法选择时为空
    pub output_pages: Option<usize>,
}
