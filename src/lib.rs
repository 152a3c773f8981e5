//! # PDF Splitter
//!
//! 把多份已上传的 PDF 按各自的页码选择依次拼接成一份输出文档
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 能力层（Selection / Services）
//! - `selection/` - 页码选择语法，纯函数，无状态
//! - `services/` - 协作者接口（上传 / 合并）与文件接收检查
//! - `clients/` - 基于 HTTP 的文档服务客户端，实现协作者接口
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 文档集合、错误通道与工作流控制器
//! - `DocumentCollection` - 有序集合，顺序即输出顺序
//! - `WorkflowController` - 状态机（上传 → 编辑 → 排序 → 生成）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/job_runner` - 读取 TOML 任务并驱动控制器
//!
//! 页码选择本身不是错误：非法时只表现为"不可生成"，并在对应行上标记。
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod selection;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::DocumentClient;
pub use config::Config;
pub use error::{CollectionError, IntakeRejection, ServiceError, WorkflowError, WorkflowResult};
pub use models::{
    Artifact, DocumentEntry, DocumentId, DocumentKey, IntakeFile, SplitItem, SplitRequest,
};
pub use orchestrator::{App, JobReport};
pub use selection::{PageRange, Selection, SelectionError, SelectionGrammar};
pub use services::{SplitCollaborator, UploadCollaborator};
pub use workflow::{
    Command, DocumentCollection, GenerateResult, Snapshot, WorkflowController, WorkflowState,
};
