//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把命令行任务翻译成对工作流控制器的调用，是整个程序的入口。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理一个 JobManifest)
//!     ↓
//! workflow::WorkflowController (上传 / 编辑 / 生成)
//!     ↓
//! workflow::DocumentCollection + selection::SelectionGrammar
//!     ↓
//! services (协作者接口、文件检查) ← clients::DocumentClient (HTTP 实现)
//! ```

pub mod job_runner;

pub use job_runner::{App, JobReport};
