//! 工作流控制器 - 流程层
//!
//! 核心职责：编排"上传 → 编辑 → 排序 → 生成"的完整流程
//!
//! - 接收文件，调用上传协作者，把结果加入集合
//! - 把编辑命令直接转交给集合
//! - 按调用时刻的集合内容构建合并请求，调用合并协作者
//! - 所有失败都转换为错误通道中的一条消息
//!
//! 会话由一把锁保护，锁只在同步代码中持有，不会跨越 `.await`。
//! 等待协作者响应期间，其他编辑操作可以继续进行。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{WorkflowError, WorkflowResult};
use crate::models::{Artifact, DocumentEntry, DocumentKey, IntakeFile, SplitRequest};
use crate::services::{IntakeGuard, SplitCollaborator, UploadCollaborator};
use crate::workflow::command::Command;
use crate::workflow::state::{Operation, Session, Snapshot, WorkflowState};

/// 生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResult {
    /// 合并完成，交给展示层下载
    Delivered(Artifact),
    /// 集合尚不可生成，未发起请求
    Skipped,
}

/// 进行中的操作凭据
///
/// 正常结束时在同一次加锁中调用 `complete`；若 future 被中途丢弃，
/// 析构时补上计数，避免状态停留在 `Uploading`/`Generating`
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    operation: Operation,
    completed: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a Mutex<Session>, operation: Operation) -> Self {
        Self {
            session,
            operation,
            completed: false,
        }
    }

    fn complete(mut self, session: &mut Session) {
        session.finish(self.operation);
        self.completed = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.completed {
            lock_session(self.session).finish(self.operation);
        }
    }
}

fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 工作流控制器
///
/// 唯一持有文档集合的组件，展示层只能通过这里读写
pub struct WorkflowController {
    uploader: Arc<dyn UploadCollaborator>,
    splitter: Arc<dyn SplitCollaborator>,
    guard: IntakeGuard,
    upload_permits: Semaphore,
    default_output_name: String,
    session: Mutex<Session>,
}

impl WorkflowController {
    /// 创建新的控制器
    ///
    /// # 参数
    /// - `config`: 配置（文件大小上限、上传并发数、默认输出名）
    /// - `uploader`: 上传协作者
    /// - `splitter`: 合并协作者
    pub fn new(
        config: &Config,
        uploader: Arc<dyn UploadCollaborator>,
        splitter: Arc<dyn SplitCollaborator>,
    ) -> Self {
        Self {
            uploader,
            splitter,
            guard: IntakeGuard::new(config),
            upload_permits: Semaphore::new(config.max_concurrent_uploads.max(1)),
            default_output_name: config.default_output_name.clone(),
            session: Mutex::new(Session::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock_session(&self.session)
    }

    // ========== 上传 ==========

    /// 接收一个文件并上传
    ///
    /// # 返回
    /// 成功时返回新行的标识；失败时错误消息同时写入错误通道，集合不变
    pub async fn intake(&self, file: IntakeFile) -> WorkflowResult<DocumentKey> {
        let ticket = {
            let mut session = self.lock();
            session.errors.clear();

            if let Err(reason) = self.guard.check(&file) {
                let err = WorkflowError::IntakeRejected {
                    file_name: file.name.clone(),
                    reason,
                };
                session.errors.set(err.to_string());
                return Err(err);
            }

            session.begin(Operation::Upload);
            InFlight::new(&self.session, Operation::Upload)
        };

        info!("📤 正在上传 {} ({} 字节)", file.name, file.byte_size());

        let result = {
            // 信号量不会被关闭，获取失败时直接上传
            let _permit = self.upload_permits.acquire().await.ok();
            self.uploader.upload(&file).await
        };

        let mut session = self.lock();
        ticket.complete(&mut session);

        match result {
            Ok(uploaded) => {
                let key = match session.collection.allocate_key() {
                    Ok(key) => key,
                    Err(source) => {
                        let err = WorkflowError::from(source);
                        session.errors.set(err.to_string());
                        return Err(err);
                    }
                };
                let entry = DocumentEntry::from_upload(key, file.name.clone(), uploaded);
                info!(
                    "✓ {} 上传完成: {} 页, 行 {}",
                    entry.display_name, entry.page_count, key
                );
                session.collection.append(entry)?;
                Ok(key)
            }
            Err(source) => {
                let err = WorkflowError::UploadFailed {
                    file_name: file.name,
                    source,
                };
                session.errors.set(err.to_string());
                Err(err)
            }
        }
    }

    // ========== 生成 ==========

    /// 按当前顺序生成合并文档
    ///
    /// 请求内容在调用时刻确定，之后的编辑不影响已发出的请求。
    /// 集合不可生成时什么也不做，返回 [`GenerateResult::Skipped`]。
    pub async fn generate(&self, output_name: &str) -> WorkflowResult<GenerateResult> {
        let (request, ticket) = {
            let mut session = self.lock();
            if !session.collection.is_ready_to_generate() {
                debug!("集合尚不可生成，忽略生成请求");
                return Ok(GenerateResult::Skipped);
            }

            session.errors.clear();
            session.begin(Operation::Generate);

            let request = SplitRequest {
                output_name: self.resolve_output_name(output_name),
                items: session.collection.split_items(),
            };
            (request, InFlight::new(&self.session, Operation::Generate))
        };

        info!(
            "📄 正在生成 {} ({} 个文档)",
            request.output_name,
            request.items.len()
        );

        let result = self.splitter.split(&request).await;

        let mut session = self.lock();
        ticket.complete(&mut session);

        match result {
            Ok(bytes) => {
                info!("✓ {} 生成完成 ({} 字节)", request.output_name, bytes.len());
                Ok(GenerateResult::Delivered(Artifact {
                    file_name: request.output_name,
                    bytes,
                }))
            }
            Err(source) => {
                let err = WorkflowError::GenerateFailed {
                    output_name: request.output_name,
                    source,
                };
                session.errors.set(err.to_string());
                Err(err)
            }
        }
    }

    fn resolve_output_name(&self, output_name: &str) -> String {
        let trimmed = output_name.trim();
        if trimmed.is_empty() {
            self.default_output_name.clone()
        } else {
            trimmed.to_string()
        }
    }

    // ========== 编辑 ==========

    /// 删除一行，不存在时什么也不做
    pub fn remove(&self, key: DocumentKey) -> Option<DocumentEntry> {
        self.lock().collection.remove(key)
    }

    /// 复制一行到原行之后
    pub fn duplicate(&self, key: DocumentKey) -> Option<DocumentKey> {
        self.lock().collection.duplicate(key)
    }

    /// 移动一行
    pub fn reorder(&self, from: usize, to: usize) -> WorkflowResult<()> {
        self.lock().collection.reorder(from, to)?;
        Ok(())
    }

    /// 修改页码选择，不做校验
    pub fn update_selection(&self, key: DocumentKey, selection: impl Into<String>) -> bool {
        self.lock().collection.update_selection(key, selection)
    }

    /// 执行编辑命令并返回执行后的快照
    pub fn dispatch(&self, command: Command) -> WorkflowResult<Snapshot> {
        let mut session = self.lock();
        match command {
            Command::Remove { key } => {
                session.collection.remove(key);
            }
            Command::Duplicate { key } => {
                session.collection.duplicate(key);
            }
            Command::Reorder { from, to } => session.collection.reorder(from, to)?,
            Command::UpdateSelection { key, selection } => {
                session.collection.update_selection(key, selection);
            }
        }
        Ok(session.snapshot())
    }

    // ========== 读取 ==========

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn state(&self) -> WorkflowState {
        self.lock().state()
    }

    /// 展示用状态，存在未清除的错误时为 `Failed`
    pub fn display_state(&self) -> WorkflowState {
        self.lock().display_state()
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock().errors.message().map(str::to_string)
    }

    pub fn is_ready_to_generate(&self) -> bool {
        self.lock().collection.is_ready_to_generate()
    }

    /// 当前各行的副本，按输出顺序排列
    pub fn entries(&self) -> Vec<DocumentEntry> {
        self.lock().collection.entries().to_vec()
    }

    /// 每行选择是否合法，用于标记出错的行
    pub fn row_validity(&self) -> Vec<(DocumentKey, bool)> {
        self.lock()
            .collection
            .entries()
            .iter()
            .map(|e| (e.key, e.is_selection_valid()))
            .collect()
    }
}
