//! 合并任务执行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是命令行入口，把一个 TOML 任务转换成对工作流控制器的一系列调用。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建文档服务客户端和控制器
//! 2. **并发上传**：同时提交任务中的所有文件（并发数由控制器限制）
//! 3. **恢复顺序**：上传完成顺序不确定，完成后按任务顺序重新排列
//! 4. **应用选择**：写入每份文档的页码选择，标记非法的行
//! 5. **生成输出**：调用合并并把结果写入输出目录
//! 6. **统计输出**：汇总上传和生成结果

use crate::clients::DocumentClient;
use crate::config::Config;
use crate::models::{load_job_manifest, DocumentKey, IntakeFile, JobDocument, JobManifest};
use crate::utils::logging::{log_startup, print_final_stats, truncate_text};
use crate::workflow::{GenerateResult, WorkflowController};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    controller: WorkflowController,
}

/// 任务执行结果
#[derive(Debug, Default)]
pub struct JobReport {
    pub uploaded: usize,
    pub failed: usize,
    pub total: usize,
    pub output_path: Option<PathBuf>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.service_base_url, config.max_concurrent_uploads);

        let client = Arc::new(DocumentClient::new(&config)?);
        let controller = WorkflowController::new(&config, client.clone(), client);

        Ok(Self::with_controller(config, controller))
    }

    /// 使用已有的控制器创建应用
    pub fn with_controller(config: Config, controller: WorkflowController) -> Self {
        Self { config, controller }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<JobReport> {
        info!("\n📁 正在读取任务文件 {}", self.config.job_file);
        let manifest = load_job_manifest(Path::new(&self.config.job_file)).await?;
        self.run_job(manifest).await
    }

    /// 执行一个合并任务
    pub async fn run_job(&self, manifest: JobManifest) -> Result<JobReport> {
        let mut report = JobReport {
            total: manifest.documents.len(),
            ..Default::default()
        };

        // 并发上传，结果按任务顺序返回
        let outcomes = join_all(
            manifest
                .documents
                .iter()
                .enumerate()
                .map(|(index, document)| self.intake_document(index + 1, document)),
        )
        .await;

        let mut keys: Vec<(DocumentKey, &JobDocument)> = Vec::new();
        for (outcome, document) in outcomes.into_iter().zip(&manifest.documents) {
            match outcome {
                Some(key) => {
                    report.uploaded += 1;
                    keys.push((key, document));
                }
                None => report.failed += 1,
            }
        }

        self.restore_manifest_order(&keys)?;
        self.apply_selections(&keys);

        if report.failed > 0 {
            warn!("⚠️ {} 个文档上传失败，将只合并成功的文档", report.failed);
        }

        let output_name = manifest
            .output
            .as_deref()
            .unwrap_or(&self.config.default_output_name);

        match self.controller.generate(output_name).await {
            Ok(GenerateResult::Delivered(artifact)) => {
                let path = self
                    .write_artifact(&artifact.file_name, &artifact.bytes)
                    .await?;
                report.output_path = Some(path);
            }
            Ok(GenerateResult::Skipped) => {
                error!("❌ 没有可合并的文档，或存在非法的页码选择，跳过生成");
            }
            Err(e) => {
                error!("❌ {}", e);
            }
        }

        let output_path = report
            .output_path
            .as_ref()
            .map(|p| p.display().to_string());
        print_final_stats(
            report.uploaded,
            report.failed,
            report.total,
            output_path.as_deref(),
        );

        Ok(report)
    }

    /// 读取并上传单个文档，失败时记录日志并返回 `None`
    async fn intake_document(&self, index: usize, document: &JobDocument) -> Option<DocumentKey> {
        let file = match IntakeFile::read(&document.path).await {
            Ok(file) => file,
            Err(e) => {
                error!(
                    "[文档 {}] ❌ 无法读取 {}: {}",
                    index,
                    document.path.display(),
                    e
                );
                return None;
            }
        };

        match self.controller.intake(file).await {
            Ok(key) => Some(key),
            Err(e) => {
                error!("[文档 {}] ❌ {}", index, e);
                None
            }
        }
    }

    /// 上传完成的先后顺序不确定，按任务中的顺序重新排列
    fn restore_manifest_order(&self, keys: &[(DocumentKey, &JobDocument)]) -> Result<()> {
        for (target, (key, _)) in keys.iter().enumerate() {
            let current = self
                .controller
                .entries()
                .iter()
                .position(|e| e.key == *key)
                .with_context(|| format!("行 {} 不在集合中", key))?;
            self.controller.reorder(current, target)?;
        }
        Ok(())
    }

    fn apply_selections(&self, keys: &[(DocumentKey, &JobDocument)]) {
        for (key, document) in keys {
            if let Some(selection) = &document.selection {
                self.controller.update_selection(*key, selection.clone());
            }
        }

        let entries = self.controller.entries();
        for (key, valid) in self.controller.row_validity() {
            if valid {
                continue;
            }
            if let Some(entry) = entries.iter().find(|e| e.key == key) {
                warn!(
                    "⚠️ {} 的页码选择 '{}' 非法 (共 {} 页)",
                    entry.display_name,
                    truncate_text(&entry.selection, 40),
                    entry.page_count
                );
            }
        }
    }

    /// 把合并结果写入输出目录
    async fn write_artifact(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let output_dir = PathBuf::from(&self.config.output_dir);
        tokio::fs::create_dir_all(&output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", output_dir.display()))?;

        // 只取文件名部分，避免写到输出目录之外
        let safe_name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.config.default_output_name.clone());
        let path = output_dir.join(safe_name);

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("无法写入输出文件: {}", path.display()))?;

        info!("💾 已保存 {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}
