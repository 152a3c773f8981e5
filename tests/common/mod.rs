//! 测试用的内存文档服务

#![allow(dead_code)]

use async_trait::async_trait;
use pdf_splitter::models::UploadedDocument;
use pdf_splitter::{
    Config, DocumentId, IntakeFile, ServiceError, SplitCollaborator, SplitRequest,
    UploadCollaborator, WorkflowController,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// 内存中的文档服务
///
/// - 上传时按文件名返回预设页数（默认 10 页）
/// - 记录每一次合并请求
/// - 可以让指定文件上传失败、让合并失败，或让合并等待放行
#[derive(Default)]
pub struct FakeService {
    pages: HashMap<String, u32>,
    upload_delays: HashMap<String, Duration>,
    failing_uploads: HashSet<String>,
    fail_split: bool,
    split_gate: Option<Arc<Semaphore>>,
    upload_calls: AtomicUsize,
    requests: Mutex<Vec<SplitRequest>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, name: &str, pages: u32) -> Self {
        self.pages.insert(name.to_string(), pages);
        self
    }

    pub fn with_upload_delay(mut self, name: &str, millis: u64) -> Self {
        self.upload_delays
            .insert(name.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing_upload(mut self, name: &str) -> Self {
        self.failing_uploads.insert(name.to_string());
        self
    }

    pub fn failing_split(mut self) -> Self {
        self.fail_split = true;
        self
    }

    pub fn with_split_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.split_gate = Some(gate);
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SplitRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadCollaborator for FakeService {
    async fn upload(&self, file: &IntakeFile) -> Result<UploadedDocument, ServiceError> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.upload_delays.get(&file.name) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing_uploads.contains(&file.name) {
            return Err(ServiceError::bad_status("upload", 400, "Empty upload"));
        }

        Ok(UploadedDocument {
            id: DocumentId(format!("doc-{}-{}", call, file.name)),
            page_count: self.pages.get(&file.name).copied().unwrap_or(10),
            byte_size: file.byte_size(),
        })
    }
}

#[async_trait]
impl SplitCollaborator for FakeService {
    async fn split(&self, request: &SplitRequest) -> Result<Vec<u8>, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.split_gate {
            gate.acquire().await.unwrap().forget();
        }

        if self.fail_split {
            return Err(ServiceError::bad_status("split", 500, "Internal Server Error"));
        }

        let mut bytes = b"%PDF-1.7\n".to_vec();
        for item in &request.items {
            bytes.extend_from_slice(format!("{}:{}\n", item.id, item.selection).as_bytes());
        }
        Ok(bytes)
    }
}

pub fn pdf(name: &str) -> IntakeFile {
    IntakeFile::new(name, b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n".to_vec())
}

pub fn controller_with(service: Arc<FakeService>) -> WorkflowController {
    WorkflowController::new(&Config::default(), service.clone(), service)
}
