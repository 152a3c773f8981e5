//! 文件接收检查 - 业务能力层
//!
//! 在发起任何网络请求之前判断文件是否是可接受的 PDF

use tracing::debug;

use crate::config::Config;
use crate::error::IntakeRejection;
use crate::models::IntakeFile;

const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_CONTENT_TYPE: &str = "application/pdf";
/// 查找文件头时最多检查的字节数
const HEADER_SCAN_LIMIT: usize = 1024;

/// 文件接收检查
pub struct IntakeGuard {
    max_upload_bytes: u64,
}

impl IntakeGuard {
    pub fn new(config: &Config) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// 检查文件
    ///
    /// # 返回
    /// 可接受时返回 `Ok(())`，否则返回第一个拒绝原因
    pub fn check(&self, file: &IntakeFile) -> Result<(), IntakeRejection> {
        if !Self::is_pdf_kind(file) {
            return Err(IntakeRejection::UnsupportedType);
        }

        if file.bytes.is_empty() {
            return Err(IntakeRejection::Empty);
        }

        let size = file.byte_size();
        if size > self.max_upload_bytes {
            return Err(IntakeRejection::TooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }

        if !has_pdf_header(&file.bytes) {
            return Err(IntakeRejection::MissingPdfHeader);
        }

        debug!("文件 {} 通过检查 ({} 字节)", file.name, size);
        Ok(())
    }

    fn is_pdf_kind(file: &IntakeFile) -> bool {
        let by_extension = file.name.to_ascii_lowercase().ends_with(".pdf");
        let by_content_type = file
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
            .unwrap_or(false);
        by_extension || by_content_type
    }
}

/// 文件开头（忽略前导空白）是否为 `%PDF-`
fn has_pdf_header(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SCAN_LIMIT)];
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    head[start..].starts_with(PDF_MAGIC)
}
