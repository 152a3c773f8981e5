//! 错误通道
//!
//! 只保存最近一次失败的消息，新的上传或生成开始时清空

use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorChannel {
    message: Option<String>,
}

impl ErrorChannel {
    /// 覆盖为新的失败消息
    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("⚠️ {}", message);
        self.message = Some(message);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
