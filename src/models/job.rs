use serde::Deserialize;
use std::path::PathBuf;

/// 命令行合并任务
#[derive(Debug, Clone, Deserialize)]
pub struct JobManifest {
    /// 输出文件名，缺省时使用配置中的默认值
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub documents: Vec<JobDocument>,
}

/// 任务中的一份文档
#[derive(Debug, Clone, Deserialize)]
pub struct JobDocument {
    pub path: PathBuf,
    /// 页码选择，缺省时保留全部页
    #[serde(default)]
    pub selection: Option<String>,
}
