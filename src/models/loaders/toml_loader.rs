use crate::models::job::JobManifest;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载合并任务
///
/// 任务中的相对路径以 TOML 文件所在目录为基准
pub async fn load_job_manifest(toml_file_path: &Path) -> Result<JobManifest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取任务文件: {}", toml_file_path.display()))?;

    let mut manifest = parse_job_manifest(&content)
        .with_context(|| format!("无法解析任务文件: {}", toml_file_path.display()))?;

    if let Some(base_dir) = toml_file_path.parent() {
        for document in &mut manifest.documents {
            if document.path.is_relative() {
                document.path = base_dir.join(&document.path);
            }
        }
    }

    tracing::info!(
        "已加载任务 {}: {} 个文档",
        toml_file_path.display(),
        manifest.documents.len()
    );

    Ok(manifest)
}

/// 解析任务内容
pub fn parse_job_manifest(content: &str) -> Result<JobManifest> {
    let manifest: JobManifest = toml::from_str(content)?;
    if manifest.documents.is_empty() {
        anyhow::bail!("任务中没有任何文档");
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_job_manifest() {
        let content = r#"
output = "bundle.pdf"

[[documents]]
path = "cover.pdf"

[[documents]]
path = "/tmp/body.pdf"
selection = "2-5, 3"
"#;
        let manifest = parse_job_manifest(content).unwrap();
        assert_eq!(manifest.output.as_deref(), Some("bundle.pdf"));
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(manifest.documents[0].path, PathBuf::from("cover.pdf"));
        assert_eq!(manifest.documents[0].selection, None);
        assert_eq!(manifest.documents[1].selection.as_deref(), Some("2-5, 3"));
    }

    #[test]
    fn test_manifest_without_documents_is_rejected() {
        assert!(parse_job_manifest("output = \"x.pdf\"\ndocuments = []\n").is_err());
        assert!(parse_job_manifest("output = \"x.pdf\"\n").is_err());
    }
}
