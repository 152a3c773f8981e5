mod common;

use common::{controller_with, FakeService};
use pdf_splitter::models::parse_job_manifest;
use pdf_splitter::{App, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PDF_BYTES: &[u8] = b"%PDF-1.4\n%%EOF\n";

/// 每个测试使用独立的临时目录
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pdf_splitter_{}_{}_{}",
        name,
        std::process::id(),
        chrono::Local::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn app_for(dir: &Path, service: Arc<FakeService>) -> App {
    let config = Config {
        output_dir: dir.join("out").display().to_string(),
        ..Config::default()
    };
    App::with_controller(config, controller_with(service))
}

#[tokio::test]
async fn test_job_keeps_manifest_order_and_writes_output() {
    let dir = scratch_dir("order");
    for name in ["cover.pdf", "body.pdf"] {
        std::fs::write(dir.join(name), PDF_BYTES).unwrap();
    }

    // 第一个文件上传较慢，完成顺序与任务顺序相反
    let service = Arc::new(
        FakeService::new()
            .with_pages("cover.pdf", 1)
            .with_pages("body.pdf", 8)
            .with_upload_delay("cover.pdf", 30),
    );
    let app = app_for(&dir, service.clone());

    let manifest = parse_job_manifest(&format!(
        r#"
output = "bundle.pdf"

[[documents]]
path = "{}"

[[documents]]
path = "{}"
selection = "2-4, 8"
"#,
        dir.join("cover.pdf").display(),
        dir.join("body.pdf").display()
    ))
    .unwrap();

    let report = app.run_job(manifest).await.unwrap();

    assert_eq!(report.uploaded, 2);
    assert_eq!(report.failed, 0);
    let output = report.output_path.unwrap();
    assert_eq!(output, dir.join("out").join("bundle.pdf"));
    assert!(output.exists());

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    let selections: Vec<&str> = requests[0]
        .items
        .iter()
        .map(|item| item.selection.as_str())
        .collect();
    assert_eq!(selections, vec!["1-1", "2-4, 8"]);
    assert!(requests[0].items[0].id.as_str().ends_with("cover.pdf"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_job_with_invalid_selection_is_not_generated() {
    let dir = scratch_dir("invalid");
    std::fs::write(dir.join("a.pdf"), PDF_BYTES).unwrap();

    let service = Arc::new(FakeService::new().with_pages("a.pdf", 3));
    let app = app_for(&dir, service.clone());

    let manifest = parse_job_manifest(&format!(
        "[[documents]]\npath = \"{}\"\nselection = \"2-7\"\n",
        dir.join("a.pdf").display()
    ))
    .unwrap();

    let report = app.run_job(manifest).await.unwrap();

    assert_eq!(report.uploaded, 1);
    assert!(report.output_path.is_none());
    assert!(service.requests().is_empty());
    assert!(!app.controller().snapshot().rows[0].valid);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_job_with_missing_file_merges_the_rest() {
    let dir = scratch_dir("missing");
    std::fs::write(dir.join("a.pdf"), PDF_BYTES).unwrap();

    let service = Arc::new(FakeService::new());
    let app = app_for(&dir, service.clone());

    let manifest = parse_job_manifest(&format!(
        "[[documents]]\npath = \"{}\"\n\n[[documents]]\npath = \"{}\"\n",
        dir.join("missing.pdf").display(),
        dir.join("a.pdf").display()
    ))
    .unwrap();

    let report = app.run_job(manifest).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.uploaded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(
        report.output_path,
        Some(dir.join("out").join("merged.pdf"))
    );

    std::fs::remove_dir_all(&dir).ok();
}
