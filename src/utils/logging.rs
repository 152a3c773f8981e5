/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug 或 info 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `service_base_url`: 文档服务地址
/// - `max_concurrent`: 最大上传并发数
pub fn log_startup(service_base_url: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 合并模式");
    info!("🌐 文档服务: {}", service_base_url);
    info!("📊 最大上传并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `uploaded`: 上传成功数量
/// - `failed`: 上传失败数量
/// - `total`: 文档总数
/// - `output_path`: 输出文件路径（未生成时为空）
pub fn print_final_stats(
    uploaded: usize,
    failed: usize,
    total: usize,
    output_path: Option<&str>,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 上传成功: {}/{}", uploaded, total);
    info!("❌ 上传失败: {}", failed);
    match output_path {
        Some(path) => info!("📄 输出文件: {}", path),
        None => info!("📄 未生成输出文件"),
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("1-3,5", 10), "1-3,5");
        assert_eq!(truncate_text("1,2,3,4,5,6", 5), "1,2,3...");
        assert_eq!(truncate_text("第一页到第三页", 3), "第一页...");
    }
}
