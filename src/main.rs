use anyhow::Result;
use pdf_splitter::utils::logging;
use pdf_splitter::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config).await?.run().await?;

    if report.output_path.is_none() {
        anyhow::bail!("未生成输出文件");
    }

    Ok(())
}
