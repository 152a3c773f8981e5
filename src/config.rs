/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 文档服务地址
    pub service_base_url: String,
    /// 输出文件名为空时使用的默认值
    pub default_output_name: String,
    /// 单个文件大小上限（字节）
    pub max_upload_bytes: u64,
    /// 同时进行的上传数量
    pub max_concurrent_uploads: usize,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 命令行任务文件
    pub job_file: String,
    /// 合并结果的输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:8000".to_string(),
            default_output_name: "merged.pdf".to_string(),
            max_upload_bytes: 100 * 1024 * 1024,
            max_concurrent_uploads: 4,
            request_timeout_secs: 120,
            job_file: "job.toml".to_string(),
            output_dir: "output".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            service_base_url: std::env::var("SPLITTER_BASE_URL").unwrap_or(default.service_base_url),
            default_output_name: std::env::var("DEFAULT_OUTPUT_NAME").unwrap_or(default.default_output_name),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_upload_bytes),
            max_concurrent_uploads: std::env::var("MAX_CONCURRENT_UPLOADS").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.max_concurrent_uploads),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            job_file: std::env::var("JOB_FILE").unwrap_or(default.job_file),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
