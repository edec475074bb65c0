use std::path::PathBuf;
use std::process::ExitCode;

use shipdoc_extract::utils::logging;
use shipdoc_extract::{App, AppError, Config, ExtractionResponse};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("用法: shipdoc-extract <文件>...");
        return ExitCode::from(1);
    }

    match run(config, paths).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ 处理失败: {:#}", e);
            let code = e.downcast_ref::<AppError>().map(AppError::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(config: Config, paths: Vec<PathBuf>) -> anyhow::Result<ExtractionResponse> {
    let app = App::initialize(config)?;
    app.run(paths).await
}
