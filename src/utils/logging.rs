/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug / info。
/// 日志写到 stderr，stdout 只留给 JSON 结果。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(document_count: usize, model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 单据抽取模式");
    info!("📄 待处理文档: {} 个", document_count);
    info!("🤖 模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    gross_weight_count: usize,
    price_count: usize,
    line_item_count: &str,
    entity_ok: bool,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抽取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("{} 实体字段", if entity_ok { "✅" } else { "❌" });
    info!("⚖️ 毛重条目: {}", gross_weight_count);
    info!("💲 金额条目: {}", price_count);
    info!("🧾 行项目数: {}", line_item_count);
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
