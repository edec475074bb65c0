//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、创建 LLM 客户端和切分能力
//! 2. **文档加载**：把命令行给出的文件完整读入内存
//! 3. **流程委托**：交给 `DocumentPipeline` 处理
//! 4. **结果输出**：JSON 写到 stdout 或 `OUTPUT_FILE`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::ConfigError;
use crate::infrastructure::LocalPartitioner;
use crate::models::{Document, ExtractionResponse};
use crate::orchestrator::pipeline::DocumentPipeline;
use crate::utils::logging::{log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    pipeline: DocumentPipeline,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        if config.llm_api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                var_name: "LLM_API_KEY".to_string(),
            })
            .context("未配置 LLM 凭据");
        }

        let client = Arc::new(LlmClient::new(&config));
        let pipeline = DocumentPipeline::new(&config, client, Arc::new(LocalPartitioner::new()));

        Ok(Self { config, pipeline })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, paths: Vec<PathBuf>) -> Result<ExtractionResponse> {
        log_startup(paths.len(), &self.config.llm_model_name);

        let documents = load_documents(&paths).await?;
        if documents.is_empty() {
            warn!("⚠️ 没有待处理的文档");
        }

        let response = self.pipeline.process(documents).await?;

        self.write_output(&response).await?;
        print_final_stats(
            response.gross_weight_list.len(),
            response.price_list.len(),
            &response.line_item_count,
            response.general_entity.is_extracted(),
        );

        Ok(response)
    }

    async fn write_output(&self, response: &ExtractionResponse) -> Result<()> {
        let json = serde_json::to_string_pretty(response).context("序列化结果失败")?;
        match &self.config.output_file {
            Some(path) => {
                tokio::fs::write(path, json)
                    .await
                    .with_context(|| format!("写入结果文件失败: {}", path))?;
                info!("💾 结果已保存至: {}", path);
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

/// 读取全部文档
async fn load_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    info!("📁 正在读取 {} 个文档...", paths.len());
    let documents = try_join_all(paths.iter().map(|path| Document::load(path))).await?;
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_requires_api_key() {
        let err = App::initialize(Config::default()).err().expect("should fail without key");
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[tokio::test]
    async fn test_missing_file_fails_run() {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        };
        let app = App::initialize(config).unwrap();
        assert!(app.run(vec![PathBuf::from("/nonexistent/invoice.xlsx")]).await.is_err());
    }
}
