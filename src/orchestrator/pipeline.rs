//! 单次请求流水线 - 编排层
//!
//! ## 流程
//!
//! ```text
//! Vec<Document> → CorpusBuilder → DocumentCorpus
//!                                   ├─ EntityExtractor
//!                                   ├─ NumericAggregator (毛重)
//!                                   ├─ NumericAggregator (货值)
//!                                   └─ LineItemCounter
//!                                        ↓
//!                                 ExtractionResponse
//! ```
//!
//! 四个抽取阶段只读共享语料、互不依赖，因此并发等待。
//! 错误形态的实体记录和空序列不会中断流程；只有数值解析失败
//! 或补全服务本身出错才会让整个请求失败。

use std::sync::Arc;

use tracing::info;

use crate::clients::CompletionService;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::Partitioner;
use crate::models::{Document, DocumentCorpus, ExtractionResponse};
use crate::services::{CorpusBuilder, EntityExtractor, LineItemCounter, NumericAggregator, TextExtractor};

/// 文档抽取流水线
///
/// 补全服务和切分能力都通过构造函数注入。
pub struct DocumentPipeline {
    corpus_builder: CorpusBuilder,
    entity_extractor: EntityExtractor,
    gross_weight: NumericAggregator,
    price: NumericAggregator,
    line_items: LineItemCounter,
}

impl DocumentPipeline {
    pub fn new(
        config: &Config,
        service: Arc<dyn CompletionService>,
        partitioner: Arc<dyn Partitioner>,
    ) -> Self {
        let extractor = TextExtractor::new(partitioner, config.ocr_languages.clone());
        Self {
            corpus_builder: CorpusBuilder::new(extractor, config),
            entity_extractor: EntityExtractor::new(service.clone()),
            gross_weight: NumericAggregator::gross_weight(service.clone()),
            price: NumericAggregator::price(service.clone()),
            line_items: LineItemCounter::new(service),
        }
    }

    /// 处理一批上传文档
    pub async fn process(&self, documents: Vec<Document>) -> AppResult<ExtractionResponse> {
        info!("📦 开始处理 {} 个文档", documents.len());
        let corpus = self.corpus_builder.build(documents).await?;
        self.extract(&corpus).await
    }

    /// 对已组装好的语料执行全部抽取
    pub async fn extract(&self, corpus: &DocumentCorpus) -> AppResult<ExtractionResponse> {
        info!("语料槽位: {} 个，跳过文档: {} 个", corpus.len(), corpus.skipped().len());

        let (entity, gross_weight, price, line_item_count) = tokio::join!(
            self.entity_extractor.extract(corpus),
            self.gross_weight.aggregate(corpus),
            self.price.aggregate(corpus),
            self.line_items.count(corpus),
        );

        Ok(ExtractionResponse::new(entity?, gross_weight?, price?, line_item_count?))
    }
}
