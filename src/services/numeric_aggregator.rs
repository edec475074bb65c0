//! 数值汇总 - 业务能力层
//!
//! 让模型列出某个数量（毛重、货值等）在表格文本中的全部取值，
//! 解析成数值序列并计算平均值。解析是全有或全无的：任一项不是数字，整个请求失败。

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::clients::CompletionService;
use crate::error::{AggregateError, AppResult};
use crate::models::{CorpusKey, DocumentCorpus, NumericSeries};
use crate::services::prompts::{number_list_prompt, GROSS_WEIGHT_LABEL, PRICE_LABEL};
use crate::services::reply_parser::parse_number_list;

/// 数值汇总器
///
/// 由数量标签和语料槽位参数化；毛重和货值共用同一套解析逻辑。
pub struct NumericAggregator {
    service: Arc<dyn CompletionService>,
    quantity_label: String,
    source_key: CorpusKey,
}

impl NumericAggregator {
    pub fn new(
        service: Arc<dyn CompletionService>,
        quantity_label: impl Into<String>,
        source_key: CorpusKey,
    ) -> Self {
        Self {
            service,
            quantity_label: quantity_label.into(),
            source_key,
        }
    }

    /// 逐行毛重（千克）
    pub fn gross_weight(service: Arc<dyn CompletionService>) -> Self {
        Self::new(service, GROSS_WEIGHT_LABEL, CorpusKey::ExcelText)
    }

    /// 逐行货值（美元）
    pub fn price(service: Arc<dyn CompletionService>) -> Self {
        Self::new(service, PRICE_LABEL, CorpusKey::ExcelText)
    }

    pub fn quantity_label(&self) -> &str {
        &self.quantity_label
    }

    /// 抽取数值序列并求平均
    ///
    /// 槽位缺失或为空白时不调用模型，返回空序列；
    /// 回复是空列表时同样返回空序列（`mean` 为 `None`）。
    pub async fn aggregate(&self, corpus: &DocumentCorpus) -> AppResult<NumericSeries> {
        let Some(text) = corpus.non_blank(self.source_key) else {
            info!("{} 不可用，{} 返回空序列", self.source_key, self.quantity_label);
            return Ok(NumericSeries::empty());
        };

        info!("🤖 抽取 {} ...", self.quantity_label);
        let completion = self
            .service
            .generate(&number_list_prompt(&self.quantity_label, text))
            .await?;
        debug!("{} 回复: {}", self.quantity_label, completion.text);

        let values = parse_number_list(&completion.text).map_err(|e| {
            error!("❌ {} 回复无法解析: {}", self.quantity_label, e);
            AggregateError::InvalidToken {
                label: self.quantity_label.clone(),
                token: e.token,
                reply: completion.text.trim().to_string(),
            }
        })?;

        let series = NumericSeries::from_values(values);
        match series.mean {
            Some(mean) => info!("✓ {}: {} 项，平均 {}", self.quantity_label, series.len(), mean),
            None => info!("{}: 模型未返回任何数值", self.quantity_label),
        }
        Ok(series)
    }
}
